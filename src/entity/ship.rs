//! Ships - exclusive owners of a crew and its cargo

use serde::{Deserialize, Serialize};

use crate::core::types::CharacterId;
use crate::entity::character::Character;
use crate::items::Item;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ShipClass {
    #[default]
    Galleon,
    Frigate,
    ManOWar,
}

impl ShipClass {
    /// (hull, attack power)
    pub fn base_stats(&self) -> (u32, u32) {
        match self {
            ShipClass::Galleon => (200, 50),
            ShipClass::Frigate => (150, 60),
            ShipClass::ManOWar => (250, 70),
        }
    }

    pub fn create(&self, name: impl Into<String>) -> Ship {
        let (hull, attack_power) = self.base_stats();
        Ship {
            name: name.into(),
            class: *self,
            hull,
            attack_power,
            ..Ship::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Ship {
    pub name: String,
    pub class: ShipClass,
    /// Unused by crew combat
    pub hull: u32,
    pub attack_power: u32,
    /// Living crew in crew order
    pub crew: Vec<Character>,
    /// Crew removed on death, kept addressable by id
    pub fallen: Vec<Character>,
    pub cargo: Vec<Item>,
}

impl Ship {
    pub fn add_crew(&mut self, character: Character) {
        self.crew.push(character);
    }

    pub fn load(&mut self, item: Item) {
        self.cargo.push(item);
    }

    pub fn has_living_crew(&self) -> bool {
        self.crew.iter().any(Character::is_alive)
    }

    pub fn living(&self) -> impl Iterator<Item = &Character> {
        self.crew.iter().filter(|c| c.is_alive())
    }

    pub fn first_living(&self) -> Option<&Character> {
        self.living().next()
    }

    /// Crew and fallen alike
    pub fn everyone(&self) -> impl Iterator<Item = &Character> {
        self.crew.iter().chain(self.fallen.iter())
    }

    pub fn everyone_mut(&mut self) -> impl Iterator<Item = &mut Character> {
        self.crew.iter_mut().chain(self.fallen.iter_mut())
    }

    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.everyone().find(|c| c.id == id)
    }

    pub fn get_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.everyone_mut().find(|c| c.id == id)
    }

    pub fn contains(&self, id: CharacterId) -> bool {
        self.get(id).is_some()
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Character> {
        self.everyone().find(|c| c.name == name)
    }

    /// Move dead crew into `fallen`; returns the ids moved
    pub fn sweep_dead(&mut self) -> Vec<CharacterId> {
        let (living, dead): (Vec<_>, Vec<_>) =
            std::mem::take(&mut self.crew).into_iter().partition(Character::is_alive);
        self.crew = living;
        let ids = dead.iter().map(|c| c.id).collect();
        self.fallen.extend(dead);
        ids
    }
}
