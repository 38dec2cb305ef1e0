//! Character - the aggregate the combat core operates on

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::combat::state::CharacterState;
use crate::combat::strategy::ActionStrategy;
use crate::core::types::{CharacterId, Position, QuestId};
use crate::entity::equipment::{Equipment, EquipmentSlot};
use crate::items::Item;

pub const DEFAULT_STAMINA: u32 = 100;
pub const DEFAULT_MAGIC_POINTS: u32 = 40;
pub const DEFAULT_AMMUNITION: u32 = 10;
pub const DEFAULT_INVENTORY_CAPACITY: usize = 20;

/// What a character is; sets base vitals and is matched by quest objectives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterKind {
    Pirate,
    EnglishSoldier,
    SpanishSoldier,
    Civilian,
}

impl CharacterKind {
    /// (max health, strength)
    pub fn base_stats(&self) -> (u32, u32) {
        match self {
            CharacterKind::Pirate => (100, 50),
            CharacterKind::EnglishSoldier => (150, 40),
            CharacterKind::SpanishSoldier => (160, 45),
            CharacterKind::Civilian => (80, 10),
        }
    }

    pub fn create(&self, name: impl Into<String>) -> Character {
        let (health, strength) = self.base_stats();
        Character::new(name, *self, health, strength)
    }

    pub fn plural(&self) -> &'static str {
        match self {
            CharacterKind::Pirate => "pirates",
            CharacterKind::EnglishSoldier => "English soldiers",
            CharacterKind::SpanishSoldier => "Spanish soldiers",
            CharacterKind::Civilian => "civilians",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub kind: CharacterKind,

    pub health: u32,
    pub max_health: u32,
    pub stamina: u32,
    pub max_stamina: u32,
    pub magic_points: u32,
    pub max_magic_points: u32,
    pub ammunition: u32,
    pub strength: u32,

    pub position: Position,
    pub inventory: Vec<Item>,
    pub inventory_capacity: usize,
    pub equipment: Equipment,

    pub strategy: ActionStrategy,
    pub state: CharacterState,
    /// Strategies unlocked by items ever carried; only grows
    pub unlocked: Vec<ActionStrategy>,

    /// Objective description -> progress count
    pub quest_progress: AHashMap<String, u32>,
    /// Objective description -> kind whose defeat advances it
    pub tracked_objectives: AHashMap<String, CharacterKind>,
    pub quests: Vec<QuestId>,
    pub kills: u32,
}

impl Character {
    pub fn new(name: impl Into<String>, kind: CharacterKind, max_health: u32, strength: u32) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            kind,
            health: max_health,
            max_health,
            stamina: DEFAULT_STAMINA,
            max_stamina: DEFAULT_STAMINA,
            magic_points: DEFAULT_MAGIC_POINTS,
            max_magic_points: DEFAULT_MAGIC_POINTS,
            ammunition: DEFAULT_AMMUNITION,
            strength,
            position: Position::default(),
            inventory: Vec::new(),
            inventory_capacity: DEFAULT_INVENTORY_CAPACITY,
            equipment: Equipment::new(),
            strategy: ActionStrategy::Melee,
            state: CharacterState::Idle,
            unlocked: vec![ActionStrategy::Melee, ActionStrategy::Heal],
            quest_progress: AHashMap::new(),
            tracked_objectives: AHashMap::new(),
            quests: Vec::new(),
            kills: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Returns the health actually removed
    pub fn take_damage(&mut self, amount: u32) -> u32 {
        let dealt = amount.min(self.health);
        self.health -= dealt;
        dealt
    }

    /// Returns the health actually restored
    pub fn heal(&mut self, amount: u32) -> u32 {
        let restored = amount.min(self.max_health.saturating_sub(self.health));
        self.health += restored;
        restored
    }

    pub fn use_stamina(&mut self, amount: u32) {
        self.stamina = self.stamina.saturating_sub(amount);
    }

    pub fn use_magic_points(&mut self, amount: u32) {
        self.magic_points = self.magic_points.saturating_sub(amount);
    }

    pub fn use_ammunition(&mut self, amount: u32) {
        self.ammunition = self.ammunition.saturating_sub(amount);
    }

    pub fn regenerate_stamina(&mut self, amount: u32) {
        self.stamina = (self.stamina + amount).min(self.max_stamina);
    }

    pub fn regenerate_magic_points(&mut self, amount: u32) {
        self.magic_points = (self.magic_points + amount).min(self.max_magic_points);
    }

    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&Item> {
        self.equipment.get(slot)
    }

    pub fn has_weapon(&self) -> bool {
        !self.equipment.is_empty(EquipmentSlot::Weapon)
    }

    pub fn has_defensive_item(&self) -> bool {
        !self.equipment.is_empty(EquipmentSlot::Defensive)
    }

    pub fn equipped_weapon_damage(&self) -> Option<u32> {
        self.equipped(EquipmentSlot::Weapon)
            .and_then(|item| item.weapon_damage())
    }

    pub fn has_unlocked(&self, strategy: ActionStrategy) -> bool {
        self.unlocked.contains(&strategy)
    }

    pub fn unlock(&mut self, strategy: ActionStrategy) {
        if !self.has_unlocked(strategy) {
            self.unlocked.push(strategy);
        }
    }

    /// Select the `index`-th unlocked strategy (0-based); forces Acting
    pub fn switch_strategy(&mut self, index: usize) -> Option<ActionStrategy> {
        let strategy = *self.unlocked.get(index)?;
        self.strategy = strategy;
        self.state = CharacterState::Acting;
        Some(strategy)
    }

    /// Credit a defeated target: kill count plus any objective tracking its kind
    pub fn record_kill(&mut self, victim: CharacterKind) {
        self.kills += 1;
        for (description, kind) in &self.tracked_objectives {
            if *kind == victim {
                *self.quest_progress.entry(description.clone()).or_insert(0) += 1;
            }
        }
    }

    pub fn progress(&self, description: &str) -> u32 {
        self.quest_progress.get(description).copied().unwrap_or(0)
    }

    /// One-line status for menus and the crew panel
    pub fn status_line(&self) -> String {
        format!(
            "{} HP:{}/{} ST:{}/{} MP:{}/{} AM:{} [{} | {}]",
            self.name,
            self.health,
            self.max_health,
            self.stamina,
            self.max_stamina,
            self.magic_points,
            self.max_magic_points,
            self.ammunition,
            self.strategy.name(),
            self.state.name()
        )
    }
}
