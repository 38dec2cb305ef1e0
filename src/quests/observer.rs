//! Quest observer protocol
//!
//! Observers are addressed by character id. The manager queues
//! notifications and a registry resolves ids to live observers when the
//! queue is dispatched.

use crate::combat::field::Battlefield;
use crate::combat::log::CombatLog;
use crate::core::types::CharacterId;
use crate::entity::{Character, Ship};
use crate::quests::quest::{Quest, QuestObjective};

pub trait QuestObserver {
    fn on_quest_started(&mut self, quest: &Quest, log: &mut CombatLog);

    fn on_quest_updated(&mut self, quest: &Quest, message: &str, log: &mut CombatLog);

    fn on_objective_updated(&mut self, quest: &Quest, objective: &QuestObjective, log: &mut CombatLog);

    fn on_quest_completed(&mut self, quest: &Quest, log: &mut CombatLog);
}

/// Resolves observer ids at delivery time
pub trait ObserverRegistry {
    fn observer_mut(&mut self, id: CharacterId) -> Option<&mut dyn QuestObserver>;
}

impl Character {
    fn track_kill_objectives(&mut self, quest: &Quest) {
        for (description, kind) in quest.kill_objectives() {
            self.tracked_objectives.insert(description.to_string(), kind);
        }
    }
}

impl QuestObserver for Character {
    fn on_quest_started(&mut self, quest: &Quest, log: &mut CombatLog) {
        if !self.quests.contains(&quest.id) {
            self.quests.push(quest.id);
        }
        self.track_kill_objectives(quest);
        log.push(format!("{}: New quest started - {}", self.name, quest.name));
    }

    fn on_quest_updated(&mut self, quest: &Quest, message: &str, log: &mut CombatLog) {
        self.track_kill_objectives(quest);
        log.push(format!("{}: {}", self.name, message));
    }

    fn on_objective_updated(&mut self, _quest: &Quest, objective: &QuestObjective, log: &mut CombatLog) {
        log.push(format!("{}: Objective completed - {}", self.name, objective.description));
    }

    fn on_quest_completed(&mut self, quest: &Quest, log: &mut CombatLog) {
        self.tracked_objectives
            .retain(|description, _| quest.objectives.iter().all(|o| o.description != *description));
        log.push(format!("{}: Quest completed - {}", self.name, quest.name));
    }
}

impl ObserverRegistry for Ship {
    fn observer_mut(&mut self, id: CharacterId) -> Option<&mut dyn QuestObserver> {
        self.get_mut(id).map(|c| c as &mut dyn QuestObserver)
    }
}

impl ObserverRegistry for [Ship] {
    fn observer_mut(&mut self, id: CharacterId) -> Option<&mut dyn QuestObserver> {
        self.iter_mut()
            .find_map(|s| s.get_mut(id))
            .map(|c| c as &mut dyn QuestObserver)
    }
}

/// Crews still fighting first, then any that retreated
impl ObserverRegistry for Battlefield {
    fn observer_mut(&mut self, id: CharacterId) -> Option<&mut dyn QuestObserver> {
        if self.ships.iter().any(|s| s.contains(id)) {
            return self.ships.as_mut_slice().observer_mut(id);
        }
        self.retreated_mut(id).map(|c| c as &mut dyn QuestObserver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{CharacterKind, ShipClass};
    use crate::quests::catalog;

    #[test]
    fn test_character_tracks_kill_objectives_on_start() {
        let mut jack = CharacterKind::Pirate.create("Jack");
        let mut log = CombatLog::new();
        let quest = catalog::pirate_hunt(3);

        jack.on_quest_started(&quest, &mut log);
        assert_eq!(jack.quests, vec![quest.id]);
        assert_eq!(
            jack.tracked_objectives.get("Defeat 3 pirates"),
            Some(&CharacterKind::Pirate)
        );
        assert!(log.contains("New quest started - Pirate Hunt"));

        jack.on_quest_completed(&quest, &mut log);
        assert!(jack.tracked_objectives.is_empty());
    }

    #[test]
    fn test_ship_resolves_crew_and_fallen() {
        let mut ship = ShipClass::Galleon.create("Black Pearl");
        let gibbs = CharacterKind::Pirate.create("Gibbs");
        let id = gibbs.id;
        ship.fallen.push(gibbs);
        assert!(ship.observer_mut(id).is_some());
        assert!(ship.observer_mut(CharacterId::new()).is_none());
    }
}
