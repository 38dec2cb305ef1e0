//! Character states - passive per-turn behaviour
//!
//! Applied once per living character per full turn, after every action has resolved.

use serde::{Deserialize, Serialize};

use crate::combat::constants::*;
use crate::combat::log::CombatLog;
use crate::entity::Character;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CharacterState {
    /// Recovering between actions
    #[default]
    Idle,
    /// Just moved or switched strategy
    Acting,
    /// Guard raised; entered by explicit choice only
    Defending,
}

impl CharacterState {
    pub fn name(&self) -> &'static str {
        match self {
            CharacterState::Idle => "Idle",
            CharacterState::Acting => "Action",
            CharacterState::Defending => "Defending",
        }
    }

    /// Apply this state's passive effect to `character`
    pub fn on_turn(&self, character: &mut Character, log: &mut CombatLog) {
        match self {
            CharacterState::Idle => {
                character.regenerate_magic_points(IDLE_MP_REGEN);
                character.regenerate_stamina(IDLE_STAMINA_REGEN);
            }
            CharacterState::Acting => {}
            CharacterState::Defending => {
                character.regenerate_stamina(DEFENDING_STAMINA_REGEN);
                character.regenerate_magic_points(DEFENDING_MP_REGEN);
                log.push(format!(
                    "{} is defending. (+{} Stamina, +{} MP)",
                    character.name, DEFENDING_STAMINA_REGEN, DEFENDING_MP_REGEN
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::CharacterKind;

    #[test]
    fn test_idle_regenerates_capped() {
        let mut log = CombatLog::new();
        let mut c = Character::new("Gibbs", CharacterKind::Pirate, 100, 50);
        c.stamina = c.max_stamina;
        c.magic_points = c.max_magic_points - 1;

        CharacterState::Idle.on_turn(&mut c, &mut log);
        assert_eq!(c.stamina, c.max_stamina);
        assert_eq!(c.magic_points, c.max_magic_points);
        assert!(log.is_empty());
    }

    #[test]
    fn test_acting_has_no_effect() {
        let mut log = CombatLog::new();
        let mut c = Character::new("Gibbs", CharacterKind::Pirate, 100, 50);
        c.stamina = 10;
        CharacterState::Acting.on_turn(&mut c, &mut log);
        assert_eq!(c.stamina, 10);
    }

    #[test]
    fn test_defending_regenerates_and_logs() {
        let mut log = CombatLog::new();
        let mut c = Character::new("Gibbs", CharacterKind::Pirate, 100, 50);
        c.stamina = 10;
        c.magic_points = 10;
        CharacterState::Defending.on_turn(&mut c, &mut log);
        assert_eq!(c.stamina, 13);
        assert_eq!(c.magic_points, 11);
        assert!(log.contains("Gibbs is defending"));
    }
}
