use crate::combat::field::Battlefield;
use crate::combat::state::CharacterState;
use crate::command::{refuse, Command, Rejection};
use crate::core::types::CharacterId;

/// Raise a guard; needs something in the defensive slot
#[derive(Debug)]
pub struct DefendCommand {
    actor: CharacterId,
    before: Option<CharacterState>,
}

impl DefendCommand {
    pub fn new(actor: CharacterId) -> Self {
        Self {
            actor,
            before: None,
        }
    }
}

impl Command for DefendCommand {
    fn execute(&mut self, field: &mut Battlefield) -> bool {
        if self.before.is_some() {
            return refuse(field, Rejection::AlreadyExecuted);
        }
        let Some(actor) = field.get_mut(self.actor) else {
            return refuse(field, Rejection::MissingCharacter);
        };
        if !actor.has_defensive_item() {
            let rejection = Rejection::NoDefensiveItem(actor.name.clone());
            return refuse(field, rejection);
        }
        self.before = Some(actor.state);
        actor.state = CharacterState::Defending;
        let line = format!("{} takes a defensive stance.", actor.name);
        field.log.push(line);
        true
    }

    fn undo(&mut self, field: &mut Battlefield) -> bool {
        if let Some(prior) = self.before.take() {
            if let Some(actor) = field.get_mut(self.actor) {
                actor.state = prior;
            }
        }
        true
    }

    fn describe(&self) -> String {
        "Defend".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::test_support::{arm, duel};
    use crate::entity::EquipmentSlot;

    #[test]
    fn test_defend_needs_defensive_item() {
        let (mut field, jack, _) = duel();
        arm(&mut field, jack, 10, EquipmentSlot::Weapon);
        let mut cmd = DefendCommand::new(jack);
        assert!(!cmd.execute(&mut field));
        assert_eq!(field.get(jack).unwrap().state, CharacterState::Idle);
        assert!(field.log.contains("no defensive item"));
    }

    #[test]
    fn test_defend_and_undo_restores_prior_state() {
        let (mut field, jack, _) = duel();
        arm(&mut field, jack, 3, EquipmentSlot::Defensive);
        field.get_mut(jack).unwrap().state = CharacterState::Acting;

        let mut cmd = DefendCommand::new(jack);
        assert!(cmd.execute(&mut field));
        assert_eq!(field.get(jack).unwrap().state, CharacterState::Defending);

        cmd.undo(&mut field);
        assert_eq!(field.get(jack).unwrap().state, CharacterState::Acting);
    }
}
