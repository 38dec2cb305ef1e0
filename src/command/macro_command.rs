use crate::combat::field::Battlefield;
use crate::command::{refuse, Command, Rejection};

/// An ordered sequence of commands
///
/// Execution stops at the first failing sub-command and keeps whatever ran
/// before it; `execute` then reports false. Undo reverses every sub-command
/// in reverse order (sub-commands that never ran ignore it) and stops at the
/// first refused reversal.
#[derive(Debug, Default)]
pub struct MacroCommand {
    commands: Vec<Box<dyn Command>>,
    executed: bool,
}

impl MacroCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    pub fn with(mut self, command: impl Command + 'static) -> Self {
        self.push(Box::new(command));
        self
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Command for MacroCommand {
    fn execute(&mut self, field: &mut Battlefield) -> bool {
        if self.executed {
            return refuse(field, Rejection::AlreadyExecuted);
        }
        self.executed = true;
        for (i, command) in self.commands.iter_mut().enumerate() {
            if !command.execute(field) {
                tracing::debug!(step = i, command = %command.describe(), "macro stopped");
                return false;
            }
        }
        true
    }

    fn undo(&mut self, field: &mut Battlefield) -> bool {
        if !self.executed {
            return true;
        }
        // Steps already reversed report true on a retry
        for command in self.commands.iter_mut().rev() {
            if !command.undo(field) {
                tracing::debug!(command = %command.describe(), "macro undo stopped");
                return false;
            }
        }
        self.executed = false;
        true
    }

    fn describe(&self) -> String {
        let steps: Vec<String> = self.commands.iter().map(|c| c.describe()).collect();
        format!("Macro [{}]", steps.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::test_support::{arm, duel};
    use crate::command::{AttackCommand, DefendCommand, MoveCommand};
    use crate::core::types::Position;
    use crate::entity::EquipmentSlot;

    #[test]
    fn test_macro_runs_in_order_and_undoes_in_reverse() {
        let (mut field, jack, norrington) = duel();
        arm(&mut field, jack, 10, EquipmentSlot::Weapon);
        field.relocate(norrington, Position::new(3, 0));

        let mut combo = MacroCommand::new()
            .with(MoveCommand::new(jack, Position::new(2, 0)))
            .with(AttackCommand::new(jack, norrington));
        assert!(combo.execute(&mut field));
        assert_eq!(field.get(jack).unwrap().position, Position::new(2, 0));
        assert_eq!(field.get(norrington).unwrap().health, 150 - 22);

        combo.undo(&mut field);
        assert_eq!(field.get(jack).unwrap().position, Position::new(1, 0));
        assert_eq!(field.get(norrington).unwrap().health, 150);
        assert!(field.positions_consistent());
    }

    #[test]
    fn test_macro_stops_at_first_failure() {
        let (mut field, jack, norrington) = duel();
        let mut combo = MacroCommand::new()
            .with(MoveCommand::new(jack, Position::new(2, 0)))
            .with(DefendCommand::new(jack))
            .with(AttackCommand::new(jack, norrington));

        assert!(!combo.execute(&mut field));
        // The move stays applied
        assert_eq!(field.get(jack).unwrap().position, Position::new(2, 0));
        assert_eq!(field.get(norrington).unwrap().health, 150);

        combo.undo(&mut field);
        assert_eq!(field.get(jack).unwrap().position, Position::new(1, 0));
    }
}
