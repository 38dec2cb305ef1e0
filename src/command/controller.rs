//! Command history with undo/redo

use crate::combat::field::Battlefield;
use crate::command::Command;

#[derive(Debug, Default)]
pub struct CommandController {
    history: Vec<Box<dyn Command>>,
    redo: Vec<Box<dyn Command>>,
}

impl CommandController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Execute and record a command; a new command clears the redo stack
    pub fn execute(&mut self, mut command: Box<dyn Command>, field: &mut Battlefield) -> bool {
        if !command.execute(field) {
            return false;
        }
        self.history.push(command);
        self.redo.clear();
        true
    }

    pub fn undo_last(&mut self, field: &mut Battlefield) -> bool {
        let Some(mut command) = self.history.pop() else {
            field.log.push("Nothing to undo.");
            return false;
        };
        if !command.undo(field) {
            tracing::debug!(command = %command.describe(), "undo refused, kept in history");
            self.history.push(command);
            return false;
        }
        field.log.push(format!("Undid: {}", command.describe()));
        self.redo.push(command);
        true
    }

    pub fn redo_last(&mut self, field: &mut Battlefield) -> bool {
        let Some(mut command) = self.redo.pop() else {
            field.log.push("Nothing to redo.");
            return false;
        };
        if !command.execute(field) {
            tracing::debug!(command = %command.describe(), "redo rejected, dropped");
            return false;
        }
        field.log.push(format!("Redid: {}", command.describe()));
        self.history.push(command);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }
}
