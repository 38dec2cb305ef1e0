//! Reversible commands - every player-directed state change goes through here
//!
//! A command is built against character ids, executed at most once against
//! the battlefield, and keeps a before-snapshot of the fields it touched so
//! `undo` restores them exactly.

pub mod attack;
pub mod controller;
pub mod defend;
pub mod heal;
pub mod macro_command;
pub mod movement;

pub use attack::AttackCommand;
pub use controller::CommandController;
pub use defend::DefendCommand;
pub use heal::HealCommand;
pub use macro_command::MacroCommand;
pub use movement::MoveCommand;

use std::fmt;

use thiserror::Error;

use crate::combat::field::Battlefield;
use crate::core::types::Position;

pub trait Command: fmt::Debug {
    /// Apply the change. False means a precondition failed and nothing changed.
    fn execute(&mut self, field: &mut Battlefield) -> bool;

    /// Reverse a successful `execute`; no-op otherwise.
    ///
    /// False means the reversal was refused and nothing changed; the command
    /// keeps its snapshot and may be undone later. A command that never ran
    /// has nothing to reverse and reports true.
    fn undo(&mut self, field: &mut Battlefield) -> bool;

    /// Short label for the log
    fn describe(&self) -> String;
}

/// Why a command refused to execute
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("{0} has no weapon equipped.")]
    NoWeapon(String),

    #[error("{0} has no defensive item equipped.")]
    NoDefensiveItem(String),

    #[error("{name} is too tired ({have} stamina, needs {need}).")]
    InsufficientStamina { name: String, have: u32, need: u32 },

    #[error("{name} lacks magic ({have} MP, needs {need}).")]
    InsufficientMagic { name: String, have: u32, need: u32 },

    #[error("{0} is outside the battlefield.")]
    OutOfBounds(Position),

    #[error("{0} is occupied.")]
    Occupied(Position),

    #[error("{0} is already down.")]
    TargetDown(String),

    #[error("Command already executed.")]
    AlreadyExecuted,

    #[error("Character is not on the battlefield.")]
    MissingCharacter,
}

/// Log a rejection and report failure
///
/// `AlreadyExecuted` stays out of the player log: a repeated execute is a silent no-op.
pub(crate) fn refuse(field: &mut Battlefield, rejection: Rejection) -> bool {
    tracing::debug!(%rejection, "command rejected");
    if rejection != Rejection::AlreadyExecuted {
        field.log.push(rejection.to_string());
    }
    false
}
