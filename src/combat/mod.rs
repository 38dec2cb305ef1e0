//! Combat: the grid, action strategies, crew AI and the turn loop

pub mod ai;
pub mod constants;
pub mod field;
pub mod frontend;
pub mod grid;
pub mod log;
pub mod scene;
pub mod state;
pub mod strategy;

pub use ai::{AiDecision, CrewAi, HeuristicAi};
pub use field::Battlefield;
pub use frontend::{CombatFrontend, PlayerIntent, SceneView, ScriptedFrontend};
pub use grid::{Cell, CombatGrid};
pub use log::CombatLog;
pub use scene::{CombatOutcome, CombatScene, ScenePhase};
pub use state::CharacterState;
pub use strategy::{ActionEffect, ActionStrategy};
