//! Broadside - turn-based crew combat on a grid
//!
//! Two ship crews fight on a cell grid. Player actions go through reversible
//! commands, the other combatants follow a fixed heuristic, and quest
//! progress is reported to observing characters once the fight resolves.

pub mod combat;
pub mod command;
pub mod core;
pub mod entity;
pub mod items;
pub mod quests;
pub mod world;
