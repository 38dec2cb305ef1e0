pub mod config;
pub mod error;
pub mod types;

pub use config::CombatConfig;
pub use error::{BroadsideError, Result};
pub use types::{CharacterId, Direction, ItemId, Position, QuestId, Side, Turn};
