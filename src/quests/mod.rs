//! Quests: definitions, progress checks and the observer protocol

pub mod catalog;
pub mod manager;
pub mod observer;
pub mod quest;
pub mod world_state;

pub use manager::{Notification, QuestEvent, QuestManager};
pub use observer::{ObserverRegistry, QuestObserver};
pub use quest::{ObjectiveCondition, Quest, QuestObjective, QuestState, QuestType, RewardKind};
pub use world_state::WorldState;
