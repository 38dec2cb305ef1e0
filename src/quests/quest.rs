//! Quests and their objectives

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::core::types::QuestId;
use crate::entity::CharacterKind;
use crate::quests::world_state::WorldState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestType {
    Naval,
    Combat,
    Trade,
    Escort,
    Exploration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum QuestState {
    #[default]
    Available,
    InProgress,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RewardKind {
    Gold,
    Reputation,
}

/// World condition an objective waits on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectiveCondition {
    /// Progress counted under the objective's description reaches `count`
    DefeatKind { kind: CharacterKind, count: u32 },
    LocateShip { name: String },
    DefeatShip { name: String },
}

impl ObjectiveCondition {
    pub fn is_met(&self, description: &str, world: &WorldState) -> bool {
        match self {
            ObjectiveCondition::DefeatKind { count, .. } => world.progress(description) >= *count,
            ObjectiveCondition::LocateShip { name } => world.has_sighted(name),
            ObjectiveCondition::DefeatShip { name } => world.has_defeated(name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestObjective {
    pub description: String,
    pub condition: ObjectiveCondition,
    completed: bool,
}

impl QuestObjective {
    pub fn new(description: impl Into<String>, condition: ObjectiveCondition) -> Self {
        Self {
            description: description.into(),
            condition,
            completed: false,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Completion is one-way
    pub fn complete(&mut self) {
        self.completed = true;
    }

    /// Re-evaluate; true when this call completed the objective
    pub fn check(&mut self, world: &WorldState) -> bool {
        if self.completed || !self.condition.is_met(&self.description, world) {
            return false;
        }
        self.completed = true;
        true
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quest {
    pub id: QuestId,
    pub name: String,
    pub description: String,
    pub quest_type: QuestType,
    pub state: QuestState,
    pub objectives: Vec<QuestObjective>,
    pub rewards: AHashMap<RewardKind, u32>,
}

impl Quest {
    pub fn new(name: impl Into<String>, description: impl Into<String>, quest_type: QuestType) -> Self {
        Self {
            id: QuestId::new(),
            name: name.into(),
            description: description.into(),
            quest_type,
            state: QuestState::Available,
            objectives: Vec::new(),
            rewards: AHashMap::new(),
        }
    }

    pub fn with_objective(mut self, description: impl Into<String>, condition: ObjectiveCondition) -> Self {
        self.objectives.push(QuestObjective::new(description, condition));
        self
    }

    pub fn with_reward(mut self, kind: RewardKind, amount: u32) -> Self {
        self.rewards.insert(kind, amount);
        self
    }

    /// True exactly when every objective is complete
    pub fn is_completed(&self) -> bool {
        self.objectives.iter().all(QuestObjective::is_completed)
    }

    pub fn completed_objectives(&self) -> usize {
        self.objectives.iter().filter(|o| o.is_completed()).count()
    }

    /// Re-evaluate open objectives; returns the indices completed by this call
    pub fn check_objectives(&mut self, world: &WorldState) -> Vec<usize> {
        self.objectives
            .iter_mut()
            .enumerate()
            .filter_map(|(i, o)| o.check(world).then_some(i))
            .collect()
    }

    /// Objectives advanced by defeating a kind of character: (description, kind)
    pub fn kill_objectives(&self) -> impl Iterator<Item = (&str, CharacterKind)> {
        self.objectives.iter().filter_map(|o| match o.condition {
            ObjectiveCondition::DefeatKind { kind, .. } => Some((o.description.as_str(), kind)),
            _ => None,
        })
    }

    /// Rewards in a stable order for display
    pub fn sorted_rewards(&self) -> Vec<(RewardKind, u32)> {
        let mut rewards: Vec<_> = self.rewards.iter().map(|(k, v)| (*k, *v)).collect();
        rewards.sort();
        rewards
    }
}
