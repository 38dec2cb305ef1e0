//! Quest definitions

use crate::entity::CharacterKind;
use crate::quests::quest::{ObjectiveCondition, Quest, QuestType, RewardKind};

/// Defeat `count` pirates
pub fn pirate_hunt(count: u32) -> Quest {
    Quest::new(
        "Pirate Hunt",
        format!("Defeat {} pirates terrorizing the seas.", count),
        QuestType::Combat,
    )
    .with_objective(
        format!("Defeat {} pirates", count),
        ObjectiveCondition::DefeatKind {
            kind: CharacterKind::Pirate,
            count,
        },
    )
    .with_reward(RewardKind::Gold, 500 * count)
    .with_reward(RewardKind::Reputation, 20 * count)
}

/// Find and defeat a named ship
pub fn ship_battle(target: &str) -> Quest {
    Quest::new(
        format!("Defeat the {}", target),
        format!("Find and defeat the ship named {}.", target),
        QuestType::Combat,
    )
    .with_objective(
        format!("Locate the {}", target),
        ObjectiveCondition::LocateShip {
            name: target.to_string(),
        },
    )
    .with_objective(
        format!("Defeat {}", target),
        ObjectiveCondition::DefeatShip {
            name: target.to_string(),
        },
    )
    .with_reward(RewardKind::Gold, 1000)
    .with_reward(RewardKind::Reputation, 50)
}
