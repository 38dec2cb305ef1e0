//! Items: weapons, relics and treasure maps
//!
//! Items are carried in inventories, equipped in slots, or lie on the combat
//! grid waiting to be picked up.

pub mod factory;

pub use factory::ItemTier;

use serde::{Deserialize, Serialize};

use crate::combat::strategy::ActionStrategy;
use crate::core::types::{ItemId, Position};

/// Item rarity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Mythical,
}

/// How a weapon is used
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponKind {
    Melee,
    Ranged,
}

/// Variant payload for each item type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Weapon { damage: u32, weapon: WeaponKind },
    Relic { power: u32, age: u32 },
    /// No combat effect
    TreasureMap { complexity: u32, condition: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub rarity: Rarity,
    pub kind: ItemKind,
    /// Set while the item lies on the combat grid
    pub position: Option<Position>,
}

impl Item {
    pub fn new(name: impl Into<String>, rarity: Rarity, kind: ItemKind) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            rarity,
            kind,
            position: None,
        }
    }

    pub fn weapon(name: impl Into<String>, rarity: Rarity, damage: u32, weapon: WeaponKind) -> Self {
        Self::new(name, rarity, ItemKind::Weapon { damage, weapon })
    }

    pub fn relic(name: impl Into<String>, rarity: Rarity, power: u32, age: u32) -> Self {
        Self::new(name, rarity, ItemKind::Relic { power, age })
    }

    pub fn treasure_map(
        name: impl Into<String>,
        rarity: Rarity,
        complexity: u32,
        condition: impl Into<String>,
    ) -> Self {
        Self::new(
            name,
            rarity,
            ItemKind::TreasureMap {
                complexity,
                condition: condition.into(),
            },
        )
    }

    pub fn is_weapon(&self) -> bool {
        matches!(self.kind, ItemKind::Weapon { .. })
    }

    pub fn is_relic(&self) -> bool {
        matches!(self.kind, ItemKind::Relic { .. })
    }

    /// Weapon damage, if this is a weapon
    pub fn weapon_damage(&self) -> Option<u32> {
        match self.kind {
            ItemKind::Weapon { damage, .. } => Some(damage),
            _ => None,
        }
    }

    /// Relic power, if this is a relic
    pub fn relic_power(&self) -> Option<u32> {
        match self.kind {
            ItemKind::Relic { power, .. } => Some(power),
            _ => None,
        }
    }

    /// Strategy unlocked by carrying this item
    pub fn unlocks(&self) -> Option<ActionStrategy> {
        match self.kind {
            ItemKind::Weapon {
                weapon: WeaponKind::Melee,
                ..
            } => Some(ActionStrategy::Melee),
            ItemKind::Weapon {
                weapon: WeaponKind::Ranged,
                ..
            } => Some(ActionStrategy::Ranged),
            ItemKind::Relic { .. } => Some(ActionStrategy::Magic),
            ItemKind::TreasureMap { .. } => None,
        }
    }

    /// One-character map symbol
    pub fn symbol(&self) -> char {
        match self.kind {
            ItemKind::Weapon { .. } => 'W',
            ItemKind::Relic { .. } => 'R',
            ItemKind::TreasureMap { .. } => 'M',
        }
    }

    /// Short description for menus and logs
    pub fn describe(&self) -> String {
        match &self.kind {
            ItemKind::Weapon { damage, weapon } => {
                format!("{:?} {} (Type: {:?}, Damage: {})", self.rarity, self.name, weapon, damage)
            }
            ItemKind::Relic { power, age } => {
                format!("{:?} {} (Power: {}, Age: {} years)", self.rarity, self.name, power, age)
            }
            ItemKind::TreasureMap {
                complexity,
                condition,
            } => format!(
                "{:?} {} (Complexity: {}, Condition: {})",
                self.rarity, self.name, complexity, condition
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_unlocks_matching_strategy() {
        let cutlass = Item::weapon("Cutlass", Rarity::Common, 10, WeaponKind::Melee);
        let pistol = Item::weapon("Pistol", Rarity::Rare, 12, WeaponKind::Ranged);
        assert_eq!(cutlass.unlocks(), Some(ActionStrategy::Melee));
        assert_eq!(pistol.unlocks(), Some(ActionStrategy::Ranged));
    }

    #[test]
    fn test_relic_unlocks_magic_and_map_nothing() {
        let ring = Item::relic("Ring", Rarity::Rare, 20, 300);
        let map = Item::treasure_map("Map", Rarity::Common, 2, "Torn");
        assert_eq!(ring.unlocks(), Some(ActionStrategy::Magic));
        assert_eq!(map.unlocks(), None);
        assert_eq!(ring.relic_power(), Some(20));
        assert_eq!(map.weapon_damage(), None);
    }

    #[test]
    fn test_symbols() {
        assert_eq!(Item::relic("Ring", Rarity::Rare, 1, 1).symbol(), 'R');
        assert_eq!(Item::treasure_map("Map", Rarity::Rare, 1, "ok").symbol(), 'M');
    }
}
