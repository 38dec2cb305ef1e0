//! Item factories by rarity tier

use serde::{Deserialize, Serialize};

use crate::items::{Item, Rarity, WeaponKind};

/// Rarity tier an item is produced at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemTier {
    Common,
    Rare,
    Mythical,
}

impl ItemTier {
    pub fn rarity(&self) -> Rarity {
        match self {
            ItemTier::Common => Rarity::Common,
            ItemTier::Rare => Rarity::Rare,
            ItemTier::Mythical => Rarity::Mythical,
        }
    }

    pub fn create_weapon(&self) -> Item {
        let (name, damage) = match self {
            ItemTier::Common => ("Rusty Cutlass", 10),
            ItemTier::Rare => ("Sharp Cutlass", 25),
            ItemTier::Mythical => ("Balanced fancy Cutlass", 50),
        };
        Item::weapon(name, self.rarity(), damage, WeaponKind::Melee)
    }

    pub fn create_relic(&self) -> Item {
        let (name, power, age) = match self {
            ItemTier::Common => ("bracelet", 5, 100),
            ItemTier::Rare => ("Golden ring", 20, 300),
            ItemTier::Mythical => ("Compass that doesn't point north", 50, 1000),
        };
        Item::relic(name, self.rarity(), power, age)
    }

    pub fn create_treasure_map(&self) -> Item {
        let (name, complexity, condition) = match self {
            ItemTier::Common => ("Old Map", 2, "Torn"),
            ItemTier::Rare => ("Intricate Map", 5, "Well-Preserved"),
            ItemTier::Mythical => ("Ancient Map", 10, "Pristine"),
        };
        Item::treasure_map(name, self.rarity(), complexity, condition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weapon_damage_grows_with_tier() {
        let common = ItemTier::Common.create_weapon().weapon_damage().unwrap();
        let rare = ItemTier::Rare.create_weapon().weapon_damage().unwrap();
        let mythical = ItemTier::Mythical.create_weapon().weapon_damage().unwrap();
        assert!(common < rare && rare < mythical);
    }

    #[test]
    fn test_factory_sets_rarity() {
        assert_eq!(ItemTier::Rare.create_relic().rarity, Rarity::Rare);
        assert_eq!(ItemTier::Mythical.create_treasure_map().rarity, Rarity::Mythical);
    }

    #[test]
    fn test_each_item_gets_fresh_id() {
        let a = ItemTier::Common.create_weapon();
        let b = ItemTier::Common.create_weapon();
        assert_ne!(a.id, b.id);
    }
}
