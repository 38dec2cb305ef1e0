//! Equipment slots - at most one item per slot

use serde::{Deserialize, Serialize};

use crate::items::{Item, ItemKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Defensive,
    Utility,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 3] = [
        EquipmentSlot::Weapon,
        EquipmentSlot::Defensive,
        EquipmentSlot::Utility,
    ];

    /// Slot an item goes to when equipped without an explicit choice
    pub fn for_item(item: &Item) -> Option<EquipmentSlot> {
        match item.kind {
            ItemKind::Weapon { .. } => Some(EquipmentSlot::Weapon),
            ItemKind::Relic { .. } => Some(EquipmentSlot::Utility),
            ItemKind::TreasureMap { .. } => None,
        }
    }

    /// Weapons fit the weapon and defensive slots, relics the utility slot
    pub fn accepts(&self, item: &Item) -> bool {
        match self {
            EquipmentSlot::Weapon | EquipmentSlot::Defensive => item.is_weapon(),
            EquipmentSlot::Utility => item.is_relic(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equipment {
    weapon: Option<Item>,
    defensive: Option<Item>,
    utility: Option<Item>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, slot: EquipmentSlot) -> Option<&Item> {
        match slot {
            EquipmentSlot::Weapon => self.weapon.as_ref(),
            EquipmentSlot::Defensive => self.defensive.as_ref(),
            EquipmentSlot::Utility => self.utility.as_ref(),
        }
    }

    fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<Item> {
        match slot {
            EquipmentSlot::Weapon => &mut self.weapon,
            EquipmentSlot::Defensive => &mut self.defensive,
            EquipmentSlot::Utility => &mut self.utility,
        }
    }

    /// Place `item` in `slot`, returning whatever it displaced
    pub fn put(&mut self, slot: EquipmentSlot, item: Item) -> Option<Item> {
        self.slot_mut(slot).replace(item)
    }

    pub fn take(&mut self, slot: EquipmentSlot) -> Option<Item> {
        self.slot_mut(slot).take()
    }

    pub fn is_empty(&self, slot: EquipmentSlot) -> bool {
        self.get(slot).is_none()
    }

    /// Occupied slots in slot order
    pub fn iter(&self) -> impl Iterator<Item = (EquipmentSlot, &Item)> {
        EquipmentSlot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|item| (slot, item)))
    }
}
