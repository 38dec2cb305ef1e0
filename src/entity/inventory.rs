//! Inventory and equip operations on a character
//!
//! Carrying an item unlocks its strategy; equipping moves it out of the
//! inventory and displaced items move back in.

use crate::core::error::{BroadsideError, Result};
use crate::core::types::ItemId;
use crate::entity::character::Character;
use crate::entity::equipment::EquipmentSlot;
use crate::items::Item;

impl Character {
    pub fn inventory_full(&self) -> bool {
        self.inventory.len() >= self.inventory_capacity
    }

    pub fn add_item(&mut self, mut item: Item) -> Result<()> {
        if self.inventory_full() {
            return Err(BroadsideError::InventoryFull {
                owner: self.name.clone(),
                capacity: self.inventory_capacity,
            });
        }
        if let Some(strategy) = item.unlocks() {
            self.unlock(strategy);
        }
        item.position = None;
        self.inventory.push(item);
        Ok(())
    }

    pub fn remove_item(&mut self, id: ItemId) -> Result<Item> {
        let index = self
            .inventory
            .iter()
            .position(|i| i.id == id)
            .ok_or(BroadsideError::ItemNotFound(id))?;
        Ok(self.inventory.remove(index))
    }

    /// Case-insensitive
    pub fn remove_item_by_name(&mut self, name: &str) -> Option<Item> {
        let index = self
            .inventory
            .iter()
            .position(|i| i.name.eq_ignore_ascii_case(name))?;
        Some(self.inventory.remove(index))
    }

    pub fn find_item(&self, id: ItemId) -> Option<&Item> {
        self.inventory.iter().find(|i| i.id == id)
    }

    pub fn weapons(&self) -> impl Iterator<Item = &Item> {
        self.inventory.iter().filter(|i| i.is_weapon())
    }

    pub fn relics(&self) -> impl Iterator<Item = &Item> {
        self.inventory.iter().filter(|i| i.is_relic())
    }

    /// Equip an inventory item into the slot its kind selects
    pub fn equip(&mut self, id: ItemId) -> Result<EquipmentSlot> {
        let item = self.find_item(id).ok_or(BroadsideError::ItemNotFound(id))?;
        let slot = EquipmentSlot::for_item(item)
            .ok_or_else(|| BroadsideError::NotEquippable(item.name.clone()))?;
        self.equip_to(slot, id)?;
        Ok(slot)
    }

    /// Equip an inventory item into a chosen slot
    pub fn equip_to(&mut self, slot: EquipmentSlot, id: ItemId) -> Result<()> {
        let item = self.find_item(id).ok_or(BroadsideError::ItemNotFound(id))?;
        if !slot.accepts(item) {
            return Err(BroadsideError::IncompatibleSlot {
                item: item.name.clone(),
                slot,
            });
        }
        let item = self.remove_item(id)?;
        tracing::debug!(character = %self.name, item = %item.name, ?slot, "equipped");
        if let Some(displaced) = self.equipment.put(slot, item) {
            // Room was freed by the removal above
            self.inventory.push(displaced);
        }
        Ok(())
    }

    /// Move the item in `slot` back to the inventory
    pub fn unequip(&mut self, slot: EquipmentSlot) -> Result<Item> {
        if self.equipment.is_empty(slot) {
            return Err(BroadsideError::SlotEmpty(slot));
        }
        if self.inventory_full() {
            return Err(BroadsideError::InventoryFull {
                owner: self.name.clone(),
                capacity: self.inventory_capacity,
            });
        }
        let item = self
            .equipment
            .take(slot)
            .ok_or(BroadsideError::SlotEmpty(slot))?;
        self.inventory.push(item.clone());
        Ok(item)
    }
}
