use thiserror::Error;

use crate::core::types::ItemId;
use crate::entity::EquipmentSlot;

#[derive(Error, Debug)]
pub enum BroadsideError {
    #[error("Item not found: {0:?}")]
    ItemNotFound(ItemId),

    #[error("{owner}'s inventory is full ({capacity} items)")]
    InventoryFull { owner: String, capacity: usize },

    #[error("Cannot equip {item} in the {slot:?} slot")]
    IncompatibleSlot { item: String, slot: EquipmentSlot },

    #[error("{0} cannot be equipped")]
    NotEquippable(String),

    #[error("No item equipped in {0:?} slot")]
    SlotEmpty(EquipmentSlot),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerdeError(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BroadsideError>;
