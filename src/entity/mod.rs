//! Entities: characters and the ships that own them

pub mod character;
pub mod equipment;
pub mod inventory;
pub mod ship;

pub use character::{Character, CharacterKind};
pub use equipment::{Equipment, EquipmentSlot};
pub use ship::{Ship, ShipClass};
