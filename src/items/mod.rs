//! Item system: definitions, effects, inventory, equipment and the shop.

pub mod effects;
pub mod equipment;
pub mod inventory;
pub mod shop;
pub mod types;

pub use crate::core::constants::MAX_INVENTORY_SIZE;
pub use effects::*;
pub use equipment::*;
pub use inventory::*;
pub use shop::*;
pub use types::*;
