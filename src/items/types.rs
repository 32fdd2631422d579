use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised by the inventory, equipment and shop operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    #[error("Inventory is full")]
    InventoryFull,

    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Not enough gold: have {available}, need {required}")]
    InsufficientResources { available: u32, required: u32 },

    #[error("Invalid item type: {0}")]
    InvalidItemType(String),

    #[error("Invalid item effect: {0}")]
    InvalidEffect(String),

    #[error("Gold would overflow")]
    GoldOverflow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    Weapon,
    Armor,
    Consumable,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Weapon => "weapon",
            ItemType::Armor => "armor",
            ItemType::Consumable => "consumable",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weapon" => Ok(ItemType::Weapon),
            "armor" => Ok(ItemType::Armor),
            "consumable" => Ok(ItemType::Consumable),
            other => Err(InventoryError::InvalidItemType(other.to_string())),
        }
    }
}

/// Character stats an item effect may modify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    Health,
    MaxHealth,
    Strength,
    Magic,
}

impl Stat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stat::Health => "health",
            Stat::MaxHealth => "max_health",
            Stat::Strength => "strength",
            Stat::Magic => "magic",
        }
    }
}

impl FromStr for Stat {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "health" => Ok(Stat::Health),
            "max_health" => Ok(Stat::MaxHealth),
            "strength" => Ok(Stat::Strength),
            "magic" => Ok(Stat::Magic),
            other => Err(InventoryError::InvalidEffect(format!("Invalid stat: {}", other))),
        }
    }
}

/// A single `stat:delta` modifier. Displays in the same form it parses from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemEffect {
    pub stat: Stat,
    pub delta: i32,
}

impl ItemEffect {
    pub fn new(stat: Stat, delta: i32) -> Self {
        Self { stat, delta }
    }

    /// The effect that undoes this one.
    pub fn inverse(&self) -> Self {
        Self {
            stat: self.stat,
            delta: -self.delta,
        }
    }
}

impl fmt::Display for ItemEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.stat.as_str(), self.delta)
    }
}

impl FromStr for ItemEffect {
    type Err = InventoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        super::effects::parse_item_effect(s)
    }
}

/// Catalog entry for an item. Inventories only hold the `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub id: String,
    pub name: String,
    pub item_type: ItemType,
    pub effect: ItemEffect,
    pub cost: u32,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquipmentSlot {
    Weapon,
    Armor,
}

impl EquipmentSlot {
    pub const ALL: [EquipmentSlot; 2] = [EquipmentSlot::Weapon, EquipmentSlot::Armor];

    /// Item type accepted by this slot.
    pub fn item_type(&self) -> ItemType {
        match self {
            EquipmentSlot::Weapon => ItemType::Weapon,
            EquipmentSlot::Armor => ItemType::Armor,
        }
    }

    pub fn for_item_type(item_type: ItemType) -> Option<EquipmentSlot> {
        match item_type {
            ItemType::Weapon => Some(EquipmentSlot::Weapon),
            ItemType::Armor => Some(EquipmentSlot::Armor),
            ItemType::Consumable => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EquipmentSlot::Weapon => "weapon",
            EquipmentSlot::Armor => "armor",
        }
    }
}
