//! Capacity-bounded item collection and consumable use.

use super::effects::apply_stat_effect;
use super::types::{InventoryError, ItemDefinition, ItemType};
use crate::catalog::Catalog;
use crate::character::Character;
use crate::core::constants::MAX_INVENTORY_SIZE;

/// One line of a grouped inventory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryEntry {
    pub item_id: String,
    /// Display name from the catalog, `None` for ids the catalog doesn't know.
    pub name: Option<String>,
    pub count: usize,
}

pub fn add_item(character: &mut Character, item_id: &str) -> Result<(), InventoryError> {
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(InventoryError::InventoryFull);
    }
    character.inventory.push(item_id.to_string());
    Ok(())
}

/// Removes a single instance of `item_id`.
pub fn remove_item(character: &mut Character, item_id: &str) -> Result<(), InventoryError> {
    let index = character
        .inventory
        .iter()
        .position(|id| id == item_id)
        .ok_or_else(|| InventoryError::ItemNotFound(item_id.to_string()))?;
    character.inventory.remove(index);
    Ok(())
}

pub fn has_item(character: &Character, item_id: &str) -> bool {
    character.inventory.iter().any(|id| id == item_id)
}

pub fn count_item(character: &Character, item_id: &str) -> usize {
    character.inventory.iter().filter(|id| *id == item_id).count()
}

pub fn inventory_space_remaining(character: &Character) -> usize {
    MAX_INVENTORY_SIZE.saturating_sub(character.inventory.len())
}

/// Empties the inventory and returns what was in it.
pub fn clear_inventory(character: &mut Character) -> Vec<String> {
    std::mem::take(&mut character.inventory)
}

/// Groups the inventory by item id, in first-seen order.
pub fn inventory_summary(
    character: &Character,
    items: &Catalog<ItemDefinition>,
) -> Vec<InventoryEntry> {
    let mut entries: Vec<InventoryEntry> = Vec::new();
    for item_id in &character.inventory {
        match entries.iter_mut().find(|e| &e.item_id == item_id) {
            Some(entry) => entry.count += 1,
            None => entries.push(InventoryEntry {
                item_id: item_id.clone(),
                name: items.get(item_id).map(|def| def.name.clone()),
                count: 1,
            }),
        }
    }
    entries
}

/// Consumes one instance of a consumable and applies its effect.
pub fn use_item(
    character: &mut Character,
    item_id: &str,
    item: &ItemDefinition,
) -> Result<(), InventoryError> {
    if !has_item(character, item_id) {
        return Err(InventoryError::ItemNotFound(item_id.to_string()));
    }
    if item.item_type != ItemType::Consumable {
        return Err(InventoryError::InvalidItemType(format!(
            "{} is not consumable",
            item.name
        )));
    }

    apply_stat_effect(character, item.effect)?;
    remove_item(character, item_id)?;

    tracing::debug!(item = %item_id, effect = %item.effect, "Used item");
    Ok(())
}
