//! Buying and selling against the item catalog.

use super::inventory::{has_item, remove_item};
use super::types::{InventoryError, ItemDefinition};
use crate::character::Character;
use crate::core::constants::{MAX_INVENTORY_SIZE, SELL_PRICE_DIVISOR};

/// What a shop pays for an item: half its cost, rounded down.
pub fn sell_price(item: &ItemDefinition) -> u32 {
    item.cost / SELL_PRICE_DIVISOR
}

/// Debits the item's cost and adds it to the inventory. Returns gold left.
pub fn purchase(character: &mut Character, item: &ItemDefinition) -> Result<u32, InventoryError> {
    if character.gold < item.cost {
        return Err(InventoryError::InsufficientResources {
            available: character.gold,
            required: item.cost,
        });
    }
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(InventoryError::InventoryFull);
    }

    character.gold -= item.cost;
    character.inventory.push(item.id.clone());

    tracing::debug!(item = %item.id, cost = item.cost, gold = character.gold, "Purchased item");
    Ok(character.gold)
}

/// Sells one instance of `item_id`. Returns the price received.
pub fn sell(
    character: &mut Character,
    item_id: &str,
    item: &ItemDefinition,
) -> Result<u32, InventoryError> {
    if !has_item(character, item_id) {
        return Err(InventoryError::ItemNotFound(item_id.to_string()));
    }

    let price = sell_price(item);
    let gold = character
        .gold
        .checked_add(price)
        .ok_or(InventoryError::GoldOverflow)?;
    remove_item(character, item_id)?;
    character.gold = gold;

    tracing::debug!(item = %item_id, price, gold = character.gold, "Sold item");
    Ok(price)
}
