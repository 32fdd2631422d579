//! Weapon and armor slots.
//!
//! Equipping applies the item's effect and stores a snapshot of it in the
//! slot. Unequipping reverses that stored snapshot, so a stat always returns
//! to exactly what it was before, however many level-ups happened in between.

use super::effects::apply_stat_effect;
use super::inventory::{add_item, has_item, remove_item};
use super::types::{EquipmentSlot, InventoryError, ItemDefinition, Stat};
use crate::character::{Character, EquippedItem};
use crate::core::constants::MAX_INVENTORY_SIZE;

/// Moves `item_id` from the inventory into `slot`.
///
/// If the slot is occupied, the old item is unequipped first and goes back to
/// the inventory. That needs a free inventory slot before the new item is
/// taken out, so a full inventory rejects the swap. On any error the
/// character is left exactly as it was.
pub fn equip(
    character: &mut Character,
    slot: EquipmentSlot,
    item_id: &str,
    item: &ItemDefinition,
) -> Result<Option<String>, InventoryError> {
    if !has_item(character, item_id) {
        return Err(InventoryError::ItemNotFound(item_id.to_string()));
    }
    if item.item_type != slot.item_type() {
        return Err(InventoryError::InvalidItemType(format!(
            "{} cannot be equipped as {}",
            item.name,
            slot.name()
        )));
    }
    if item.effect.stat == Stat::Health {
        return Err(InventoryError::InvalidItemType(format!(
            "{} modifies health and cannot be equipped",
            item.name
        )));
    }
    if character.equipped(slot).is_some() && character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(InventoryError::InventoryFull);
    }

    // Stage on a copy so a failing effect can't leave a half-finished swap.
    let mut staged = character.clone();
    let previous = match staged.slot_mut(slot).take() {
        Some(old) => {
            apply_stat_effect(&mut staged, old.effect.inverse())?;
            add_item(&mut staged, &old.item_id)?;
            Some(old.item_id)
        }
        None => None,
    };

    apply_stat_effect(&mut staged, item.effect)?;
    remove_item(&mut staged, item_id)?;
    *staged.slot_mut(slot) = Some(EquippedItem {
        item_id: item_id.to_string(),
        effect: item.effect,
    });

    *character = staged;
    tracing::debug!(slot = slot.name(), item = %item_id, replaced = ?previous, "Equipped item");
    Ok(previous)
}

/// Empties `slot`, reversing its effect and returning the item to the
/// inventory. Returns `Ok(None)` when the slot was already empty.
pub fn unequip(
    character: &mut Character,
    slot: EquipmentSlot,
) -> Result<Option<String>, InventoryError> {
    let Some(current) = character.equipped(slot).cloned() else {
        return Ok(None);
    };
    if character.inventory.len() >= MAX_INVENTORY_SIZE {
        return Err(InventoryError::InventoryFull);
    }

    apply_stat_effect(character, current.effect.inverse())?;
    *character.slot_mut(slot) = None;
    add_item(character, &current.item_id)?;

    tracing::debug!(slot = slot.name(), item = %current.item_id, "Unequipped item");
    Ok(Some(current.item_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::{grant_experience, CharacterClass};
    use crate::items::{ItemEffect, ItemType};

    fn hero() -> Character {
        Character::new("Hero".to_string(), CharacterClass::Warrior)
    }

    fn item(id: &str, item_type: ItemType, stat: Stat, delta: i32) -> ItemDefinition {
        ItemDefinition {
            id: id.to_string(),
            name: id.to_string(),
            item_type,
            effect: ItemEffect::new(stat, delta),
            cost: 50,
            description: String::new(),
        }
    }

    fn sword() -> ItemDefinition {
        item("iron_sword", ItemType::Weapon, Stat::Strength, 5)
    }

    #[test]
    fn test_equip_weapon_applies_effect() {
        let mut c = hero();
        c.inventory.push("iron_sword".to_string());

        assert_eq!(equip(&mut c, EquipmentSlot::Weapon, "iron_sword", &sword()), Ok(None));
        assert_eq!(c.strength, 20);
        assert!(c.inventory.is_empty());
        let equipped = c.equipped(EquipmentSlot::Weapon).unwrap();
        assert_eq!(equipped.item_id, "iron_sword");
        assert_eq!(equipped.effect, ItemEffect::new(Stat::Strength, 5));
    }

    #[test]
    fn test_equip_then_unequip_restores_stats() {
        let mut c = hero();
        let armor = item("leather_armor", ItemType::Armor, Stat::MaxHealth, 10);
        c.inventory.push("leather_armor".to_string());
        let before = c.clone();

        equip(&mut c, EquipmentSlot::Armor, "leather_armor", &armor).unwrap();
        assert_eq!(c.max_health, 130);
        assert_eq!(unequip(&mut c, EquipmentSlot::Armor), Ok(Some("leather_armor".to_string())));
        assert_eq!(c, before);
    }

    #[test]
    fn test_unequip_is_exact_across_level_ups() {
        let mut c = hero();
        c.inventory.push("iron_sword".to_string());
        equip(&mut c, EquipmentSlot::Weapon, "iron_sword", &sword()).unwrap();
        grant_experience(&mut c, 300).unwrap();
        let strength_from_levels = 15 + 2 * 2;

        unequip(&mut c, EquipmentSlot::Weapon).unwrap();
        assert_eq!(c.strength, strength_from_levels);
    }

    #[test]
    fn test_equip_swaps_previous_item_back() {
        let mut c = hero();
        let axe = item("battle_axe", ItemType::Weapon, Stat::Strength, 9);
        c.inventory.push("iron_sword".to_string());
        c.inventory.push("battle_axe".to_string());

        equip(&mut c, EquipmentSlot::Weapon, "iron_sword", &sword()).unwrap();
        let replaced = equip(&mut c, EquipmentSlot::Weapon, "battle_axe", &axe).unwrap();

        assert_eq!(replaced, Some("iron_sword".to_string()));
        assert_eq!(c.strength, 24);
        assert_eq!(c.inventory, vec!["iron_sword"]);
        assert_eq!(c.equipped(EquipmentSlot::Weapon).unwrap().item_id, "battle_axe");
    }

    #[test]
    fn test_equip_swap_with_full_inventory_changes_nothing() {
        let mut c = hero();
        let axe = item("battle_axe", ItemType::Weapon, Stat::Strength, 9);
        c.inventory.push("iron_sword".to_string());
        equip(&mut c, EquipmentSlot::Weapon, "iron_sword", &sword()).unwrap();
        c.inventory.push("battle_axe".to_string());
        while c.inventory.len() < MAX_INVENTORY_SIZE {
            c.inventory.push("rock".to_string());
        }
        let before = c.clone();

        assert_eq!(
            equip(&mut c, EquipmentSlot::Weapon, "battle_axe", &axe),
            Err(InventoryError::InventoryFull)
        );
        assert_eq!(c, before);
    }

    #[test]
    fn test_equip_wrong_type() {
        let mut c = hero();
        c.inventory.push("iron_sword".to_string());
        let before = c.clone();
        assert!(matches!(
            equip(&mut c, EquipmentSlot::Armor, "iron_sword", &sword()),
            Err(InventoryError::InvalidItemType(_))
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn test_equip_missing_item() {
        let mut c = hero();
        assert!(matches!(
            equip(&mut c, EquipmentSlot::Weapon, "iron_sword", &sword()),
            Err(InventoryError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_equip_health_effect_rejected() {
        let mut c = hero();
        let charm = item("vital_mail", ItemType::Armor, Stat::Health, 15);
        c.inventory.push("vital_mail".to_string());
        assert!(matches!(
            equip(&mut c, EquipmentSlot::Armor, "vital_mail", &charm),
            Err(InventoryError::InvalidItemType(_))
        ));
    }

    #[test]
    fn test_unequip_empty_slot() {
        let mut c = hero();
        assert_eq!(unequip(&mut c, EquipmentSlot::Weapon), Ok(None));
    }

    #[test]
    fn test_unequip_full_inventory() {
        let mut c = hero();
        c.inventory.push("iron_sword".to_string());
        equip(&mut c, EquipmentSlot::Weapon, "iron_sword", &sword()).unwrap();
        while c.inventory.len() < MAX_INVENTORY_SIZE {
            c.inventory.push("rock".to_string());
        }
        let before = c.clone();
        assert_eq!(unequip(&mut c, EquipmentSlot::Weapon), Err(InventoryError::InventoryFull));
        assert_eq!(c, before);
    }
}
