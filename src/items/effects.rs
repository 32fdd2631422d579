//! Parsing and applying `stat:delta` item effects.

use super::types::{InventoryError, ItemEffect, Stat};
use crate::character::Character;

/// Parses an effect string such as `"strength:5"` or `"max_health:-10"`.
pub fn parse_item_effect(effect: &str) -> Result<ItemEffect, InventoryError> {
    let malformed =
        || InventoryError::InvalidEffect(format!("Invalid effect format: {}", effect));

    let (stat, value) = effect.split_once(':').ok_or_else(malformed)?;
    if value.contains(':') {
        return Err(malformed());
    }

    let stat: Stat = stat.parse()?;
    let delta: i32 = value.trim().parse().map_err(|_| malformed())?;
    Ok(ItemEffect::new(stat, delta))
}

/// The value `effect` would leave its stat at, or an error if the result is
/// out of range. Health is clamped instead of rejected.
fn resulting_value(character: &Character, effect: ItemEffect) -> Result<i32, InventoryError> {
    let out_of_range = || {
        InventoryError::InvalidEffect(format!(
            "{} would leave {} out of range",
            effect,
            effect.stat.as_str()
        ))
    };

    let current = match effect.stat {
        Stat::Health => character.health,
        Stat::MaxHealth => character.max_health,
        Stat::Strength => character.strength,
        Stat::Magic => character.magic,
    };
    let next = current.checked_add(effect.delta).ok_or_else(out_of_range)?;

    match effect.stat {
        Stat::Health => Ok(next.clamp(0, character.max_health)),
        Stat::MaxHealth if next < 1 => Err(out_of_range()),
        Stat::Strength | Stat::Magic if next < 0 => Err(out_of_range()),
        _ => Ok(next),
    }
}

/// Applies an effect to the character.
///
/// Health stays within `[0, max_health]`; lowering max health pulls health
/// down with it. Fails without mutation when strength or magic would go
/// negative or max health would drop below 1.
pub fn apply_stat_effect(
    character: &mut Character,
    effect: ItemEffect,
) -> Result<(), InventoryError> {
    let next = resulting_value(character, effect)?;

    match effect.stat {
        Stat::Health => character.health = next,
        Stat::MaxHealth => {
            character.max_health = next;
            character.health = character.health.min(next);
        }
        Stat::Strength => character.strength = next,
        Stat::Magic => character.magic = next,
    }
    Ok(())
}
