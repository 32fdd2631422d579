use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::constants::*;
use crate::items::{EquipmentSlot, ItemEffect};

/// Errors raised by character creation and the progression engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CharacterError {
    #[error("Invalid class: {0}")]
    InvalidCharacterClass(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("Character is dead")]
    CharacterDead,

    #[error("Character is not dead")]
    CharacterAlive,

    #[error("Not enough gold: have {available}, need {required}")]
    InsufficientGold { available: u32, required: u64 },

    #[error("{0} would overflow")]
    ValueOverflow(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Warrior,
    Mage,
    Rogue,
    Cleric,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Warrior,
        CharacterClass::Mage,
        CharacterClass::Rogue,
        CharacterClass::Cleric,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Warrior => "Warrior",
            CharacterClass::Mage => "Mage",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Cleric => "Cleric",
        }
    }

    /// Starting (health, strength, magic) for a fresh level 1 character.
    pub fn base_stats(&self) -> (i32, i32, i32) {
        match self {
            CharacterClass::Warrior => WARRIOR_BASE_STATS,
            CharacterClass::Mage => MAGE_BASE_STATS,
            CharacterClass::Rogue => ROGUE_BASE_STATS,
            CharacterClass::Cleric => CLERIC_BASE_STATS,
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharacterClass {
    type Err = CharacterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        CharacterClass::ALL
            .into_iter()
            .find(|class| class.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CharacterError::InvalidCharacterClass(trimmed.to_string()))
    }
}

/// An item sitting in an equipment slot, with the effect that was applied
/// when it went in. Unequipping reverses this snapshot, not the catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquippedItem {
    pub item_id: String,
    pub effect: ItemEffect,
}

/// The persistent player record. Every engine operation takes it by `&mut`
/// and either commits a full change or leaves it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    pub(super) name: String,
    pub class: CharacterClass,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub strength: i32,
    pub magic: i32,
    pub experience: u64,
    pub gold: u32,
    pub inventory: Vec<String>,
    #[serde(default)]
    pub equipped_weapon: Option<EquippedItem>,
    #[serde(default)]
    pub equipped_armor: Option<EquippedItem>,
    pub active_quests: Vec<String>,
    pub completed_quests: Vec<String>,
}

impl Character {
    /// Builds a level 1 character with class base stats. Use
    /// [`create_character`] for input coming from a player.
    pub fn new(name: String, class: CharacterClass) -> Self {
        let (health, strength, magic) = class.base_stats();
        Self {
            name,
            class,
            level: STARTING_LEVEL,
            health,
            max_health: health,
            strength,
            magic,
            experience: 0,
            gold: STARTING_GOLD,
            inventory: Vec::new(),
            equipped_weapon: None,
            equipped_armor: None,
            active_quests: Vec::new(),
            completed_quests: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Experience needed to reach the next level from the start of this one.
    pub fn xp_to_next_level(&self) -> u64 {
        u64::from(self.level) * XP_PER_LEVEL
    }

    pub fn equipped(&self, slot: EquipmentSlot) -> Option<&EquippedItem> {
        match slot {
            EquipmentSlot::Weapon => self.equipped_weapon.as_ref(),
            EquipmentSlot::Armor => self.equipped_armor.as_ref(),
        }
    }

    pub(crate) fn slot_mut(&mut self, slot: EquipmentSlot) -> &mut Option<EquippedItem> {
        match slot {
            EquipmentSlot::Weapon => &mut self.equipped_weapon,
            EquipmentSlot::Armor => &mut self.equipped_armor,
        }
    }

    pub fn has_active_quest(&self, quest_id: &str) -> bool {
        self.active_quests.iter().any(|q| q == quest_id)
    }

    pub fn has_completed_quest(&self, quest_id: &str) -> bool {
        self.completed_quests.iter().any(|q| q == quest_id)
    }
}

/// Creates a new character from player input.
///
/// The class is matched case-insensitively. The name is trimmed and must pass
/// [`validate_name`], since it later becomes part of the save filename.
pub fn create_character(name: &str, class: &str) -> Result<Character, CharacterError> {
    let class: CharacterClass = class.parse()?;
    validate_name(name)?;
    Ok(Character::new(name.trim().to_string(), class))
}

pub fn validate_name(name: &str) -> Result<(), CharacterError> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(CharacterError::InvalidName(
            "Name cannot be empty".to_string(),
        ));
    }

    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CharacterError::InvalidName(format!(
            "Name must be {} characters or less",
            MAX_NAME_LENGTH
        )));
    }

    let valid_chars = trimmed
        .chars()
        .all(|c| c.is_alphanumeric() || c == ' ' || c == '-' || c == '_');

    if !valid_chars {
        return Err(CharacterError::InvalidName(
            "Name can only contain letters, numbers, spaces, hyphens, and underscores".to_string(),
        ));
    }

    Ok(())
}
