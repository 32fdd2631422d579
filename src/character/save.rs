//! Plain-text character save files.
//!
//! File format, one attribute per line:
//! ```text
//! NAME: Aiden
//! CLASS: Warrior
//! LEVEL: 2
//! ...
//! INVENTORY: health_potion,health_potion,iron_sword
//! EQUIPPED_WEAPON: iron_sword|strength:5
//! ```
//! List fields are comma-joined with an empty value for an empty list.
//! Equipped slots hold `item_id|stat:delta` or nothing.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use thiserror::Error;

use super::types::{validate_name, Character, CharacterClass, CharacterError, EquippedItem};
use crate::core::constants::{MAX_INVENTORY_SIZE, SAVE_DIR_NAME, SAVE_FILE_SUFFIX};
use crate::items::parse_item_effect;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("No save file found for: {0}")]
    CharacterNotFound(String),

    #[error("Save file corrupted: {0}")]
    SaveCorrupted(String),

    #[error("Invalid save data: {0}")]
    InvalidSaveData(String),

    #[error("Invalid character name: {0}")]
    InvalidName(String),

    #[error("Save I/O failed: {0}")]
    Io(#[from] io::Error),
}

const REQUIRED_KEYS: [&str; 12] = [
    "NAME",
    "CLASS",
    "LEVEL",
    "HEALTH",
    "MAX_HEALTH",
    "STRENGTH",
    "MAGIC",
    "EXPERIENCE",
    "GOLD",
    "INVENTORY",
    "ACTIVE_QUESTS",
    "COMPLETED_QUESTS",
];

/// Serializes a character into the `KEY: value` save format.
pub fn encode_character(character: &Character) -> String {
    let lines = [
        ("NAME", character.name().to_string()),
        ("CLASS", character.class.name().to_string()),
        ("LEVEL", character.level.to_string()),
        ("HEALTH", character.health.to_string()),
        ("MAX_HEALTH", character.max_health.to_string()),
        ("STRENGTH", character.strength.to_string()),
        ("MAGIC", character.magic.to_string()),
        ("EXPERIENCE", character.experience.to_string()),
        ("GOLD", character.gold.to_string()),
        ("INVENTORY", character.inventory.join(",")),
        ("ACTIVE_QUESTS", character.active_quests.join(",")),
        ("COMPLETED_QUESTS", character.completed_quests.join(",")),
        ("EQUIPPED_WEAPON", encode_equipped(&character.equipped_weapon)),
        ("EQUIPPED_ARMOR", encode_equipped(&character.equipped_armor)),
    ];

    let mut out = String::new();
    for (key, value) in lines {
        out.push_str(key);
        out.push_str(": ");
        out.push_str(&value);
        out.push('\n');
    }
    out
}

fn encode_equipped(slot: &Option<EquippedItem>) -> String {
    match slot {
        Some(item) => format!("{}|{}", item.item_id, item.effect),
        None => String::new(),
    }
}

/// Parses a save file body. Lines without a colon and unknown keys are
/// skipped; missing keys, bad numbers and broken invariants are rejected.
pub fn decode_character(text: &str) -> Result<Character, SaveError> {
    let mut fields: Vec<(String, String)> = Vec::new();
    for line in text.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        fields.push((key.trim().to_uppercase(), value.trim().to_string()));
    }

    let get = |key: &str| field(&fields, key);

    for key in REQUIRED_KEYS {
        get(key)?;
    }

    let class: CharacterClass = get("CLASS")?
        .parse()
        .map_err(|e| SaveError::InvalidSaveData(format!("{}", e)))?;

    let equipped = |key: &str| match field(&fields, key) {
        Ok(value) if !value.is_empty() => decode_equipped(key, value).map(Some),
        _ => Ok(None),
    };

    let character = Character {
        name: get("NAME")?.to_string(),
        class,
        level: parse_number(get("LEVEL")?, "LEVEL")?,
        health: parse_number(get("HEALTH")?, "HEALTH")?,
        max_health: parse_number(get("MAX_HEALTH")?, "MAX_HEALTH")?,
        strength: parse_number(get("STRENGTH")?, "STRENGTH")?,
        magic: parse_number(get("MAGIC")?, "MAGIC")?,
        experience: parse_number(get("EXPERIENCE")?, "EXPERIENCE")?,
        gold: parse_number(get("GOLD")?, "GOLD")?,
        inventory: split_list(get("INVENTORY")?),
        equipped_weapon: equipped("EQUIPPED_WEAPON")?,
        equipped_armor: equipped("EQUIPPED_ARMOR")?,
        active_quests: split_list(get("ACTIVE_QUESTS")?),
        completed_quests: split_list(get("COMPLETED_QUESTS")?),
    };

    validate_character_data(&character)?;
    Ok(character)
}

/// Last value written for `key`; later lines win over earlier ones.
fn field<'a>(fields: &'a [(String, String)], key: &str) -> Result<&'a str, SaveError> {
    fields
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
        .ok_or_else(|| SaveError::InvalidSaveData(format!("Missing field: {}", key)))
}

fn parse_number<T: std::str::FromStr>(value: &str, key: &str) -> Result<T, SaveError> {
    value
        .parse()
        .map_err(|_| SaveError::InvalidSaveData(format!("Invalid numeric field: {}", key)))
}

fn split_list(value: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    value.split(',').map(|s| s.trim().to_string()).collect()
}

fn decode_equipped(key: &str, value: &str) -> Result<EquippedItem, SaveError> {
    let (item_id, effect) = value
        .split_once('|')
        .ok_or_else(|| SaveError::InvalidSaveData(format!("Invalid equipment field: {}", key)))?;
    let effect = parse_item_effect(effect)
        .map_err(|e| SaveError::InvalidSaveData(format!("{}: {}", key, e)))?;
    Ok(EquippedItem {
        item_id: item_id.trim().to_string(),
        effect,
    })
}

fn invalid(msg: &str) -> SaveError {
    SaveError::InvalidSaveData(msg.to_string())
}

/// The name doubles as the save filename, so it must pass [`validate_name`]
/// exactly as stored, with no surrounding whitespace.
fn check_name(name: &str) -> Result<(), SaveError> {
    validate_name(name).map_err(|e| match e {
        CharacterError::InvalidName(msg) => SaveError::InvalidName(msg),
        other => SaveError::InvalidName(other.to_string()),
    })?;
    if name.trim() != name {
        return Err(SaveError::InvalidName(
            "Name cannot start or end with whitespace".to_string(),
        ));
    }
    Ok(())
}

/// Checks the record invariants the engine relies on.
pub fn validate_character_data(character: &Character) -> Result<(), SaveError> {
    check_name(character.name())?;
    if character.level < 1 {
        return Err(invalid("Level must be at least 1"));
    }
    if character.max_health < 1 || character.health < 0 || character.health > character.max_health
    {
        return Err(invalid("Health out of range"));
    }
    if character.strength < 0 || character.magic < 0 {
        return Err(invalid("Negative stat"));
    }
    if character.experience >= character.xp_to_next_level() {
        return Err(invalid("Experience exceeds level threshold"));
    }
    if character.inventory.len() > MAX_INVENTORY_SIZE {
        return Err(invalid("Inventory exceeds capacity"));
    }
    if character
        .active_quests
        .iter()
        .any(|q| character.has_completed_quest(q))
    {
        return Err(invalid("Quest both active and completed"));
    }
    Ok(())
}

/// Manages character save files in a single directory.
pub struct CharacterStore {
    save_dir: PathBuf,
}

impl CharacterStore {
    /// Uses the platform data directory (via `directories`) plus `save_games/`.
    pub fn new() -> Result<Self, SaveError> {
        let project_dirs = ProjectDirs::from("", "", "quest-chronicles").ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine data directory",
            )
        })?;

        Self::with_dir(project_dirs.data_dir().join(SAVE_DIR_NAME))
    }

    pub fn with_dir(save_dir: impl Into<PathBuf>) -> Result<Self, SaveError> {
        let save_dir = save_dir.into();
        fs::create_dir_all(&save_dir)?;
        Ok(Self { save_dir })
    }

    pub fn save_dir(&self) -> &Path {
        &self.save_dir
    }

    fn path_for(&self, name: &str) -> Result<PathBuf, SaveError> {
        check_name(name)?;
        Ok(self.save_dir.join(format!("{}{}", name, SAVE_FILE_SUFFIX)))
    }

    pub fn save(&self, character: &Character) -> Result<PathBuf, SaveError> {
        let path = self.path_for(character.name())?;
        fs::write(&path, encode_character(character))?;
        tracing::debug!(path = %path.display(), "Character saved");
        Ok(path)
    }

    pub fn load(&self, name: &str) -> Result<Character, SaveError> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(SaveError::CharacterNotFound(name.to_string()));
        }

        let text = fs::read_to_string(&path)
            .map_err(|e| SaveError::SaveCorrupted(format!("Could not read save file: {}", e)))?;

        decode_character(&text)
    }

    /// False for names that could never have been saved.
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).is_ok_and(|path| path.is_file())
    }

    /// Names of every saved character, sorted.
    pub fn list(&self) -> Result<Vec<String>, SaveError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.save_dir)? {
            let entry = entry?;
            let filename = entry.file_name();
            let Some(filename) = filename.to_str() else {
                continue;
            };
            if let Some(name) = filename.strip_suffix(SAVE_FILE_SUFFIX) {
                names.push(name.to_string());
            }
        }
        names.sort();
        Ok(names)
    }

    pub fn delete(&self, name: &str) -> Result<(), SaveError> {
        let path = self.path_for(name)?;
        if !path.is_file() {
            return Err(SaveError::CharacterNotFound(name.to_string()));
        }
        fs::remove_file(path)?;
        Ok(())
    }
}
