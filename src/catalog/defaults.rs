use std::fs;
use std::path::Path;

use super::parser::{load_items, load_quests, parse_items, parse_quests};
use super::{CatalogError, ItemCatalog, QuestCatalog};
use crate::core::constants::{ITEM_DATA_FILE, QUEST_DATA_FILE};

pub const DEFAULT_QUESTS: &str = "\
QUEST_ID: first_quest
TITLE: First Steps
DESCRIPTION: Complete your first quest.
REWARD_XP: 50
REWARD_GOLD: 25
REQUIRED_LEVEL: 1
PREREQUISITE: NONE

QUEST_ID: slay_goblin
TITLE: Slay a Goblin
DESCRIPTION: Defeat a goblin in battle.
REWARD_XP: 75
REWARD_GOLD: 40
REQUIRED_LEVEL: 1
PREREQUISITE: first_quest
";

pub const DEFAULT_ITEMS: &str = "\
ITEM_ID: health_potion
NAME: Health Potion
TYPE: consumable
EFFECT: health:20
COST: 25
DESCRIPTION: Restores 20 HP.

ITEM_ID: iron_sword
NAME: Iron Sword
TYPE: weapon
EFFECT: strength:5
COST: 50
DESCRIPTION: A basic iron sword.

ITEM_ID: leather_armor
NAME: Leather Armor
TYPE: armor
EFFECT: max_health:10
COST: 40
DESCRIPTION: Light armor offering modest protection.
";

/// The built-in quest set, used when no quest file exists yet.
pub fn default_quests() -> QuestCatalog {
    parse_quests(DEFAULT_QUESTS).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Built-in quest catalog is malformed");
        QuestCatalog::default()
    })
}

/// The built-in item set, used when no item file exists yet.
pub fn default_items() -> ItemCatalog {
    parse_items(DEFAULT_ITEMS).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Built-in item catalog is malformed");
        ItemCatalog::default()
    })
}

/// Writes the default catalogs into `dir`, leaving existing files alone.
pub fn write_default_data_files(dir: &Path) -> Result<(), CatalogError> {
    let io_err = |e: std::io::Error| CatalogError::CorruptedData(format!("{}: {}", dir.display(), e));

    fs::create_dir_all(dir).map_err(io_err)?;
    for (file, contents) in [(QUEST_DATA_FILE, DEFAULT_QUESTS), (ITEM_DATA_FILE, DEFAULT_ITEMS)] {
        let path = dir.join(file);
        if !path.exists() {
            fs::write(&path, contents).map_err(io_err)?;
            tracing::info!(path = %path.display(), "Created default data file");
        }
    }
    Ok(())
}

/// Loads both catalogs from `dir`, creating any missing file from the
/// defaults first. A file that exists but fails to parse is an error.
pub fn load_or_create_defaults(dir: &Path) -> Result<(QuestCatalog, ItemCatalog), CatalogError> {
    write_default_data_files(dir)?;
    let quests = load_quests(&dir.join(QUEST_DATA_FILE))?;
    let items = load_items(&dir.join(ITEM_DATA_FILE))?;
    Ok((quests, items))
}
