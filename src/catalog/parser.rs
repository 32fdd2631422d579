use std::fs;
use std::io;
use std::path::Path;

use super::{Catalog, CatalogError, ItemCatalog, QuestCatalog};
use crate::core::constants::NO_PREREQUISITE;
use crate::items::{parse_item_effect, ItemDefinition, ItemType};
use crate::quests::QuestDefinition;

const QUEST_KEYS: [&str; 7] = [
    "quest_id",
    "title",
    "description",
    "reward_xp",
    "reward_gold",
    "required_level",
    "prerequisite",
];

const ITEM_KEYS: [&str; 6] = ["item_id", "name", "type", "effect", "cost", "description"];

type Block<'a> = Vec<(String, &'a str)>;

fn invalid(msg: impl Into<String>) -> CatalogError {
    CatalogError::InvalidDataFormat(msg.into())
}

/// Splits text into blank-line separated blocks of lowercase-key/value pairs.
fn split_blocks<'a>(text: &'a str, known_keys: &[&str]) -> Result<Vec<Block<'a>>, CatalogError> {
    let mut blocks = Vec::new();
    let mut current: Block<'a> = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            continue;
        }

        let (key, value) = line
            .split_once(':')
            .ok_or_else(|| invalid(format!("Invalid line: {}", line)))?;
        let key = key.trim().to_lowercase();
        if !known_keys.contains(&key.as_str()) {
            return Err(invalid(format!("Unknown key: {}", key)));
        }
        current.push((key, value.trim()));
    }

    if !current.is_empty() {
        blocks.push(current);
    }
    Ok(blocks)
}

fn require<'a>(block: &Block<'a>, key: &str) -> Result<&'a str, CatalogError> {
    block
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| *v)
        .ok_or_else(|| invalid(format!("Missing field: {}", key)))
}

fn require_number(block: &Block<'_>, key: &str) -> Result<u32, CatalogError> {
    require(block, key)?
        .parse()
        .map_err(|_| invalid(format!("{} must be a non-negative integer", key)))
}

fn parse_quest_block(block: &Block<'_>) -> Result<QuestDefinition, CatalogError> {
    let id = require(block, "quest_id")?;
    if id.is_empty() {
        return Err(invalid("Empty quest_id"));
    }

    let required_level = require_number(block, "required_level")?;
    if required_level < 1 {
        return Err(invalid(format!("Quest {} requires level 0", id)));
    }

    let prerequisite = match require(block, "prerequisite")? {
        p if p.eq_ignore_ascii_case(NO_PREREQUISITE) || p.is_empty() => None,
        p => Some(p.to_string()),
    };

    Ok(QuestDefinition {
        id: id.to_string(),
        title: require(block, "title")?.to_string(),
        description: require(block, "description")?.to_string(),
        reward_xp: require_number(block, "reward_xp")?,
        reward_gold: require_number(block, "reward_gold")?,
        required_level,
        prerequisite,
    })
}

fn parse_item_block(block: &Block<'_>) -> Result<ItemDefinition, CatalogError> {
    let id = require(block, "item_id")?;
    if id.is_empty() {
        return Err(invalid("Empty item_id"));
    }

    let item_type: ItemType = require(block, "type")?
        .parse()
        .map_err(|e| invalid(format!("{}", e)))?;
    let effect =
        parse_item_effect(require(block, "effect")?).map_err(|e| invalid(format!("{}", e)))?;

    Ok(ItemDefinition {
        id: id.to_string(),
        name: require(block, "name")?.to_string(),
        item_type,
        effect,
        cost: require_number(block, "cost")?,
        description: require(block, "description")?.to_string(),
    })
}

pub fn parse_quests(text: &str) -> Result<QuestCatalog, CatalogError> {
    let quests = split_blocks(text, &QUEST_KEYS)?
        .iter()
        .map(parse_quest_block)
        .collect::<Result<Vec<_>, _>>()?;
    Catalog::from_entries(quests)
}

pub fn parse_items(text: &str) -> Result<ItemCatalog, CatalogError> {
    let items = split_blocks(text, &ITEM_KEYS)?
        .iter()
        .map(parse_item_block)
        .collect::<Result<Vec<_>, _>>()?;
    Catalog::from_entries(items)
}

pub fn serialize_quests(quests: &QuestCatalog) -> String {
    let mut out = String::new();
    for quest in quests.iter() {
        out.push_str(&format!("QUEST_ID: {}\n", quest.id));
        out.push_str(&format!("TITLE: {}\n", quest.title));
        out.push_str(&format!("DESCRIPTION: {}\n", quest.description));
        out.push_str(&format!("REWARD_XP: {}\n", quest.reward_xp));
        out.push_str(&format!("REWARD_GOLD: {}\n", quest.reward_gold));
        out.push_str(&format!("REQUIRED_LEVEL: {}\n", quest.required_level));
        out.push_str(&format!(
            "PREREQUISITE: {}\n\n",
            quest.prerequisite.as_deref().unwrap_or(NO_PREREQUISITE)
        ));
    }
    out
}

pub fn serialize_items(items: &ItemCatalog) -> String {
    let mut out = String::new();
    for item in items.iter() {
        out.push_str(&format!("ITEM_ID: {}\n", item.id));
        out.push_str(&format!("NAME: {}\n", item.name));
        out.push_str(&format!("TYPE: {}\n", item.item_type));
        out.push_str(&format!("EFFECT: {}\n", item.effect));
        out.push_str(&format!("COST: {}\n", item.cost));
        out.push_str(&format!("DESCRIPTION: {}\n\n", item.description));
    }
    out
}

fn read_data_file(path: &Path) -> Result<String, CatalogError> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => CatalogError::MissingDataFile(path.to_path_buf()),
        _ => CatalogError::CorruptedData(format!("{}: {}", path.display(), e)),
    })
}

pub fn load_quests(path: &Path) -> Result<QuestCatalog, CatalogError> {
    let quests = parse_quests(&read_data_file(path)?)?;
    tracing::debug!(path = %path.display(), count = quests.len(), "Loaded quests");
    Ok(quests)
}

pub fn load_items(path: &Path) -> Result<ItemCatalog, CatalogError> {
    let items = parse_items(&read_data_file(path)?)?;
    tracing::debug!(path = %path.display(), count = items.len(), "Loaded items");
    Ok(items)
}
