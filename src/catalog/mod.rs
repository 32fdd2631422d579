//! Quest and item catalogs.
//!
//! Catalog files are blocks of `KEY: value` lines separated by blank lines.
//! Records are validated once here, so the engine can trust every
//! definition it is handed.

mod defaults;
mod parser;

use std::collections::HashMap;
use std::path::PathBuf;

use thiserror::Error;

use crate::items::ItemDefinition;
use crate::quests::QuestDefinition;

pub use defaults::*;
pub use parser::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Data file not found: {}", .0.display())]
    MissingDataFile(PathBuf),

    #[error("Unable to read data file: {0}")]
    CorruptedData(String),

    #[error("Invalid data format: {0}")]
    InvalidDataFormat(String),
}

/// Anything stored in a [`Catalog`] is looked up by a unique id.
pub trait CatalogEntry {
    fn id(&self) -> &str;
}

impl CatalogEntry for QuestDefinition {
    fn id(&self) -> &str {
        &self.id
    }
}

impl CatalogEntry for ItemDefinition {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Immutable-once-loaded set of definitions, kept in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog<T> {
    entries: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T: CatalogEntry> Catalog<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    pub fn from_entries(entries: Vec<T>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for entry in entries {
            catalog.insert(entry)?;
        }
        Ok(catalog)
    }

    fn insert(&mut self, entry: T) -> Result<(), CatalogError> {
        if self.index.contains_key(entry.id()) {
            return Err(CatalogError::InvalidDataFormat(format!(
                "Duplicate id: {}",
                entry.id()
            )));
        }
        self.index.insert(entry.id().to_string(), self.entries.len());
        self.entries.push(entry);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.index.get(id).map(|&i| &self.entries[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T: CatalogEntry> Default for Catalog<T> {
    fn default() -> Self {
        Self::new()
    }
}

pub type QuestCatalog = Catalog<QuestDefinition>;
pub type ItemCatalog = Catalog<ItemDefinition>;
