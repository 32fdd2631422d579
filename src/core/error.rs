//! One error type for callers that drive several engines at once.

use std::fmt;

use thiserror::Error;

use crate::catalog::CatalogError;
use crate::character::{CharacterError, SaveError};
use crate::combat::CombatError;
use crate::items::InventoryError;
use crate::quests::QuestError;

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Character(#[from] CharacterError),

    #[error(transparent)]
    Inventory(#[from] InventoryError),

    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error(transparent)]
    Quest(#[from] QuestError),

    #[error(transparent)]
    Save(#[from] SaveError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Flat classification of every failure, for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    CharacterDead,
    CharacterAlive,
    InvalidCharacterClass,
    InvalidName,
    CharacterNotFound,
    SaveCorrupted,
    InvalidSaveData,
    InvalidTarget,
    CombatNotActive,
    OutOfTurn,
    AbilityOnCooldown,
    InventoryFull,
    ItemNotFound,
    InsufficientResources,
    InvalidItemType,
    QuestNotFound,
    QuestRequirementsNotMet,
    QuestAlreadyCompleted,
    QuestNotActive,
    InsufficientLevel,
    MissingDataFile,
    CorruptedData,
    InvalidDataFormat,
    ValueOverflow,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::CharacterDead => "CharacterDead",
            ErrorKind::CharacterAlive => "CharacterAlive",
            ErrorKind::InvalidCharacterClass => "InvalidCharacterClass",
            ErrorKind::InvalidName => "InvalidName",
            ErrorKind::CharacterNotFound => "CharacterNotFound",
            ErrorKind::SaveCorrupted => "SaveCorrupted",
            ErrorKind::InvalidSaveData => "InvalidSaveData",
            ErrorKind::InvalidTarget => "InvalidTarget",
            ErrorKind::CombatNotActive => "CombatNotActive",
            ErrorKind::OutOfTurn => "OutOfTurn",
            ErrorKind::AbilityOnCooldown => "AbilityOnCooldown",
            ErrorKind::InventoryFull => "InventoryFull",
            ErrorKind::ItemNotFound => "ItemNotFound",
            ErrorKind::InsufficientResources => "InsufficientResources",
            ErrorKind::InvalidItemType => "InvalidItemType",
            ErrorKind::QuestNotFound => "QuestNotFound",
            ErrorKind::QuestRequirementsNotMet => "QuestRequirementsNotMet",
            ErrorKind::QuestAlreadyCompleted => "QuestAlreadyCompleted",
            ErrorKind::QuestNotActive => "QuestNotActive",
            ErrorKind::InsufficientLevel => "InsufficientLevel",
            ErrorKind::MissingDataFile => "MissingDataFile",
            ErrorKind::CorruptedData => "CorruptedData",
            ErrorKind::InvalidDataFormat => "InvalidDataFormat",
            ErrorKind::ValueOverflow => "ValueOverflow",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn character_kind(e: &CharacterError) -> ErrorKind {
    match e {
        CharacterError::InvalidCharacterClass(_) => ErrorKind::InvalidCharacterClass,
        CharacterError::InvalidName(_) => ErrorKind::InvalidName,
        CharacterError::CharacterDead => ErrorKind::CharacterDead,
        CharacterError::CharacterAlive => ErrorKind::CharacterAlive,
        CharacterError::InsufficientGold { .. } => ErrorKind::InsufficientResources,
        CharacterError::ValueOverflow(_) => ErrorKind::ValueOverflow,
    }
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::Character(e) => character_kind(e),
            GameError::Inventory(e) => match e {
                InventoryError::InventoryFull => ErrorKind::InventoryFull,
                InventoryError::ItemNotFound(_) => ErrorKind::ItemNotFound,
                InventoryError::InsufficientResources { .. } => ErrorKind::InsufficientResources,
                InventoryError::InvalidItemType(_) | InventoryError::InvalidEffect(_) => {
                    ErrorKind::InvalidItemType
                }
                InventoryError::GoldOverflow => ErrorKind::ValueOverflow,
            },
            GameError::Combat(e) => match e {
                CombatError::CharacterDead => ErrorKind::CharacterDead,
                CombatError::CombatNotActive => ErrorKind::CombatNotActive,
                CombatError::OutOfTurn(_) => ErrorKind::OutOfTurn,
                CombatError::InvalidTarget(_) => ErrorKind::InvalidTarget,
                CombatError::AbilityOnCooldown(_) => ErrorKind::AbilityOnCooldown,
            },
            GameError::Quest(e) => match e {
                QuestError::QuestNotFound(_) => ErrorKind::QuestNotFound,
                QuestError::QuestAlreadyCompleted(_) => ErrorKind::QuestAlreadyCompleted,
                QuestError::RequirementsNotMet(_) => ErrorKind::QuestRequirementsNotMet,
                QuestError::QuestNotActive(_) => ErrorKind::QuestNotActive,
                QuestError::InsufficientLevel { .. } => ErrorKind::InsufficientLevel,
                QuestError::CharacterDead => ErrorKind::CharacterDead,
                QuestError::Reward(e) => character_kind(e),
            },
            GameError::Save(e) => match e {
                SaveError::CharacterNotFound(_) => ErrorKind::CharacterNotFound,
                SaveError::InvalidSaveData(_) => ErrorKind::InvalidSaveData,
                SaveError::InvalidName(_) => ErrorKind::InvalidName,
                SaveError::SaveCorrupted(_) | SaveError::Io(_) => ErrorKind::SaveCorrupted,
            },
            GameError::Catalog(e) => match e {
                CatalogError::MissingDataFile(_) => ErrorKind::MissingDataFile,
                CatalogError::CorruptedData(_) => ErrorKind::CorruptedData,
                CatalogError::InvalidDataFormat(_) => ErrorKind::InvalidDataFormat,
            },
        }
    }
}
