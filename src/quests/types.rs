//! Quest definitions, per-character status and quest errors.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::character::{Character, CharacterError, Reward};

/// Why a quest can't be accepted beyond the level and completion checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequirementFailure {
    AlreadyActive,
    PrerequisiteIncomplete(String),
}

impl fmt::Display for RequirementFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequirementFailure::AlreadyActive => f.write_str("quest is already active"),
            RequirementFailure::PrerequisiteIncomplete(id) => {
                write!(f, "prerequisite {} is not completed", id)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestError {
    #[error("Quest not found: {0}")]
    QuestNotFound(String),

    #[error("Quest already completed: {0}")]
    QuestAlreadyCompleted(String),

    #[error("Quest requirements not met: {0}")]
    RequirementsNotMet(RequirementFailure),

    #[error("Quest is not active: {0}")]
    QuestNotActive(String),

    #[error("Level {required} required, character is level {current}")]
    InsufficientLevel { required: u32, current: u32 },

    #[error("Character is dead")]
    CharacterDead,

    /// The reward could not be granted.
    #[error(transparent)]
    Reward(#[from] CharacterError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestDefinition {
    pub id: String,
    pub title: String,
    pub description: String,
    pub reward_xp: u32,
    pub reward_gold: u32,
    pub required_level: u32,
    /// `None` when the quest has no prerequisite.
    pub prerequisite: Option<String>,
}

impl QuestDefinition {
    pub fn reward(&self) -> Reward {
        Reward::new(self.reward_xp, self.reward_gold)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestStatus {
    NotStarted,
    Active,
    Completed,
}

impl QuestStatus {
    pub fn name(&self) -> &'static str {
        match self {
            QuestStatus::NotStarted => "Not Started",
            QuestStatus::Active => "Active",
            QuestStatus::Completed => "Completed",
        }
    }
}

pub fn quest_status(character: &Character, quest_id: &str) -> QuestStatus {
    if character.has_completed_quest(quest_id) {
        QuestStatus::Completed
    } else if character.has_active_quest(quest_id) {
        QuestStatus::Active
    } else {
        QuestStatus::NotStarted
    }
}

/// Completion counts across a quest catalog.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuestProgress {
    pub completed: usize,
    pub total: usize,
    pub percent: f64,
}
