use super::types::*;
use crate::catalog::QuestCatalog;
use crate::character::{apply_reward, is_character_dead, Character, Reward};

fn lookup<'c>(
    quests: &'c QuestCatalog,
    quest_id: &str,
) -> Result<&'c QuestDefinition, QuestError> {
    quests
        .get(quest_id)
        .ok_or_else(|| QuestError::QuestNotFound(quest_id.to_string()))
}

/// Runs every acceptance check without touching the character.
fn check_acceptance(
    character: &Character,
    quest_id: &str,
    quests: &QuestCatalog,
) -> Result<(), QuestError> {
    let quest = lookup(quests, quest_id)?;

    if character.has_completed_quest(quest_id) {
        return Err(QuestError::QuestAlreadyCompleted(quest_id.to_string()));
    }
    if character.has_active_quest(quest_id) {
        return Err(QuestError::RequirementsNotMet(
            RequirementFailure::AlreadyActive,
        ));
    }
    if character.level < quest.required_level {
        return Err(QuestError::InsufficientLevel {
            required: quest.required_level,
            current: character.level,
        });
    }
    if let Some(prerequisite) = &quest.prerequisite {
        if !character.has_completed_quest(prerequisite) {
            return Err(QuestError::RequirementsNotMet(
                RequirementFailure::PrerequisiteIncomplete(prerequisite.clone()),
            ));
        }
    }
    Ok(())
}

/// True exactly when [`accept_quest`] would succeed.
pub fn can_accept_quest(character: &Character, quest_id: &str, quests: &QuestCatalog) -> bool {
    check_acceptance(character, quest_id, quests).is_ok()
}

/// Moves a quest from not started to active.
pub fn accept_quest(
    character: &mut Character,
    quest_id: &str,
    quests: &QuestCatalog,
) -> Result<(), QuestError> {
    check_acceptance(character, quest_id, quests)?;

    character.active_quests.push(quest_id.to_string());
    tracing::info!(name = %character.name(), quest = %quest_id, "Quest accepted");
    Ok(())
}

/// Moves an active quest to completed and pays out its reward, which may
/// level the character up. Returns the reward granted.
pub fn complete_quest(
    character: &mut Character,
    quest_id: &str,
    quests: &QuestCatalog,
) -> Result<Reward, QuestError> {
    let quest = lookup(quests, quest_id)?;
    if !character.has_active_quest(quest_id) {
        return Err(QuestError::QuestNotActive(quest_id.to_string()));
    }
    if is_character_dead(character) {
        return Err(QuestError::CharacterDead);
    }

    let reward = quest.reward();
    apply_reward(character, reward)?;
    character.active_quests.retain(|id| id != quest_id);
    character.completed_quests.push(quest_id.to_string());

    tracing::info!(
        name = %character.name(),
        quest = %quest_id,
        xp = reward.xp,
        gold = reward.gold,
        "Quest completed"
    );
    Ok(reward)
}

/// Drops an active quest without reward. Returns whether it was active.
pub fn abandon_quest(character: &mut Character, quest_id: &str) -> bool {
    let before = character.active_quests.len();
    character.active_quests.retain(|id| id != quest_id);
    let abandoned = character.active_quests.len() != before;
    if abandoned {
        tracing::info!(name = %character.name(), quest = %quest_id, "Quest abandoned");
    }
    abandoned
}

/// Definitions of the character's active quests, in acceptance order.
/// Ids missing from the catalog are skipped.
pub fn active_quests<'c>(
    character: &Character,
    quests: &'c QuestCatalog,
) -> Vec<&'c QuestDefinition> {
    character
        .active_quests
        .iter()
        .filter_map(|id| quests.get(id))
        .collect()
}

pub fn completed_quests<'c>(
    character: &Character,
    quests: &'c QuestCatalog,
) -> Vec<&'c QuestDefinition> {
    character
        .completed_quests
        .iter()
        .filter_map(|id| quests.get(id))
        .collect()
}

/// Quests the character could accept right now, in catalog order.
pub fn available_quests<'c>(
    character: &Character,
    quests: &'c QuestCatalog,
) -> Vec<&'c QuestDefinition> {
    quests
        .iter()
        .filter(|quest| can_accept_quest(character, &quest.id, quests))
        .collect()
}

pub fn quest_progress(character: &Character, quests: &QuestCatalog) -> QuestProgress {
    let total = quests.len();
    let completed = quests
        .iter()
        .filter(|quest| character.has_completed_quest(&quest.id))
        .count();
    let percent = if total == 0 {
        0.0
    } else {
        completed as f64 / total as f64 * 100.0
    };
    QuestProgress {
        completed,
        total,
        percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{default_quests, Catalog};
    use crate::character::{CharacterClass, CharacterError};

    fn hero() -> Character {
        Character::new("Hero".to_string(), CharacterClass::Cleric)
    }

    fn quest(id: &str, level: u32, prerequisite: Option<&str>) -> QuestDefinition {
        QuestDefinition {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            reward_xp: 50,
            reward_gold: 25,
            required_level: level,
            prerequisite: prerequisite.map(str::to_string),
        }
    }

    #[test]
    fn test_accept_and_complete() {
        let quests = default_quests();
        let mut c = hero();

        accept_quest(&mut c, "first_quest", &quests).unwrap();
        assert_eq!(quest_status(&c, "first_quest"), QuestStatus::Active);

        let reward = complete_quest(&mut c, "first_quest", &quests).unwrap();
        assert_eq!(reward, Reward::new(50, 25));
        assert_eq!(quest_status(&c, "first_quest"), QuestStatus::Completed);
        assert!(c.active_quests.is_empty());
        assert_eq!(c.experience, 50);
        assert_eq!(c.gold, 125);
    }

    #[test]
    fn test_prerequisite_blocks_accept() {
        let quests = default_quests();
        let mut c = hero();
        let before = c.active_quests.clone();

        assert_eq!(
            accept_quest(&mut c, "slay_goblin", &quests),
            Err(QuestError::RequirementsNotMet(
                RequirementFailure::PrerequisiteIncomplete("first_quest".to_string())
            ))
        );
        assert_eq!(c.active_quests, before);
    }

    #[test]
    fn test_reaccept_active_quest_rejected() {
        let quests = default_quests();
        let mut c = hero();
        accept_quest(&mut c, "first_quest", &quests).unwrap();

        assert_eq!(
            accept_quest(&mut c, "first_quest", &quests),
            Err(QuestError::RequirementsNotMet(
                RequirementFailure::AlreadyActive
            ))
        );
        assert_eq!(c.active_quests, vec!["first_quest"]);
    }

    #[test]
    fn test_accept_check_order() {
        let quests = Catalog::from_entries(vec![
            quest("base", 1, None),
            quest("veteran", 5, Some("base")),
        ])
        .unwrap();
        let mut c = hero();

        assert_eq!(
            accept_quest(&mut c, "missing", &quests),
            Err(QuestError::QuestNotFound("missing".to_string()))
        );
        // Level is checked before the prerequisite.
        assert_eq!(
            accept_quest(&mut c, "veteran", &quests),
            Err(QuestError::InsufficientLevel {
                required: 5,
                current: 1
            })
        );

        c.completed_quests.push("base".to_string());
        assert_eq!(
            accept_quest(&mut c, "base", &quests),
            Err(QuestError::QuestAlreadyCompleted("base".to_string()))
        );
        c.level = 5;
        assert!(accept_quest(&mut c, "veteran", &quests).is_ok());
    }

    #[test]
    fn test_complete_requires_active() {
        let quests = default_quests();
        let mut c = hero();
        assert_eq!(
            complete_quest(&mut c, "first_quest", &quests),
            Err(QuestError::QuestNotActive("first_quest".to_string()))
        );
        assert_eq!(
            complete_quest(&mut c, "nope", &quests),
            Err(QuestError::QuestNotFound("nope".to_string()))
        );
    }

    #[test]
    fn test_complete_while_dead_changes_nothing() {
        let quests = default_quests();
        let mut c = hero();
        accept_quest(&mut c, "first_quest", &quests).unwrap();
        c.health = 0;
        let before = c.clone();

        assert_eq!(
            complete_quest(&mut c, "first_quest", &quests),
            Err(QuestError::CharacterDead)
        );
        assert_eq!(c, before);
    }

    #[test]
    fn test_complete_reports_reward_failure_and_stays_active() {
        let quests = default_quests();
        let mut c = hero();
        accept_quest(&mut c, "first_quest", &quests).unwrap();
        c.gold = u32::MAX;
        let before = c.clone();

        assert_eq!(
            complete_quest(&mut c, "first_quest", &quests),
            Err(QuestError::Reward(CharacterError::ValueOverflow("gold")))
        );
        assert_eq!(c, before);
    }

    #[test]
    fn test_complete_can_level_up() {
        let quests = Catalog::from_entries(vec![QuestDefinition {
            reward_xp: 350,
            ..quest("epic", 1, None)
        }])
        .unwrap();
        let mut c = hero();
        c.health = 1;
        accept_quest(&mut c, "epic", &quests).unwrap();
        complete_quest(&mut c, "epic", &quests).unwrap();

        assert_eq!(c.level, 3);
        assert_eq!(c.experience, 50);
        assert_eq!(c.health, c.max_health);
    }

    #[test]
    fn test_abandon_is_idempotent() {
        let quests = default_quests();
        let mut c = hero();
        accept_quest(&mut c, "first_quest", &quests).unwrap();

        assert!(abandon_quest(&mut c, "first_quest"));
        assert!(!abandon_quest(&mut c, "first_quest"));
        assert_eq!(quest_status(&c, "first_quest"), QuestStatus::NotStarted);
        assert!(c.completed_quests.is_empty());
    }

    #[test]
    fn test_listing_and_progress() {
        let quests = default_quests();
        let mut c = hero();

        let available: Vec<&str> = available_quests(&c, &quests)
            .iter()
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(available, ["first_quest"]);

        accept_quest(&mut c, "first_quest", &quests).unwrap();
        assert_eq!(active_quests(&c, &quests).len(), 1);
        assert!(available_quests(&c, &quests).is_empty());

        complete_quest(&mut c, "first_quest", &quests).unwrap();
        assert!(can_accept_quest(&c, "slay_goblin", &quests));
        assert_eq!(completed_quests(&c, &quests)[0].title, "First Steps");

        let progress = quest_progress(&c, &quests);
        assert_eq!((progress.completed, progress.total), (1, 2));
        assert!((progress.percent - 50.0).abs() < f64::EPSILON);
    }
}
