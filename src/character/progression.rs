//! Experience, leveling, healing, revival and gold.
//!
//! Every function here validates before it touches the character, so an
//! `Err` return always means nothing changed.

use serde::{Deserialize, Serialize};

use super::types::{Character, CharacterError};
use crate::core::constants::*;

/// Experience and gold handed out for a victory or a finished quest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reward {
    pub xp: u32,
    pub gold: u32,
}

impl Reward {
    pub fn new(xp: u32, gold: u32) -> Self {
        Self { xp, gold }
    }

    pub fn is_empty(&self) -> bool {
        self.xp == 0 && self.gold == 0
    }
}

/// What a call to [`grant_experience`] did to the character's level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LevelUpReport {
    pub levels_gained: u32,
    pub new_level: u32,
}

impl LevelUpReport {
    pub fn leveled_up(&self) -> bool {
        self.levels_gained > 0
    }
}

pub fn is_character_dead(character: &Character) -> bool {
    character.health <= 0
}

pub fn can_character_fight(character: &Character) -> bool {
    character.health > 0
}

/// Adds experience and applies every level-up it pays for.
///
/// Each level costs `level * 100` experience and grants +10 max health,
/// +2 strength, +2 magic and a full heal. Negative amounts are treated as 0.
/// A grant that would push any stat past its integer range fails with
/// [`CharacterError::ValueOverflow`] and leaves the character unchanged.
pub fn grant_experience(
    character: &mut Character,
    amount: i64,
) -> Result<LevelUpReport, CharacterError> {
    if is_character_dead(character) {
        return Err(CharacterError::CharacterDead);
    }

    let gained = u64::try_from(amount).unwrap_or(0);
    let mut experience = character
        .experience
        .checked_add(gained)
        .ok_or(CharacterError::ValueOverflow("experience"))?;
    let mut level = character.level;
    let mut max_health = character.max_health;
    let mut strength = character.strength;
    let mut magic = character.magic;

    let mut levels_gained = 0;
    loop {
        let cost = u64::from(level)
            .checked_mul(XP_PER_LEVEL)
            .ok_or(CharacterError::ValueOverflow("experience"))?;
        if experience < cost {
            break;
        }
        experience -= cost;
        level = level
            .checked_add(1)
            .ok_or(CharacterError::ValueOverflow("level"))?;
        max_health = max_health
            .checked_add(LEVEL_UP_MAX_HEALTH)
            .ok_or(CharacterError::ValueOverflow("max health"))?;
        strength = strength
            .checked_add(LEVEL_UP_STRENGTH)
            .ok_or(CharacterError::ValueOverflow("strength"))?;
        magic = magic
            .checked_add(LEVEL_UP_MAGIC)
            .ok_or(CharacterError::ValueOverflow("magic"))?;
        levels_gained += 1;
    }

    character.experience = experience;
    if levels_gained > 0 {
        character.level = level;
        character.max_health = max_health;
        character.strength = strength;
        character.magic = magic;
        character.health = max_health;
        tracing::info!(
            name = %character.name(),
            level = character.level,
            levels_gained,
            "Character leveled up"
        );
    }

    Ok(LevelUpReport {
        levels_gained,
        new_level: character.level,
    })
}

/// Heals up to `amount`, never past max health. Returns the HP actually restored.
pub fn heal_character(character: &mut Character, amount: i32) -> i32 {
    let missing = (character.max_health - character.health).max(0);
    let healed = amount.max(0).min(missing);
    character.health += healed;
    healed
}

/// Brings a dead character back at half max health.
///
/// Returns `false` without changing anything if the character is alive.
/// The restored health is never below 1, so a successful revive always
/// leaves the character able to fight.
pub fn revive_character(character: &mut Character) -> bool {
    if character.health > 0 {
        return false;
    }

    character.health = (character.max_health / 2).max(1);
    tracing::info!(name = %character.name(), health = character.health, "Character revived");
    true
}

/// Revive from the death screen: costs [`REVIVE_COST`] gold.
pub fn revive_for_gold(character: &mut Character) -> Result<u32, CharacterError> {
    if !is_character_dead(character) {
        return Err(CharacterError::CharacterAlive);
    }
    spend_gold(character, REVIVE_COST)?;
    revive_character(character);
    Ok(character.gold)
}

/// Applies a signed gold change and returns the new total.
///
/// A total above `u32::MAX` fails with [`CharacterError::ValueOverflow`];
/// gold is never clamped.
pub fn add_gold(character: &mut Character, amount: i64) -> Result<u32, CharacterError> {
    let new_total = i64::from(character.gold)
        .checked_add(amount)
        .ok_or(CharacterError::ValueOverflow("gold"))?;
    if new_total < 0 {
        return Err(CharacterError::InsufficientGold {
            available: character.gold,
            required: amount.unsigned_abs(),
        });
    }

    character.gold = u32::try_from(new_total).map_err(|_| CharacterError::ValueOverflow("gold"))?;
    Ok(character.gold)
}

pub fn spend_gold(character: &mut Character, amount: u32) -> Result<u32, CharacterError> {
    add_gold(character, -i64::from(amount))
}

/// Grants a battle or quest reward: experience first, then gold.
pub fn apply_reward(
    character: &mut Character,
    reward: Reward,
) -> Result<LevelUpReport, CharacterError> {
    if is_character_dead(character) {
        return Err(CharacterError::CharacterDead);
    }
    if character.gold.checked_add(reward.gold).is_none() {
        return Err(CharacterError::ValueOverflow("gold"));
    }

    let report = grant_experience(character, i64::from(reward.xp))?;
    add_gold(character, i64::from(reward.gold))?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::types::CharacterClass;

    fn hero() -> Character {
        Character::new("Hero".to_string(), CharacterClass::Warrior)
    }

    #[test]
    fn test_grant_experience_below_threshold() {
        let mut c = hero();
        let report = grant_experience(&mut c, 99).unwrap();
        assert_eq!(c.level, 1);
        assert_eq!(c.experience, 99);
        assert!(!report.leveled_up());
    }

    #[test]
    fn test_grant_250_xp_matches_exact_trace() {
        let mut c = hero();
        let report = grant_experience(&mut c, 250).unwrap();
        // 100 spent on 1 -> 2, leaving 150, short of the 200 needed at level 2
        assert_eq!(c.level, 2);
        assert_eq!(c.experience, 150);
        assert_eq!(report.levels_gained, 1);
        assert_eq!(report.new_level, 2);
    }

    #[test]
    fn test_grant_experience_multiple_levels_in_one_call() {
        let mut c = hero();
        c.health = 5;
        let report = grant_experience(&mut c, 300).unwrap();
        assert_eq!(c.level, 3);
        assert_eq!(c.experience, 0);
        assert_eq!(report.levels_gained, 2);
        assert_eq!(c.max_health, 140);
        assert_eq!(c.health, 140);
        assert_eq!(c.strength, 19);
        assert_eq!(c.magic, 9);
    }

    #[test]
    fn test_grant_experience_negative_is_clamped() {
        let mut c = hero();
        c.experience = 40;
        grant_experience(&mut c, -500).unwrap();
        assert_eq!(c.experience, 40);
        assert_eq!(c.level, 1);
    }

    #[test]
    fn test_grant_experience_dead_character_fails() {
        let mut c = hero();
        c.health = 0;
        assert_eq!(
            grant_experience(&mut c, 50),
            Err(CharacterError::CharacterDead)
        );
        assert_eq!(c.experience, 0);
    }

    #[test]
    fn test_experience_invariant_holds_for_many_grants() {
        let mut c = hero();
        let mut last_level = c.level;
        for amount in [0, 1, 57, 100, 999, 12_345, 3, 250] {
            grant_experience(&mut c, amount).unwrap();
            assert!(c.experience < c.xp_to_next_level());
            assert!(c.level >= last_level);
            assert!(c.health >= 0 && c.health <= c.max_health);
            last_level = c.level;
        }
    }

    #[test]
    fn test_heal_character_caps_at_max() {
        let mut c = hero();
        c.health = 100;
        assert_eq!(heal_character(&mut c, 50), 20);
        assert_eq!(c.health, 120);
        assert_eq!(heal_character(&mut c, 10), 0);
    }

    #[test]
    fn test_heal_character_negative_is_zero() {
        let mut c = hero();
        c.health = 50;
        assert_eq!(heal_character(&mut c, -10), 0);
        assert_eq!(c.health, 50);
    }

    #[test]
    fn test_revive_character_half_health() {
        let mut c = Character::new("Mira".to_string(), CharacterClass::Mage);
        c.health = 0;
        assert!(revive_character(&mut c));
        assert_eq!(c.health, 40);
        assert!(!revive_character(&mut c));
        assert_eq!(c.health, 40);
    }

    #[test]
    fn test_revive_never_leaves_zero_health() {
        let mut c = hero();
        c.max_health = 1;
        c.health = 0;
        assert!(revive_character(&mut c));
        assert_eq!(c.health, 1);
    }

    #[test]
    fn test_revive_for_gold() {
        let mut c = hero();
        c.health = 0;
        assert_eq!(revive_for_gold(&mut c), Ok(80));
        assert_eq!(c.health, 60);
        assert_eq!(revive_for_gold(&mut c), Err(CharacterError::CharacterAlive));
    }

    #[test]
    fn test_revive_for_gold_without_gold_changes_nothing() {
        let mut c = hero();
        c.health = 0;
        c.gold = 19;
        assert!(matches!(
            revive_for_gold(&mut c),
            Err(CharacterError::InsufficientGold { .. })
        ));
        assert_eq!(c.health, 0);
        assert_eq!(c.gold, 19);
    }

    #[test]
    fn test_add_and_spend_gold() {
        let mut c = hero();
        assert_eq!(add_gold(&mut c, 50), Ok(150));
        assert_eq!(add_gold(&mut c, -25), Ok(125));
        assert_eq!(spend_gold(&mut c, 125), Ok(0));
        assert_eq!(
            spend_gold(&mut c, 1),
            Err(CharacterError::InsufficientGold {
                available: 0,
                required: 1
            })
        );
        assert_eq!(c.gold, 0);
    }

    #[test]
    fn test_add_gold_overflow_changes_nothing() {
        let mut c = hero();
        assert_eq!(
            add_gold(&mut c, 5_000_000_000),
            Err(CharacterError::ValueOverflow("gold"))
        );
        assert_eq!(c.gold, 100);
        assert_eq!(
            add_gold(&mut c, i64::MAX),
            Err(CharacterError::ValueOverflow("gold"))
        );
        assert_eq!(c.gold, 100);

        c.gold = u32::MAX - 1;
        assert_eq!(add_gold(&mut c, 1), Ok(u32::MAX));
        assert_eq!(
            add_gold(&mut c, 1),
            Err(CharacterError::ValueOverflow("gold"))
        );
        assert_eq!(c.gold, u32::MAX);
    }

    #[test]
    fn test_grant_experience_stat_overflow_is_atomic() {
        let mut c = hero();
        c.max_health = i32::MAX - 5;
        c.health = 50;
        c.experience = 30;

        assert_eq!(
            grant_experience(&mut c, 100),
            Err(CharacterError::ValueOverflow("max health"))
        );
        assert_eq!(c.level, 1);
        assert_eq!(c.experience, 30);
        assert_eq!(c.health, 50);
        assert_eq!(c.max_health, i32::MAX - 5);
        assert_eq!(c.strength, 15);
    }

    #[test]
    fn test_grant_experience_huge_amount_fails_cleanly() {
        let mut c = hero();
        let before = c.clone();
        assert!(matches!(
            grant_experience(&mut c, i64::MAX),
            Err(CharacterError::ValueOverflow(_))
        ));
        assert_eq!(c, before);
    }

    #[test]
    fn test_apply_reward() {
        let mut c = hero();
        let report = apply_reward(&mut c, Reward::new(120, 30)).unwrap();
        assert!(report.leveled_up());
        assert_eq!(c.level, 2);
        assert_eq!(c.experience, 20);
        assert_eq!(c.gold, 130);
    }

    #[test]
    fn test_apply_reward_gold_overflow_grants_no_experience() {
        let mut c = hero();
        c.gold = u32::MAX;
        assert_eq!(
            apply_reward(&mut c, Reward::new(150, 1)),
            Err(CharacterError::ValueOverflow("gold"))
        );
        assert_eq!(c.level, 1);
        assert_eq!(c.experience, 0);
    }

    #[test]
    fn test_apply_reward_dead_character_changes_nothing() {
        let mut c = hero();
        c.health = 0;
        assert_eq!(
            apply_reward(&mut c, Reward::new(10, 10)),
            Err(CharacterError::CharacterDead)
        );
        assert_eq!(c.gold, 100);
    }
}
