use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::character::{CharacterClass, Reward};
use crate::core::constants::*;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombatError {
    #[error("Character is dead and cannot fight")]
    CharacterDead,

    #[error("Battle has already ended")]
    CombatNotActive,

    #[error("It is the {0}'s turn")]
    OutOfTurn(&'static str),

    #[error("Unknown enemy: {0}")]
    InvalidTarget(String),

    /// Reserved: no current ability has a cooldown.
    #[error("{0} is on cooldown")]
    AbilityOnCooldown(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    Goblin,
    Orc,
    Dragon,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 3] = [EnemyKind::Goblin, EnemyKind::Orc, EnemyKind::Dragon];

    pub fn name(&self) -> &'static str {
        match self {
            EnemyKind::Goblin => "Goblin",
            EnemyKind::Orc => "Orc",
            EnemyKind::Dragon => "Dragon",
        }
    }

    /// Returns (health, strength, magic, xp_reward, gold_reward).
    pub fn stats(&self) -> (i32, i32, i32, u32, u32) {
        match self {
            EnemyKind::Goblin => GOBLIN_STATS,
            EnemyKind::Orc => ORC_STATS,
            EnemyKind::Dragon => DRAGON_STATS,
        }
    }
}

impl fmt::Display for EnemyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EnemyKind {
    type Err = CombatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        EnemyKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CombatError::InvalidTarget(trimmed.to_string()))
    }
}

/// A single encounter's opponent. Created fresh for every battle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Enemy {
    pub kind: EnemyKind,
    pub health: i32,
    pub max_health: i32,
    pub strength: i32,
    pub magic: i32,
    pub xp_reward: u32,
    pub gold_reward: u32,
}

impl Enemy {
    pub fn new(kind: EnemyKind) -> Self {
        let (health, strength, magic, xp_reward, gold_reward) = kind.stats();
        Self {
            kind,
            health,
            max_health: health,
            strength,
            magic,
            xp_reward,
            gold_reward,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Applies damage, never dropping health below zero. Returns damage dealt.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let dealt = amount.clamp(0, self.health.max(0));
        self.health -= dealt;
        dealt
    }
}

/// Builds an enemy by name, e.g. `"goblin"` or `"Dragon"`.
pub fn create_enemy(name: &str) -> Result<Enemy, CombatError> {
    Ok(Enemy::new(name.parse()?))
}

/// The enemy tier a character of `level` normally faces.
pub fn enemy_for_level(level: u32) -> Enemy {
    let kind = match level {
        l if l <= GOBLIN_MAX_LEVEL => EnemyKind::Goblin,
        l if l <= ORC_MAX_LEVEL => EnemyKind::Orc,
        _ => EnemyKind::Dragon,
    };
    Enemy::new(kind)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    Player,
    Enemy,
    /// The player escaped.
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleState {
    Active,
    Ended(Winner),
}

impl BattleState {
    pub fn is_active(&self) -> bool {
        matches!(self, BattleState::Active)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayerAction {
    Attack,
    Special,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialAbility {
    PowerStrike,
    Fireball,
    CriticalStrike,
    Heal,
}

impl SpecialAbility {
    pub fn for_class(class: CharacterClass) -> Self {
        match class {
            CharacterClass::Warrior => SpecialAbility::PowerStrike,
            CharacterClass::Mage => SpecialAbility::Fireball,
            CharacterClass::Rogue => SpecialAbility::CriticalStrike,
            CharacterClass::Cleric => SpecialAbility::Heal,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpecialAbility::PowerStrike => "Power Strike",
            SpecialAbility::Fireball => "Fireball",
            SpecialAbility::CriticalStrike => "Critical Strike",
            SpecialAbility::Heal => "Heal",
        }
    }
}

/// What happened in one half-turn (or at the end of the battle).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CombatEvent {
    PlayerAttack {
        damage: i32,
    },
    PlayerSpecial {
        ability: SpecialAbility,
        damage: i32,
        critical: bool,
    },
    PlayerHealed {
        amount: i32,
    },
    EscapeSucceeded,
    EscapeFailed,
    EnemyAttack {
        damage: i32,
    },
    EnemyDefeated {
        reward: Reward,
    },
    PlayerDefeated,
}

/// Final result of a battle. `reward` is zero unless the player won.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleOutcome {
    pub winner: Winner,
    pub reward: Reward,
    pub rounds: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_enemy_case_insensitive() {
        let goblin = create_enemy("goblin").unwrap();
        assert_eq!(goblin.kind, EnemyKind::Goblin);
        assert_eq!((goblin.health, goblin.strength, goblin.magic), (50, 8, 2));
        assert_eq!((goblin.xp_reward, goblin.gold_reward), (25, 10));

        let dragon = create_enemy(" DRAGON ").unwrap();
        assert_eq!(dragon.max_health, 200);
        assert_eq!(dragon.gold_reward, 100);
    }

    #[test]
    fn test_create_enemy_unknown() {
        assert_eq!(
            create_enemy("troll"),
            Err(CombatError::InvalidTarget("troll".to_string()))
        );
    }

    #[test]
    fn test_enemy_for_level_tiers() {
        assert_eq!(enemy_for_level(1).kind, EnemyKind::Goblin);
        assert_eq!(enemy_for_level(2).kind, EnemyKind::Goblin);
        assert_eq!(enemy_for_level(3).kind, EnemyKind::Orc);
        assert_eq!(enemy_for_level(5).kind, EnemyKind::Orc);
        assert_eq!(enemy_for_level(6).kind, EnemyKind::Dragon);
        assert_eq!(enemy_for_level(40).kind, EnemyKind::Dragon);
    }

    #[test]
    fn test_take_damage_clamps_at_zero() {
        let mut orc = Enemy::new(EnemyKind::Orc);
        assert_eq!(orc.take_damage(30), 30);
        assert_eq!(orc.health, 50);
        assert_eq!(orc.take_damage(500), 50);
        assert_eq!(orc.health, 0);
        assert!(!orc.is_alive());
    }

    #[test]
    fn test_special_ability_routing() {
        assert_eq!(
            SpecialAbility::for_class(CharacterClass::Warrior),
            SpecialAbility::PowerStrike
        );
        assert_eq!(
            SpecialAbility::for_class(CharacterClass::Mage),
            SpecialAbility::Fireball
        );
        assert_eq!(
            SpecialAbility::for_class(CharacterClass::Rogue),
            SpecialAbility::CriticalStrike
        );
        assert_eq!(
            SpecialAbility::for_class(CharacterClass::Cleric),
            SpecialAbility::Heal
        );
    }
}
