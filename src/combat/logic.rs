use rand::Rng;

use super::types::*;
use crate::character::{heal_character, Character, Reward};
use crate::core::constants::*;

/// Damage of a basic attack. Used for both sides; never less than 1.
pub fn basic_attack_damage(attacker_strength: i32, defender_strength: i32) -> i32 {
    (attacker_strength - defender_strength.max(0) / DEFENSE_DIVISOR).max(MIN_ATTACK_DAMAGE)
}

/// What beating `enemy` is worth.
pub fn victory_reward(enemy: &Enemy) -> Reward {
    Reward::new(enemy.xp_reward, enemy.gold_reward)
}

/// One encounter between a character and an enemy.
///
/// A round is the player's half-turn followed, if the battle is still active,
/// by the enemy's. The end check runs after every half-turn, enemy death
/// first. The battle never applies rewards itself: callers take
/// [`BattleOutcome::reward`] and hand it to the progression engine.
#[derive(Debug)]
pub struct Battle<'a> {
    character: &'a mut Character,
    enemy: Enemy,
    state: BattleState,
    round: u32,
    awaiting_enemy: bool,
    log: Vec<CombatEvent>,
}

impl<'a> Battle<'a> {
    pub fn new(character: &'a mut Character, enemy: Enemy) -> Result<Self, CombatError> {
        if character.health <= 0 {
            return Err(CombatError::CharacterDead);
        }

        tracing::debug!(name = %character.name(), enemy = enemy.name(), "Battle started");
        Ok(Self {
            character,
            enemy,
            state: BattleState::Active,
            round: 0,
            awaiting_enemy: false,
            log: Vec::new(),
        })
    }

    pub fn state(&self) -> BattleState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active()
    }

    pub fn character(&self) -> &Character {
        &*self.character
    }

    pub fn enemy(&self) -> &Enemy {
        &self.enemy
    }

    /// Number of completed rounds.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn log(&self) -> &[CombatEvent] {
        &self.log
    }

    /// True between the player's half-turn and the enemy's reply.
    pub fn is_enemy_turn(&self) -> bool {
        self.awaiting_enemy
    }

    /// The player's half-turn. Opens a round; the enemy must act before the
    /// player may act again.
    pub fn player_turn(
        &mut self,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<CombatEvent, CombatError> {
        if !self.is_active() {
            return Err(CombatError::CombatNotActive);
        }
        if self.awaiting_enemy {
            return Err(CombatError::OutOfTurn("enemy"));
        }

        let event = match action {
            PlayerAction::Attack => {
                let damage = basic_attack_damage(self.character.strength, self.enemy.strength);
                CombatEvent::PlayerAttack {
                    damage: self.enemy.take_damage(damage),
                }
            }
            PlayerAction::Special => self.use_special(rng),
            PlayerAction::Escape => {
                if rng.gen_bool(ESCAPE_CHANCE) {
                    self.state = BattleState::Ended(Winner::None);
                    tracing::info!(
                        name = %self.character.name(),
                        enemy = self.enemy.name(),
                        "Escaped from battle"
                    );
                    CombatEvent::EscapeSucceeded
                } else {
                    CombatEvent::EscapeFailed
                }
            }
        };

        tracing::debug!(round = self.round + 1, ?event, "Player turn");
        self.log.push(event.clone());
        self.awaiting_enemy = true;
        self.check_battle_end();
        Ok(event)
    }

    fn use_special(&mut self, rng: &mut impl Rng) -> CombatEvent {
        let ability = SpecialAbility::for_class(self.character.class);
        let (damage, critical) = match ability {
            SpecialAbility::PowerStrike => {
                (self.character.strength * POWER_STRIKE_MULTIPLIER, false)
            }
            SpecialAbility::Fireball => (self.character.magic * FIREBALL_MULTIPLIER, false),
            SpecialAbility::CriticalStrike => {
                if rng.gen_bool(CRITICAL_STRIKE_CHANCE) {
                    (self.character.strength * CRITICAL_STRIKE_MULTIPLIER, true)
                } else {
                    (self.character.strength, false)
                }
            }
            SpecialAbility::Heal => {
                let amount = heal_character(self.character, CLERIC_HEAL_AMOUNT);
                return CombatEvent::PlayerHealed { amount };
            }
        };

        CombatEvent::PlayerSpecial {
            ability,
            damage: self.enemy.take_damage(damage),
            critical,
        }
    }

    /// The enemy's half-turn: always a basic attack. Completes the round.
    pub fn enemy_turn(&mut self) -> Result<CombatEvent, CombatError> {
        if !self.is_active() {
            return Err(CombatError::CombatNotActive);
        }
        if !self.awaiting_enemy {
            return Err(CombatError::OutOfTurn("player"));
        }

        let damage = basic_attack_damage(self.enemy.strength, self.character.strength);
        let dealt = damage.min(self.character.health.max(0));
        self.character.health -= dealt;

        let event = CombatEvent::EnemyAttack { damage: dealt };
        tracing::debug!(round = self.round + 1, ?event, "Enemy turn");
        self.log.push(event.clone());
        self.awaiting_enemy = false;
        self.round += 1;
        self.check_battle_end();
        Ok(event)
    }

    /// Ends the battle if either side is down. Enemy death is checked first.
    pub fn check_battle_end(&mut self) -> BattleState {
        if !self.is_active() {
            return self.state;
        }

        if self.enemy.health <= 0 {
            let reward = victory_reward(&self.enemy);
            self.state = BattleState::Ended(Winner::Player);
            self.log.push(CombatEvent::EnemyDefeated { reward });
            tracing::info!(
                name = %self.character.name(),
                enemy = self.enemy.name(),
                xp = reward.xp,
                gold = reward.gold,
                "Enemy defeated"
            );
        } else if self.character.health <= 0 {
            self.state = BattleState::Ended(Winner::Enemy);
            self.log.push(CombatEvent::PlayerDefeated);
            tracing::info!(
                name = %self.character.name(),
                enemy = self.enemy.name(),
                "Character defeated"
            );
        }
        self.state
    }

    /// Plays one full round with `action` as the player's choice.
    pub fn play_round(
        &mut self,
        action: PlayerAction,
        rng: &mut impl Rng,
    ) -> Result<BattleState, CombatError> {
        self.player_turn(action, rng)?;
        if self.is_active() {
            self.enemy_turn()?;
        }
        Ok(self.state)
    }

    /// Plays rounds until the battle ends, asking `choose` for each action.
    ///
    /// `choose` must eventually let the battle end; a Cleric that heals every
    /// turn against a weak enemy will fight forever.
    pub fn run(
        &mut self,
        rng: &mut impl Rng,
        mut choose: impl FnMut(&Battle<'a>) -> PlayerAction,
    ) -> BattleOutcome {
        while self.is_active() {
            let action = choose(self);
            if self.play_round(action, rng).is_err() {
                break;
            }
        }
        self.outcome().unwrap_or(BattleOutcome {
            winner: Winner::None,
            reward: Reward::default(),
            rounds: self.round,
        })
    }

    /// The result once the battle has ended, `None` while it is active.
    pub fn outcome(&self) -> Option<BattleOutcome> {
        let BattleState::Ended(winner) = self.state else {
            return None;
        };
        let reward = match winner {
            Winner::Player => victory_reward(&self.enemy),
            Winner::Enemy | Winner::None => Reward::default(),
        };
        Some(BattleOutcome {
            winner,
            reward,
            rounds: self.round + u32::from(self.awaiting_enemy),
        })
    }
}
