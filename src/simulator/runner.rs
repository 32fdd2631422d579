//! Plays whole characters through the real engines.
//!
//! Every decision a player would make (quests, shopping, potions, combat
//! actions, reviving) is made by a fixed strategy here, and every state
//! change goes through the same engine calls an interactive game would use.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use super::config::SimConfig;
use super::report::SimReport;
use crate::catalog::{default_items, default_quests, ItemCatalog, QuestCatalog};
use crate::character::{apply_reward, revive_for_gold, Character, CharacterClass};
use crate::combat::{enemy_for_level, Battle, PlayerAction, Winner};
use crate::core::constants::REVIVE_COST;
use crate::items::{
    count_item, equip, purchase, sell, use_item, EquipmentSlot, ItemDefinition, ItemType, Stat,
};
use crate::quests::{accept_quest, available_quests, complete_quest};

/// Results of one simulated character.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunStats {
    pub final_level: u32,
    pub final_gold: u32,
    pub battles_fought: u32,
    pub kills: u32,
    pub deaths: u32,
    pub escapes: u32,
    pub quests_accepted: u32,
    pub quests_completed: u32,
    pub items_bought: u32,
    pub potions_used: u32,
    /// False when the character died without gold to revive.
    pub survived: bool,
}

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> SimReport {
    let quests = default_quests();
    let items = default_items();
    let mut all_runs = Vec::with_capacity(config.num_runs as usize);

    for run_idx in 0..config.num_runs {
        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed + u64::from(run_idx)),
            None => ChaCha8Rng::from_entropy(),
        };

        let run_stats = simulate_single_run(config, &quests, &items, &mut rng);
        if config.verbosity >= 2 {
            println!(
                "Run {}/{} - Level {}, Gold {}, Kills {}, Deaths {}, Escapes {}, Quests {}{}",
                run_idx + 1,
                config.num_runs,
                run_stats.final_level,
                run_stats.final_gold,
                run_stats.kills,
                run_stats.deaths,
                run_stats.escapes,
                run_stats.quests_completed,
                if run_stats.survived { "" } else { " (fallen)" }
            );
        }
        all_runs.push(run_stats);
    }

    SimReport::from_runs(config.class, all_runs)
}

/// Plays one character from creation until it runs out of battles or of
/// gold to revive.
pub fn simulate_single_run(
    config: &SimConfig,
    quests: &QuestCatalog,
    items: &ItemCatalog,
    rng: &mut impl Rng,
) -> RunStats {
    let mut character = Character::new(format!("Sim {}", config.class), config.class);
    let mut stats = RunStats {
        survived: true,
        ..Default::default()
    };

    for _ in 0..config.battles_per_run {
        stats.quests_accepted += accept_all_available(&mut character, quests);
        stats.items_bought += shop_for_upgrades(&mut character, items);
        if drink_potion_if_hurt(&mut character, items) {
            stats.potions_used += 1;
        }

        let enemy = enemy_for_level(character.level);
        let outcome = match Battle::new(&mut character, enemy) {
            Ok(mut battle) => battle.run(&mut *rng, |b| choose_action(b.character())),
            Err(_) => break,
        };
        stats.battles_fought += 1;

        match outcome.winner {
            Winner::Player => {
                stats.kills += 1;
                if apply_reward(&mut character, outcome.reward).is_ok() {
                    stats.quests_completed += complete_active_quests(&mut character, quests);
                }
            }
            Winner::Enemy => {
                stats.deaths += 1;
                if revive_for_gold(&mut character).is_err() {
                    stats.survived = false;
                    break;
                }
            }
            Winner::None => stats.escapes += 1,
        }
    }

    stats.final_level = character.level;
    stats.final_gold = character.gold;
    stats
}

/// Special ability whenever it deals damage, heal below half health as a
/// Cleric, run below a quarter.
fn choose_action(character: &Character) -> PlayerAction {
    if character.health * 4 < character.max_health {
        return PlayerAction::Escape;
    }
    match character.class {
        CharacterClass::Cleric if character.health * 2 < character.max_health => {
            PlayerAction::Special
        }
        CharacterClass::Cleric => PlayerAction::Attack,
        _ => PlayerAction::Special,
    }
}

fn accept_all_available(character: &mut Character, quests: &QuestCatalog) -> u32 {
    let ids: Vec<String> = available_quests(character, quests)
        .iter()
        .map(|quest| quest.id.clone())
        .collect();
    let mut accepted = 0;
    for id in ids {
        match accept_quest(character, &id, quests) {
            Ok(()) => accepted += 1,
            Err(e) => tracing::debug!(quest = %id, error = %e, "Skipped quest"),
        }
    }
    accepted
}

fn complete_active_quests(character: &mut Character, quests: &QuestCatalog) -> u32 {
    let mut completed = 0;
    for id in character.active_quests.clone() {
        if complete_quest(character, &id, quests).is_ok() {
            completed += 1;
        }
    }
    completed
}

/// Best equippable item for `slot` that beats what's equipped and still
/// leaves enough gold for a revive.
fn best_upgrade<'c>(
    character: &Character,
    items: &'c ItemCatalog,
    slot: EquipmentSlot,
) -> Option<&'c ItemDefinition> {
    let current = character.equipped(slot).map_or(0, |e| e.effect.delta);
    items
        .iter()
        .filter(|item| item.item_type == slot.item_type() && item.effect.stat != Stat::Health)
        .filter(|item| item.effect.delta > current)
        .filter(|item| item.cost.saturating_add(REVIVE_COST) <= character.gold)
        .max_by_key(|item| item.effect.delta)
}

fn cheapest_potion(items: &ItemCatalog) -> Option<&ItemDefinition> {
    items
        .iter()
        .filter(|item| item.item_type == ItemType::Consumable)
        .filter(|item| item.effect.stat == Stat::Health && item.effect.delta > 0)
        .min_by_key(|item| item.cost)
}

/// Buys and equips upgrades, sells what they replace, and keeps one potion
/// on hand. Returns the number of purchases.
fn shop_for_upgrades(character: &mut Character, items: &ItemCatalog) -> u32 {
    let mut bought = 0;

    for slot in EquipmentSlot::ALL {
        let Some(item) = best_upgrade(character, items, slot) else {
            continue;
        };
        if purchase(character, item).is_err() {
            continue;
        }
        bought += 1;

        if let Ok(Some(old_id)) = equip(character, slot, &item.id, item) {
            if let Some(old) = items.get(&old_id) {
                if let Err(e) = sell(character, &old_id, old) {
                    tracing::debug!(item = %old_id, error = %e, "Kept replaced item");
                }
            }
        }
    }

    if let Some(potion) = cheapest_potion(items) {
        let affordable = potion.cost.saturating_add(REVIVE_COST) <= character.gold;
        if count_item(character, &potion.id) == 0
            && affordable
            && purchase(character, potion).is_ok()
        {
            bought += 1;
        }
    }

    bought
}

fn drink_potion_if_hurt(character: &mut Character, items: &ItemCatalog) -> bool {
    if character.health * 2 >= character.max_health {
        return false;
    }
    let Some(potion) = cheapest_potion(items) else {
        return false;
    };
    use_item(character, &potion.id, potion).is_ok()
}
