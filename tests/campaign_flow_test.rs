//! Integration test: a short campaign across all four engines
//!
//! Creates a character, shops, equips, fights, completes quests, dies,
//! revives, then saves and reloads through the store and the catalogs.

use chronicles::catalog::{load_or_create_defaults, parse_quests, serialize_quests};
use chronicles::character::{
    apply_reward, create_character, revive_for_gold, CharacterError, CharacterStore, Reward,
};
use chronicles::combat::{create_enemy, Battle, PlayerAction, Winner};
use chronicles::items::{equip, purchase, unequip, use_item, EquipmentSlot};
use chronicles::quests::{
    accept_quest, complete_quest, quest_progress, quest_status, QuestStatus,
};
use rand::rngs::mock::StepRng;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

fn temp_dir(label: &str) -> PathBuf {
    let id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let dir = std::env::temp_dir().join(format!(
        "chronicles-{}-{}-{}",
        label,
        std::process::id(),
        id
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir
}

#[test]
fn test_campaign_round_trip() {
    let data_dir = temp_dir("data");
    let (quests, items) = load_or_create_defaults(&data_dir).unwrap();
    let mut hero = create_character("Gwen", "Warrior").unwrap();

    // Shop and gear up
    let sword = items.get("iron_sword").unwrap();
    let potion = items.get("health_potion").unwrap();
    purchase(&mut hero, sword).unwrap();
    purchase(&mut hero, potion).unwrap();
    assert_eq!(hero.gold, 25);
    assert_eq!(equip(&mut hero, EquipmentSlot::Weapon, "iron_sword", sword), Ok(None));
    assert_eq!(hero.strength, 20);

    // First quest, then a goblin fight with the sword: 20 - 2 = 18 per hit
    accept_quest(&mut hero, "first_quest", &quests).unwrap();
    let goblin = create_enemy("goblin").unwrap();
    let outcome = {
        let mut battle = Battle::new(&mut hero, goblin).unwrap();
        battle.run(&mut StepRng::new(0, 0), |_| PlayerAction::Attack)
    };
    assert_eq!(outcome.winner, Winner::Player);
    assert_eq!(outcome.rounds, 3);
    assert_eq!(outcome.reward, Reward::new(25, 10));
    // Goblin hits for 8 - 20/4 = 3, twice
    assert_eq!(hero.health, 114);

    apply_reward(&mut hero, outcome.reward).unwrap();
    let reward = complete_quest(&mut hero, "first_quest", &quests).unwrap();
    assert_eq!(reward, Reward::new(50, 25));
    assert_eq!(hero.experience, 75);
    assert_eq!(hero.gold, 60);
    assert_eq!(quest_status(&hero, "first_quest"), QuestStatus::Completed);
    accept_quest(&mut hero, "slay_goblin", &quests).unwrap();

    // Potion heals back to full
    use_item(&mut hero, "health_potion", potion).unwrap();
    assert_eq!(hero.health, 120);

    // Lose to a dragon, then pay to revive
    let dragon = create_enemy("dragon").unwrap();
    let outcome = {
        let mut battle = Battle::new(&mut hero, dragon).unwrap();
        battle.run(&mut StepRng::new(0, 0), |_| PlayerAction::Attack)
    };
    assert_eq!(outcome.winner, Winner::Enemy);
    assert_eq!(hero.health, 0);
    assert_eq!(
        complete_quest(&mut hero, "slay_goblin", &quests),
        Err(chronicles::quests::QuestError::CharacterDead)
    );
    assert_eq!(revive_for_gold(&mut hero), Ok(40));
    assert_eq!(hero.health, 60);
    assert_eq!(revive_for_gold(&mut hero), Err(CharacterError::CharacterAlive));

    // Save and reload, equipped sword included
    let store = CharacterStore::with_dir(temp_dir("saves")).unwrap();
    store.save(&hero).unwrap();
    assert_eq!(store.list().unwrap(), vec!["Gwen"]);
    let mut loaded = store.load("Gwen").unwrap();
    assert_eq!(loaded, hero);

    assert_eq!(
        unequip(&mut loaded, EquipmentSlot::Weapon),
        Ok(Some("iron_sword".to_string()))
    );
    assert_eq!(loaded.strength, 15);

    let progress = quest_progress(&loaded, &quests);
    assert_eq!((progress.completed, progress.total), (1, 2));

    store.delete("Gwen").unwrap();
    assert!(!store.exists("Gwen"));
    let _ = std::fs::remove_dir_all(store.save_dir());
    let _ = std::fs::remove_dir_all(&data_dir);
}

#[test]
fn test_catalog_files_round_trip() {
    let data_dir = temp_dir("catalog");
    let (quests, _) = load_or_create_defaults(&data_dir).unwrap();

    let text = serialize_quests(&quests);
    assert_eq!(parse_quests(&text).unwrap(), quests);

    let order: Vec<&str> = quests.iter().map(|q| q.id.as_str()).collect();
    assert_eq!(order, ["first_quest", "slay_goblin"]);
    let _ = std::fs::remove_dir_all(&data_dir);
}
