// Leveling
pub const XP_PER_LEVEL: u64 = 100;
pub const LEVEL_UP_MAX_HEALTH: i32 = 10;
pub const LEVEL_UP_STRENGTH: i32 = 2;
pub const LEVEL_UP_MAGIC: i32 = 2;

// Character creation
pub const STARTING_LEVEL: u32 = 1;
pub const STARTING_GOLD: u32 = 100;
pub const MAX_NAME_LENGTH: usize = 16;

// Class base stats: (health, strength, magic)
pub const WARRIOR_BASE_STATS: (i32, i32, i32) = (120, 15, 5);
pub const MAGE_BASE_STATS: (i32, i32, i32) = (80, 8, 20);
pub const ROGUE_BASE_STATS: (i32, i32, i32) = (90, 12, 10);
pub const CLERIC_BASE_STATS: (i32, i32, i32) = (100, 10, 15);

// Death
pub const REVIVE_COST: u32 = 20;

// Inventory and shop
pub const MAX_INVENTORY_SIZE: usize = 20;
pub const SELL_PRICE_DIVISOR: u32 = 2;

// Combat
pub const DEFENSE_DIVISOR: i32 = 4;
pub const MIN_ATTACK_DAMAGE: i32 = 1;
pub const ESCAPE_CHANCE: f64 = 0.5;
pub const POWER_STRIKE_MULTIPLIER: i32 = 2;
pub const FIREBALL_MULTIPLIER: i32 = 2;
pub const CRITICAL_STRIKE_CHANCE: f64 = 0.5;
pub const CRITICAL_STRIKE_MULTIPLIER: i32 = 3;
pub const CLERIC_HEAL_AMOUNT: i32 = 30;

// Enemy tiers: (health, strength, magic, xp_reward, gold_reward)
pub const GOBLIN_STATS: (i32, i32, i32, u32, u32) = (50, 8, 2, 25, 10);
pub const ORC_STATS: (i32, i32, i32, u32, u32) = (80, 12, 5, 50, 25);
pub const DRAGON_STATS: (i32, i32, i32, u32, u32) = (200, 25, 15, 200, 100);

// Enemy selection by character level (inclusive upper bounds)
pub const GOBLIN_MAX_LEVEL: u32 = 2;
pub const ORC_MAX_LEVEL: u32 = 5;

// Persistence
pub const SAVE_FILE_SUFFIX: &str = "_save.txt";
pub const SAVE_DIR_NAME: &str = "save_games";
pub const QUEST_DATA_FILE: &str = "quests.txt";
pub const ITEM_DATA_FILE: &str = "items.txt";
pub const NO_PREREQUISITE: &str = "NONE";
