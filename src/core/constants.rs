// Tick and timing
pub const TICK_SECONDS: f64 = 0.6;
pub const DEFAULT_ATTACK_INTERVAL_TICKS: u32 = 4;
pub const RAPID_INTERVAL_REDUCTION_TICKS: u32 = 1;
pub const MIN_ATTACK_INTERVAL_TICKS: u32 = 1;

// Levels and experience
pub const MIN_LEVEL: u32 = 1;
pub const MAX_LEVEL: u32 = 99;
pub const MAX_VIRTUAL_LEVEL: u32 = 126;
pub const MAX_SKILL_XP: f64 = 200_000_000.0;
pub const XP_CURVE_BASE_POINTS: f64 = 300.0;
pub const XP_CURVE_DOUBLING_LEVELS: f64 = 7.0;
pub const XP_CURVE_DIVISOR: u64 = 4;

// Combat level weights (everything scaled by COMBAT_LEVEL_DENOMINATOR = 40)
pub const COMBAT_LEVEL_DENOMINATOR: u64 = 40;
pub const COMBAT_LEVEL_BASE_WEIGHT: u64 = 10; // 1/4
pub const COMBAT_LEVEL_STYLE_WEIGHT: u64 = 13; // 13/40

// Effective level and roll formulas
pub const INVISIBLE_LEVEL_BOOST: u32 = 8;
pub const EQUIPMENT_BONUS_OFFSET: i32 = 64;
pub const MAX_HIT_DIVISOR: f64 = 640.0;

// Combat style additive bonuses
pub const STYLE_BONUS_MAJOR: u32 = 3;
pub const STYLE_BONUS_CONTROLLED: u32 = 1;

// Gathering success chance bounds
pub const GATHERING_MIN_CHANCE: f64 = 0.01;
pub const GATHERING_MAX_CHANCE: f64 = 0.95;
pub const AGILITY_MIN_CHANCE: f64 = 0.20;
pub const AGILITY_MAX_CHANCE: f64 = 1.0;
pub const HERBLORE_MIN_CHANCE: f64 = 0.70;
pub const HERBLORE_MAX_CHANCE: f64 = 0.98;
pub const COOKING_HEAT_PROTECTION_BONUS: u32 = 6;

// Gathering formulas: (level offset, divisor)
pub const MINING_FORMULA: (i32, f64) = (3, 50.0);
pub const WOODCUTTING_FORMULA: (i32, f64) = (8, 40.0);
pub const FISHING_FORMULA: (i32, f64) = (0, 45.0);
pub const THIEVING_FORMULA: (i32, f64) = (0, 35.0);
pub const AGILITY_FORMULA: (i32, f64) = (0, 30.0);
pub const COOKING_FORMULA: (i32, f64) = (0, 25.0);
pub const HERBLORE_FORMULA: (i32, f64) = (0, 20.0);

// Production throughput: (base actions per minute, levels per extra action)
pub const CRAFTING_RATE: (f64, f64) = (10.0, 5.0);
pub const FLETCHING_RATE: (f64, f64) = (12.0, 4.0);
pub const SMITHING_RATE: (f64, f64) = (8.0, 6.0);

// Runecrafting multiples
pub const RUNECRAFT_MULTIPLE_THRESHOLDS: [u32; 9] = [1, 2, 5, 9, 14, 20, 27, 35, 44];
pub const RUNECRAFT_NO_MULTIPLE_LEVEL: u32 = 50;

// Drop modifiers (defaults for DropRules)
pub const WEALTH_DROP_BONUS: f64 = 0.01;
pub const TASK_DROP_BONUS: f64 = 0.10;
pub const ELITE_ACHIEVEMENT_DROP_BONUS: f64 = 0.02;
pub const MASTER_ACHIEVEMENT_DROP_BONUS: f64 = 0.05;

// Drop tier gate chances (defaults for DropRules): common, uncommon, rare, very rare
pub const DROP_TIER_CHANCES: [f64; 4] = [1.0, 0.25, 0.05, 0.01];

// Encounter defaults
pub const RESPAWN_DELAY_TICKS: u32 = 2;
pub const WEAKNESS_DAMAGE_MULTIPLIER: f64 = 1.10;
pub const MAX_TICKS_PER_ENCOUNTER: u64 = 6_000;
