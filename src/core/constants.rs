// Player
pub const PLAYER_MAX_HP: u32 = 100;
pub const DEFAULT_HERO_NAME: &str = "Hero";
pub const MAX_HERO_NAME_LEN: usize = 16;

// Encounter rewards
pub const DEFEAT_HEAL_HP: u32 = 15;
pub const DEFEAT_SCORE_BONUS: u32 = 20;

// Answer checking
pub const ANSWER_TOLERANCE: f64 = 0.01;
pub const ANSWER_DECIMAL_PLACES: i32 = 2;
pub const EXIT_KEYWORDS: [&str; 2] = ["exit", "quit"];

// Classic operand ranges for the tractable operators
pub const SMALL_OPERAND_MIN: i64 = 2;
pub const SMALL_OPERAND_MAX: i64 = 12;
/// Largest operand magnitude a config may ask for. Keeps products inside
/// `i64` and answers exact in `f64`.
pub const MAX_OPERAND_MAGNITUDE: u64 = 1_000_000;

// Leveling (only used when a leveling policy is configured)
pub const DEFEATS_PER_LEVEL: u32 = 3;
pub const LEVEL_BONUS_DAMAGE: u32 = 2;
pub const LEVEL_BONUS_HP: u32 = 10;
pub const LEVEL_BONUS_SCORE: u32 = 5;

// Reporting
pub const TOUGH_MONSTER_THRESHOLD: u32 = 40;
pub const HIGH_SCORE_TABLE_SIZE: usize = 5;
pub const GOOD_SCORE_THRESHOLD: u32 = 50;
pub const SUMMARY_QUESTION_PREVIEW: usize = 3;

// Terminal timing
pub const INPUT_POLL_MS: u64 = 50;
pub const COUNTDOWN_TICK_MS: u64 = 100;
