//! Math Arena - terminal arithmetic battler.
//!
//! The library holds the battle engine: question generation, answer
//! evaluation, the encounter state machine, and end-of-run reporting. The
//! terminal front-end lives in the binary.

pub mod answer;
pub mod build_info;
pub mod config;
pub mod core;
pub mod countdown;
pub mod encounter;
pub mod input;
pub mod monster;
pub mod question;
pub mod summary;

pub use answer::{evaluate, Outcome, OutcomeKind, PlayerReply};
pub use config::{DifficultyConfig, GameConfig, RunRules};
pub use core::ConfigError;
pub use encounter::{BattleEvent, Phase, RunState};
pub use question::{generate, Operator, Question};
pub use summary::{monster_report, RunSummary};
