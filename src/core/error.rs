//! Errors raised while loading and validating the game configuration.
//!
//! These are fatal at startup. Nothing in a running encounter produces them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by [`GameConfig`](crate::config::GameConfig) loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no difficulties are configured")]
    NoDifficulties,

    #[error("difficulty '{0}' allows no operators")]
    NoOperators(String),

    #[error("difficulty '{difficulty}' has an inverted {which} range ({min} > {max})")]
    InvertedRange {
        difficulty: String,
        which: &'static str,
        min: i64,
        max: i64,
    },

    #[error("difficulty '{difficulty}' has a {which} range {min}..={max} beyond +/-{limit}")]
    RangeTooLarge {
        difficulty: String,
        which: &'static str,
        min: i64,
        max: i64,
        limit: u64,
    },

    #[error("difficulty '{difficulty}' draws divisors from {min}..={max}, which includes zero")]
    DivisorRangeIncludesZero { difficulty: String, min: i64, max: i64 },

    #[error("difficulty '{0}' must have a positive reward")]
    ZeroReward(String),

    #[error("difficulty '{0}' must have a positive penalty")]
    ZeroPenalty(String),

    #[error("difficulty '{0}' must have a positive time limit")]
    ZeroTimeLimit(String),

    #[error("the monster catalog is empty")]
    EmptyCatalog,

    #[error("monster '{0}' must have a positive base HP")]
    ZeroBaseHp(String),

    #[error("difficulty '{0}' has no monsters to spawn")]
    EmptyMonsterPool(String),

    #[error("difficulty '{difficulty}' lists unknown monster '{monster}'")]
    UnknownMonster { difficulty: String, monster: String },

    #[error("difficulty {index} does not exist (expected 1..={count})")]
    DifficultyOutOfRange { index: usize, count: usize },

    #[error("could not read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
