//! Game configuration: difficulties, the monster catalog, and run rules.
//!
//! The built-in defaults reproduce the classic arena. A TOML file may
//! replace any top-level section:
//!
//! ```toml
//! [rules]
//! operator_policy = "uniform"
//!
//! [[difficulties]]
//! name = "Warmup"
//! operators = ["+"]
//! operand_range = { min = 1, max = 10 }
//! time_limit_secs = 8
//! reward = 10
//! penalty = 5
//! ```

pub mod difficulty;
pub mod rules;

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::core::error::{ConfigError, Result};
use crate::monster::{classic_catalog, MonsterTemplate};

pub use difficulty::{parse_choice, DifficultyConfig, OperandRange};
pub use rules::{LevelingPolicy, OperatorPolicy, RunRules};

pub const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub rules: RunRules,
    pub difficulties: Vec<DifficultyConfig>,
    pub monsters: Vec<MonsterTemplate>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rules: RunRules::default(),
            difficulties: DifficultyConfig::classic(),
            monsters: classic_catalog(),
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Loads a config file. Missing sections fall back to the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when given, otherwise the platform config file if one
    /// exists, otherwise the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => match default_config_path() {
                Some(path) if path.exists() => Self::load(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Validates everything a run depends on. Called once before the first
    /// encounter; a config that passes cannot fail mid-run.
    pub fn validate(&self) -> Result<()> {
        if self.difficulties.is_empty() {
            return Err(ConfigError::NoDifficulties);
        }
        if self.monsters.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        if let Some(monster) = self.monsters.iter().find(|m| m.base_hp == 0) {
            return Err(ConfigError::ZeroBaseHp(monster.name.clone()));
        }
        for difficulty in &self.difficulties {
            difficulty.validate()?;
            if let Some(unknown) = difficulty
                .monsters
                .iter()
                .find(|name| !self.monsters.iter().any(|m| &m.name == *name))
            {
                return Err(ConfigError::UnknownMonster {
                    difficulty: difficulty.name.clone(),
                    monster: unknown.clone(),
                });
            }
            if self.monster_pool(difficulty).is_empty() {
                return Err(ConfigError::EmptyMonsterPool(difficulty.name.clone()));
            }
        }
        Ok(())
    }

    /// Looks up a difficulty by its zero-based menu index.
    pub fn difficulty(&self, index: usize) -> Result<&DifficultyConfig> {
        self.difficulties
            .get(index)
            .ok_or(ConfigError::DifficultyOutOfRange {
                index: index + 1,
                count: self.difficulties.len(),
            })
    }

    /// Catalog entries a difficulty spawns from.
    pub fn monster_pool(&self, difficulty: &DifficultyConfig) -> Vec<MonsterTemplate> {
        if difficulty.monsters.is_empty() {
            return self.monsters.clone();
        }
        self.monsters
            .iter()
            .filter(|m| difficulty.monsters.contains(&m.name))
            .cloned()
            .collect()
    }
}

/// `<config dir>/math-arena/config.toml` for the current platform.
pub fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "math-arena").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}
