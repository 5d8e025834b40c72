//! Encounter data structures.

use std::collections::BTreeSet;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::answer::Outcome;
use crate::config::{DifficultyConfig, GameConfig, RunRules};
use crate::core::constants::{DEFAULT_HERO_NAME, MAX_HERO_NAME_LEN, PLAYER_MAX_HP};
use crate::core::error::{ConfigError, Result};
use crate::monster::{MonsterInstance, MonsterTemplate};
use crate::question::Question;

/// Cleans up a typed hero name: trimmed, first letter upper-cased, the rest
/// lower-cased, and at most 16 characters. Blank input becomes "Hero".
pub fn hero_name(raw: &str) -> String {
    let trimmed: String = raw.trim().chars().take(MAX_HERO_NAME_LEN).collect();
    let mut chars = trimmed.trim_end().chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(|c| c.to_lowercase()))
            .collect(),
        None => DEFAULT_HERO_NAME.to_string(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    /// Signed so a penalty can overshoot zero before the defeat check
    pub hp: i64,
    pub score: u32,
}

impl Player {
    pub fn new(name: &str) -> Self {
        Self {
            name: hero_name(name),
            hp: PLAYER_MAX_HP as i64,
            score: 0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn apply_hp_delta(&mut self, delta: i64) {
        self.hp += delta;
    }

    /// Restores up to `amount` HP without passing the maximum.
    /// Returns the HP actually gained.
    pub fn heal(&mut self, amount: u32) -> u32 {
        let before = self.hp;
        self.hp = (self.hp + amount as i64).min(PLAYER_MAX_HP as i64);
        (self.hp - before).max(0) as u32
    }

    /// HP clamped at zero, for display.
    pub fn display_hp(&self) -> u32 {
        self.hp.clamp(0, PLAYER_MAX_HP as i64) as u32
    }

    pub fn hp_ratio(&self) -> f64 {
        self.display_hp() as f64 / PLAYER_MAX_HP as f64
    }
}

/// Where a run is in its turn cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingQuestion,
    AwaitingAnswer,
    Resolving,
    MonsterDefeated,
    SpawnNext,
    PlayerDefeated,
    UserExit,
}

impl Phase {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::PlayerDefeated | Self::UserExit)
    }

    /// Phases from which the player may walk away.
    pub fn is_awaiting(&self) -> bool {
        matches!(self, Self::AwaitingQuestion | Self::AwaitingAnswer)
    }
}

/// Monsters met and monsters beaten during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EncounterLog {
    /// Distinct names, kept sorted for display
    pub encountered: BTreeSet<String>,
    /// Names in the order they were defeated
    pub defeated: Vec<String>,
}

impl EncounterLog {
    pub fn record_encounter(&mut self, name: &str) {
        self.encountered.insert(name.to_string());
    }

    pub fn record_defeat(&mut self, name: &str) {
        self.defeated.push(name.to_string());
    }

    pub fn defeated_count(&self) -> usize {
        self.defeated.len()
    }
}

/// Something that happened while resolving a turn, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum BattleEvent {
    Answered {
        question: Question,
        outcome: Outcome,
        /// Damage dealt to the monster, including any level bonus
        damage: u32,
    },
    MonsterDefeated {
        name: String,
        score_bonus: u32,
        healed: u32,
    },
    LevelUp {
        level: u32,
    },
    MonsterSpawned {
        name: String,
        max_hp: u32,
    },
    PlayerDefeated {
        by: String,
    },
    Exited,
}

/// Complete state of one run. Every transition takes it explicitly.
#[derive(Debug, Clone)]
pub struct RunState {
    pub player: Player,
    pub difficulty: DifficultyConfig,
    pub rules: RunRules,
    /// Non-empty; checked in [`RunState::new`]
    pool: Vec<MonsterTemplate>,
    pub monster: MonsterInstance,
    pub phase: Phase,
    pub level: u32,
    pub turns: u32,
    pub current_question: Option<Question>,
    /// Every question asked, in order
    pub questions: Vec<Question>,
    pub log: EncounterLog,
}

impl RunState {
    /// Starts a run on the difficulty at `difficulty_index` and spawns the
    /// first monster.
    pub fn new<R: Rng + ?Sized>(
        config: &GameConfig,
        difficulty_index: usize,
        hero: &str,
        rng: &mut R,
    ) -> Result<Self> {
        let difficulty = config.difficulty(difficulty_index)?.clone();
        difficulty.validate()?;
        let pool = config.monster_pool(&difficulty);
        let Some(template) = pool.choose(rng) else {
            return Err(ConfigError::EmptyMonsterPool(difficulty.name.clone()));
        };

        let level = 1;
        let monster =
            template.instantiate(difficulty.reward.saturating_add(config.rules.bonus_hp(level)));
        let mut log = EncounterLog::default();
        log.record_encounter(&monster.name);

        tracing::info!(
            hero = hero,
            difficulty = %difficulty.name,
            first_monster = %monster.name,
            "run started"
        );

        Ok(Self {
            player: Player::new(hero),
            difficulty,
            rules: config.rules.clone(),
            pool,
            monster,
            phase: Phase::AwaitingQuestion,
            level,
            turns: 0,
            current_question: None,
            questions: Vec::new(),
            log,
        })
    }

    pub fn is_over(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Next monster to spawn. `None` only if the pool is empty, which
    /// [`RunState::new`] rules out.
    pub(crate) fn pick_template<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<MonsterTemplate> {
        self.pool.choose(rng).cloned()
    }
}
