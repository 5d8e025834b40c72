//! End-of-run reporting.
//!
//! Everything here is derived from finished logs and never mutates them, so
//! deriving twice gives the same answer.

pub mod high_scores;

use crate::core::constants::SUMMARY_QUESTION_PREVIEW;
use crate::encounter::{EncounterLog, Phase, RunState};
use crate::monster::MonsterTemplate;

pub use high_scores::{HighScoreBoard, HighScoreEntry};

/// Monster statistics for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonsterReport {
    /// Catalog entries that were met, in catalog order
    pub encountered: Vec<MonsterTemplate>,
    /// Defeated names in defeat order
    pub defeated: Vec<String>,
    /// Sum of base HP over `encountered`
    pub total_encountered_hp: u32,
    /// Encountered entries whose base HP is above the tough threshold
    pub tough: Vec<MonsterTemplate>,
}

pub fn monster_report(
    log: &EncounterLog,
    catalog: &[MonsterTemplate],
    tough_threshold: u32,
) -> MonsterReport {
    let encountered: Vec<MonsterTemplate> = catalog
        .iter()
        .filter(|m| log.encountered.contains(&m.name))
        .cloned()
        .collect();
    let total_encountered_hp = encountered
        .iter()
        .fold(0u32, |sum, m| sum.saturating_add(m.base_hp));
    let tough = encountered
        .iter()
        .filter(|m| m.base_hp > tough_threshold)
        .cloned()
        .collect();

    MonsterReport {
        encountered,
        defeated: log.defeated.clone(),
        total_encountered_hp,
        tough,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunEnding {
    PlayerDefeated,
    UserExit,
    /// Summarised before the run finished
    InProgress,
}

impl RunEnding {
    pub fn from_phase(phase: Phase) -> Self {
        match phase {
            Phase::PlayerDefeated => Self::PlayerDefeated,
            Phase::UserExit => Self::UserExit,
            _ => Self::InProgress,
        }
    }
}

/// Everything the game-over screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub hero: String,
    pub difficulty: String,
    pub score: u32,
    pub level: u32,
    pub turns: u32,
    pub questions_asked: usize,
    pub first_questions: Vec<String>,
    pub ending: RunEnding,
    pub monsters: MonsterReport,
}

impl RunSummary {
    pub fn from_state(state: &RunState, catalog: &[MonsterTemplate]) -> Self {
        Self {
            hero: state.player.name.clone(),
            difficulty: state.difficulty.name.clone(),
            score: state.player.score,
            level: state.level,
            turns: state.turns,
            questions_asked: state.questions.len(),
            first_questions: state
                .questions
                .iter()
                .take(SUMMARY_QUESTION_PREVIEW)
                .map(|q| q.prompt())
                .collect(),
            ending: RunEnding::from_phase(state.phase),
            monsters: monster_report(&state.log, catalog, state.rules.tough_threshold),
        }
    }

    pub fn defeated_count(&self) -> usize {
        self.monsters.defeated.len()
    }
}
