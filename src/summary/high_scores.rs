//! In-memory high score table. Lives only as long as the process.

use chrono::{Local, NaiveTime};

use crate::core::constants::{GOOD_SCORE_THRESHOLD, HIGH_SCORE_TABLE_SIZE};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighScoreEntry {
    pub name: String,
    pub score: u32,
    /// Wall-clock time the run ended, `HH:MM`
    pub recorded_at: String,
}

impl HighScoreEntry {
    pub fn describe(&self) -> String {
        format!("{} - {} pts ({})", self.name, self.score, self.recorded_at)
    }
}

#[derive(Debug, Clone, Default)]
pub struct HighScoreBoard {
    entries: Vec<HighScoreEntry>,
}

impl HighScoreBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished run at the current local time.
    pub fn record(&mut self, name: &str, score: u32) -> &HighScoreEntry {
        self.record_at(name, score, Local::now().time())
    }

    pub fn record_at(&mut self, name: &str, score: u32, time: NaiveTime) -> &HighScoreEntry {
        self.entries.push(HighScoreEntry {
            name: name.to_string(),
            score,
            recorded_at: time.format("%H:%M").to_string(),
        });
        tracing::debug!(name, score, total = self.entries.len(), "high score recorded");
        &self.entries[self.entries.len() - 1]
    }

    /// Best entries first. Ties keep the order they were recorded in.
    pub fn top(&self, n: usize) -> Vec<&HighScoreEntry> {
        let mut ranked: Vec<&HighScoreEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(n);
        ranked
    }

    /// The standard top-five table.
    pub fn leaders(&self) -> Vec<&HighScoreEntry> {
        self.top(HIGH_SCORE_TABLE_SIZE)
    }

    /// Number of runs that scored at least 50.
    pub fn good_runs(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.score >= GOOD_SCORE_THRESHOLD)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
