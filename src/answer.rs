//! Answer evaluation.
//!
//! Turns a raw reply into an [`Outcome`] carrying HP and score deltas. The
//! caller applies the deltas; nothing here touches game state.

use std::time::Duration;

use crate::core::constants::{ANSWER_TOLERANCE, EXIT_KEYWORDS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    TooSlow,
    Correct,
    Incorrect,
    InvalidInput,
}

impl OutcomeKind {
    /// Whether the outcome costs the player HP.
    pub fn is_penalty(&self) -> bool {
        !matches!(self, Self::Correct)
    }
}

/// Result of evaluating one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub player_hp_delta: i64,
    pub monster_hp_delta: i64,
    pub score_delta: u32,
}

impl Outcome {
    fn penalty(kind: OutcomeKind, penalty: u32) -> Self {
        Self {
            kind,
            player_hp_delta: -(penalty as i64),
            monster_hp_delta: 0,
            score_delta: 0,
        }
    }

    fn correct(reward: u32) -> Self {
        Self {
            kind: OutcomeKind::Correct,
            player_hp_delta: 0,
            monster_hp_delta: -(reward as i64),
            score_delta: reward,
        }
    }
}

/// What the player sent back for a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerReply {
    /// Free text to be evaluated
    Answer(String),
    /// An exit keyword or an interrupt
    Exit,
}

impl PlayerReply {
    /// Classifies a submitted line. `exit` and `quit` (any case) end the run.
    pub fn from_line(line: &str) -> Self {
        let trimmed = line.trim();
        if EXIT_KEYWORDS
            .iter()
            .any(|keyword| trimmed.eq_ignore_ascii_case(keyword))
        {
            Self::Exit
        } else {
            Self::Answer(line.to_string())
        }
    }
}

/// Parses a submitted answer. Non-finite values are rejected like any other
/// unparseable text.
pub fn parse_answer(submitted: &str) -> Option<f64> {
    submitted
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
}

/// Evaluates a submitted answer.
///
/// Checks run in a fixed order: unparseable text, then the deadline, then
/// correctness. A late answer is too slow even when it is right. Correctness
/// uses a fixed absolute tolerance of 0.01, so large answers still need a
/// near-exact match.
pub fn evaluate(
    elapsed: Duration,
    deadline: Duration,
    submitted: &str,
    correct: f64,
    reward: u32,
    penalty: u32,
) -> Outcome {
    let Some(value) = parse_answer(submitted) else {
        return Outcome::penalty(OutcomeKind::InvalidInput, penalty);
    };

    if elapsed > deadline {
        Outcome::penalty(OutcomeKind::TooSlow, penalty)
    } else if (value - correct).abs() < ANSWER_TOLERANCE {
        Outcome::correct(reward)
    } else {
        Outcome::penalty(OutcomeKind::Incorrect, penalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEADLINE: Duration = Duration::from_secs(6);

    fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn test_correct_answer_in_time() {
        let outcome = evaluate(secs(2), DEADLINE, "12", 12.0, 10, 5);
        assert_eq!(outcome.kind, OutcomeKind::Correct);
        assert_eq!(outcome.monster_hp_delta, -10);
        assert_eq!(outcome.score_delta, 10);
        assert_eq!(outcome.player_hp_delta, 0);
    }

    #[test]
    fn test_late_correct_answer_is_too_slow() {
        let outcome = evaluate(secs(7), DEADLINE, "12", 12.0, 10, 5);
        assert_eq!(outcome.kind, OutcomeKind::TooSlow);
        assert_eq!(outcome.player_hp_delta, -5);
        assert_eq!(outcome.monster_hp_delta, 0);
        assert_eq!(outcome.score_delta, 0);
    }

    #[test]
    fn test_exactly_at_deadline_is_in_time() {
        let outcome = evaluate(DEADLINE, DEADLINE, "12", 12.0, 10, 5);
        assert_eq!(outcome.kind, OutcomeKind::Correct);
    }

    #[test]
    fn test_wrong_answer() {
        let outcome = evaluate(secs(1), DEADLINE, "13", 12.0, 10, 5);
        assert_eq!(outcome.kind, OutcomeKind::Incorrect);
        assert_eq!(outcome.player_hp_delta, -5);
        assert_eq!(outcome.monster_hp_delta, 0);
    }

    #[test]
    fn test_invalid_input_checked_before_deadline() {
        let outcome = evaluate(secs(60), DEADLINE, "twelve", 12.0, 10, 5);
        assert_eq!(outcome.kind, OutcomeKind::InvalidInput);
        assert_eq!(outcome.player_hp_delta, -5);
        assert_eq!(outcome.monster_hp_delta, 0);
        assert_eq!(outcome.score_delta, 0);
    }

    #[test]
    fn test_non_finite_is_invalid() {
        for text in ["inf", "NaN", "-infinity", ""] {
            let outcome = evaluate(secs(1), DEADLINE, text, 12.0, 10, 5);
            assert_eq!(outcome.kind, OutcomeKind::InvalidInput, "{text}");
        }
    }

    #[test]
    fn test_decimal_forms_accepted() {
        assert_eq!(evaluate(secs(1), DEADLINE, "6.0", 6.0, 10, 5).kind, OutcomeKind::Correct);
        assert_eq!(evaluate(secs(1), DEADLINE, " 6 ", 6.0, 10, 5).kind, OutcomeKind::Correct);
        assert_eq!(evaluate(secs(1), DEADLINE, "3.33", 3.33, 10, 5).kind, OutcomeKind::Correct);
    }

    #[test]
    fn test_tolerance_is_absolute() {
        assert_eq!(
            evaluate(secs(1), DEADLINE, "12.005", 12.0, 10, 5).kind,
            OutcomeKind::Correct
        );
        assert_eq!(
            evaluate(secs(1), DEADLINE, "12.02", 12.0, 10, 5).kind,
            OutcomeKind::Incorrect
        );
        // No relative slack for big answers.
        assert_eq!(
            evaluate(secs(1), DEADLINE, "1000000.5", 1_000_000.0, 10, 5).kind,
            OutcomeKind::Incorrect
        );
    }

    #[test]
    fn test_exit_keywords() {
        assert_eq!(PlayerReply::from_line("exit"), PlayerReply::Exit);
        assert_eq!(PlayerReply::from_line("  QUIT "), PlayerReply::Exit);
        assert_eq!(PlayerReply::from_line("Exit"), PlayerReply::Exit);
        assert_eq!(
            PlayerReply::from_line("12"),
            PlayerReply::Answer("12".to_string())
        );
        assert_eq!(
            PlayerReply::from_line("exiting"),
            PlayerReply::Answer("exiting".to_string())
        );
    }

    #[test]
    fn test_penalty_kinds() {
        assert!(!OutcomeKind::Correct.is_penalty());
        assert!(OutcomeKind::TooSlow.is_penalty());
        assert!(OutcomeKind::Incorrect.is_penalty());
        assert!(OutcomeKind::InvalidInput.is_penalty());
    }
}
