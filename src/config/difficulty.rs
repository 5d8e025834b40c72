//! Difficulty settings and the classic Easy/Medium/Hard presets.

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::constants::{MAX_OPERAND_MAGNITUDE, SMALL_OPERAND_MAX, SMALL_OPERAND_MIN};
use crate::core::error::{ConfigError, Result};
use crate::question::Operator;

/// Inclusive range operands are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperandRange {
    pub min: i64,
    pub max: i64,
}

impl OperandRange {
    pub const fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    pub const fn small() -> Self {
        Self::new(SMALL_OPERAND_MIN, SMALL_OPERAND_MAX)
    }

    pub fn contains(&self, value: i64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn includes_zero(&self) -> bool {
        self.contains(0)
    }

    /// Draws one operand uniformly from the range.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        let (lo, hi) = if self.min <= self.max {
            (self.min, self.max)
        } else {
            (self.max, self.min)
        };
        rng.gen_range(lo..=hi)
    }
}

/// A named bundle of question rules and the reward/penalty applied per answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyConfig {
    pub name: String,
    pub operators: Vec<Operator>,
    pub operand_range: OperandRange,
    /// Narrower range for multiplication; `operand_range` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiply_range: Option<OperandRange>,
    /// Range for both divisor and quotient; `operand_range` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub divide_range: Option<OperandRange>,
    #[serde(rename = "time_limit_secs", with = "duration_secs")]
    pub time_limit: Duration,
    pub reward: u32,
    pub penalty: u32,
    /// Catalog names this difficulty spawns; the whole catalog when empty
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub monsters: Vec<String>,
}

impl DifficultyConfig {
    pub fn easy() -> Self {
        Self {
            name: "Easy".to_string(),
            operators: vec![Operator::Add, Operator::Subtract],
            operand_range: OperandRange::new(1, 20),
            multiply_range: Some(OperandRange::small()),
            divide_range: Some(OperandRange::small()),
            time_limit: Duration::from_secs(6),
            reward: 10,
            penalty: 5,
            monsters: vec!["Addagon".to_string(), "Subtrax".to_string()],
        }
    }

    pub fn medium() -> Self {
        Self {
            name: "Medium".to_string(),
            operators: vec![Operator::Add, Operator::Subtract, Operator::Multiply],
            operand_range: OperandRange::new(5, 50),
            multiply_range: Some(OperandRange::small()),
            divide_range: Some(OperandRange::small()),
            time_limit: Duration::from_secs(5),
            reward: 15,
            penalty: 10,
            monsters: vec!["Multiplex".to_string(), "Calcumancer".to_string()],
        }
    }

    pub fn hard() -> Self {
        Self {
            name: "Hard".to_string(),
            operators: Operator::ALL.to_vec(),
            operand_range: OperandRange::new(10, 99),
            multiply_range: Some(OperandRange::small()),
            divide_range: Some(OperandRange::small()),
            time_limit: Duration::from_secs(4),
            reward: 20,
            penalty: 15,
            monsters: vec!["Dividra".to_string(), "Mathemorph".to_string()],
        }
    }

    /// The three classic modes, in menu order.
    pub fn classic() -> Vec<Self> {
        vec![Self::easy(), Self::medium(), Self::hard()]
    }

    /// Allowed operators with duplicates removed, in canonical order.
    pub fn allowed_operators(&self) -> Vec<Operator> {
        Operator::ALL
            .into_iter()
            .filter(|op| self.operators.contains(op))
            .collect()
    }

    pub fn allows(&self, operator: Operator) -> bool {
        self.operators.contains(&operator)
    }

    pub fn multiply_range(&self) -> OperandRange {
        self.multiply_range.unwrap_or(self.operand_range)
    }

    pub fn divide_range(&self) -> OperandRange {
        self.divide_range.unwrap_or(self.operand_range)
    }

    /// One-line description for menus, e.g. `+ - | 1-20 | 6s`.
    pub fn describe(&self) -> String {
        let ops: Vec<String> = self
            .allowed_operators()
            .iter()
            .map(|op| op.symbol().to_string())
            .collect();
        format!(
            "{} | {}-{} | {}s",
            ops.join(" "),
            self.operand_range.min,
            self.operand_range.max,
            self.time_limit.as_secs_f64()
        )
    }

    /// Checks the rules that must hold before a run may start.
    ///
    /// Monster pool membership is checked by [`GameConfig::validate`](super::GameConfig::validate),
    /// which knows the catalog.
    pub fn validate(&self) -> Result<()> {
        if self.allowed_operators().is_empty() {
            return Err(ConfigError::NoOperators(self.name.clone()));
        }
        let ranges = [
            ("operand", Some(self.operand_range)),
            ("multiplication", self.multiply_range),
            ("division", self.divide_range),
        ];
        for (which, range) in ranges {
            if let Some(range) = range {
                if range.min > range.max {
                    return Err(ConfigError::InvertedRange {
                        difficulty: self.name.clone(),
                        which,
                        min: range.min,
                        max: range.max,
                    });
                }
                if range.min.unsigned_abs() > MAX_OPERAND_MAGNITUDE
                    || range.max.unsigned_abs() > MAX_OPERAND_MAGNITUDE
                {
                    return Err(ConfigError::RangeTooLarge {
                        difficulty: self.name.clone(),
                        which,
                        min: range.min,
                        max: range.max,
                        limit: MAX_OPERAND_MAGNITUDE,
                    });
                }
            }
        }
        if self.allows(Operator::Divide) && self.divide_range().includes_zero() {
            let range = self.divide_range();
            return Err(ConfigError::DivisorRangeIncludesZero {
                difficulty: self.name.clone(),
                min: range.min,
                max: range.max,
            });
        }
        if self.reward == 0 {
            return Err(ConfigError::ZeroReward(self.name.clone()));
        }
        if self.penalty == 0 {
            return Err(ConfigError::ZeroPenalty(self.name.clone()));
        }
        if self.time_limit.is_zero() {
            return Err(ConfigError::ZeroTimeLimit(self.name.clone()));
        }
        Ok(())
    }
}

/// Parses a 1-based menu choice into an index into `count` difficulties.
///
/// Returns `None` for anything that is not an in-range integer, so the caller
/// can re-prompt without touching state.
pub fn parse_choice(input: &str, count: usize) -> Option<usize> {
    let choice: usize = input.trim().parse().ok()?;
    (1..=count).contains(&choice).then(|| choice - 1)
}

/// Serde helper storing a [`Duration`] as fractional seconds.
mod duration_secs {
    use std::time::Duration;

    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(value.as_secs_f64())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        let secs = f64::deserialize(deserializer)?;
        Duration::try_from_secs_f64(secs).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_presets_are_valid() {
        for difficulty in DifficultyConfig::classic() {
            assert!(difficulty.validate().is_ok(), "{} invalid", difficulty.name);
        }
    }

    #[test]
    fn test_easy_preset_values() {
        let easy = DifficultyConfig::easy();
        assert_eq!(easy.operand_range, OperandRange::new(1, 20));
        assert_eq!(easy.time_limit, Duration::from_secs(6));
        assert_eq!(easy.reward, 10);
        assert_eq!(easy.penalty, 5);
        assert_eq!(easy.describe(), "+ - | 1-20 | 6s");
    }

    #[test]
    fn test_oversized_ranges_rejected() {
        let mut difficulty = DifficultyConfig::hard();
        difficulty.divide_range = Some(OperandRange::new(1, i64::MAX));
        assert!(matches!(
            difficulty.validate(),
            Err(ConfigError::RangeTooLarge { which: "division", .. })
        ));

        let mut difficulty = DifficultyConfig::easy();
        difficulty.operand_range = OperandRange::new(-2_000_000, 10);
        assert!(matches!(
            difficulty.validate(),
            Err(ConfigError::RangeTooLarge { which: "operand", .. })
        ));

        let mut difficulty = DifficultyConfig::easy();
        difficulty.operand_range = OperandRange::new(1, MAX_OPERAND_MAGNITUDE as i64);
        assert!(difficulty.validate().is_ok());
    }

    #[test]
    fn test_allowed_operators_deduplicates() {
        let mut difficulty = DifficultyConfig::easy();
        difficulty.operators = vec![Operator::Subtract, Operator::Add, Operator::Subtract];
        assert_eq!(
            difficulty.allowed_operators(),
            vec![Operator::Add, Operator::Subtract]
        );
    }

    #[test]
    fn test_empty_operators_rejected() {
        let mut difficulty = DifficultyConfig::easy();
        difficulty.operators.clear();
        assert!(matches!(
            difficulty.validate(),
            Err(ConfigError::NoOperators(_))
        ));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let mut difficulty = DifficultyConfig::medium();
        difficulty.operand_range = OperandRange::new(50, 5);
        assert!(matches!(
            difficulty.validate(),
            Err(ConfigError::InvertedRange { which: "operand", .. })
        ));
    }

    #[test]
    fn test_zero_divisor_range_rejected() {
        let mut difficulty = DifficultyConfig::hard();
        difficulty.divide_range = Some(OperandRange::new(0, 12));
        assert!(matches!(
            difficulty.validate(),
            Err(ConfigError::DivisorRangeIncludesZero { .. })
        ));

        // The same range is fine when division is not allowed.
        difficulty.operators = vec![Operator::Add];
        assert!(difficulty.validate().is_ok());
    }

    #[test]
    fn test_zero_reward_and_penalty_rejected() {
        let mut difficulty = DifficultyConfig::easy();
        difficulty.reward = 0;
        assert!(matches!(difficulty.validate(), Err(ConfigError::ZeroReward(_))));

        let mut difficulty = DifficultyConfig::easy();
        difficulty.penalty = 0;
        assert!(matches!(difficulty.validate(), Err(ConfigError::ZeroPenalty(_))));

        let mut difficulty = DifficultyConfig::easy();
        difficulty.time_limit = Duration::ZERO;
        assert!(matches!(
            difficulty.validate(),
            Err(ConfigError::ZeroTimeLimit(_))
        ));
    }

    #[test]
    fn test_fallback_ranges() {
        let mut difficulty = DifficultyConfig::hard();
        difficulty.multiply_range = None;
        difficulty.divide_range = None;
        assert_eq!(difficulty.multiply_range(), difficulty.operand_range);
        assert_eq!(difficulty.divide_range(), difficulty.operand_range);
    }

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1", 3), Some(0));
        assert_eq!(parse_choice(" 3 ", 3), Some(2));
        assert_eq!(parse_choice("0", 3), None);
        assert_eq!(parse_choice("4", 3), None);
        assert_eq!(parse_choice("-1", 3), None);
        assert_eq!(parse_choice("two", 3), None);
        assert_eq!(parse_choice("", 3), None);
    }

    #[test]
    fn test_operand_range_sample_stays_in_bounds() {
        use rand::SeedableRng;
        let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(7);
        let range = OperandRange::new(-3, 3);
        for _ in 0..200 {
            assert!(range.contains(range.sample(&mut rng)));
        }
    }
}
