//! Question data structures.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::constants::ANSWER_DECIMAL_PLACES;

/// The closed set of arithmetic operators a question can use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    #[serde(alias = "+", alias = "addition")]
    Add,
    #[serde(alias = "-", alias = "subtraction")]
    Subtract,
    #[serde(alias = "*", alias = "multiplication")]
    Multiply,
    #[serde(alias = "/", alias = "division")]
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    pub fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '*',
            Self::Divide => '/',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "Addition",
            Self::Subtract => "Subtraction",
            Self::Multiply => "Multiplication",
            Self::Divide => "Division",
        }
    }

    /// Computes `left <op> right` exactly in floating point.
    ///
    /// Division follows IEEE semantics, so a zero divisor yields an infinite
    /// or NaN result. The generator never emits one.
    pub fn apply(&self, left: i64, right: i64) -> f64 {
        let (l, r) = (left as f64, right as f64);
        match self {
            Self::Add => l + r,
            Self::Subtract => l - r,
            Self::Multiply => l * r,
            Self::Divide => l / r,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Rounds a result to the number of decimal places answers are checked at.
pub fn round_answer(value: f64) -> f64 {
    let scale = 10f64.powi(ANSWER_DECIMAL_PLACES);
    (value * scale).round() / scale
}

/// One arithmetic question and its correct answer.
#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub left: i64,
    pub operator: Operator,
    pub right: i64,
    /// Correct answer, rounded to two decimal places
    pub answer: f64,
}

impl Question {
    pub fn new(left: i64, operator: Operator, right: i64) -> Self {
        Self {
            left,
            operator,
            right,
            answer: round_answer(operator.apply(left, right)),
        }
    }

    /// Builds `divisor * quotient / divisor`, whose answer is exactly `quotient`.
    ///
    /// If the product overflows, the dividend saturates and the answer is
    /// computed from what is shown.
    pub fn division(divisor: i64, quotient: i64) -> Self {
        match divisor.checked_mul(quotient) {
            Some(left) => Self {
                left,
                operator: Operator::Divide,
                right: divisor,
                answer: quotient as f64,
            },
            None => Self::new(divisor.saturating_mul(quotient), Operator::Divide, divisor),
        }
    }

    /// The question as shown to the player, e.g. `7 + 5 = ?`.
    pub fn prompt(&self) -> String {
        format!("{} = ?", self)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}
