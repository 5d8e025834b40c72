//! Arithmetic question generation.

pub mod generation;
pub mod types;

pub use generation::{choose_operator, generate};
pub use types::{round_answer, Operator, Question};
