//! Question generation.
//!
//! Generation is a pure function of the difficulty, an optional operator hint,
//! and the random source, so seeding the RNG makes it fully reproducible.

use rand::seq::SliceRandom;
use rand::Rng;

use super::{Operator, Question};
use crate::config::DifficultyConfig;

/// Picks the operator for the next question.
///
/// A hint is honoured only when the difficulty allows it; otherwise the
/// choice is uniform over the allowed operators.
pub fn choose_operator<R: Rng + ?Sized>(
    difficulty: &DifficultyConfig,
    hint: Option<Operator>,
    rng: &mut R,
) -> Operator {
    if let Some(op) = hint.filter(|op| difficulty.allows(*op)) {
        return op;
    }
    difficulty
        .allowed_operators()
        .choose(rng)
        .copied()
        .unwrap_or(Operator::Add)
}

/// Generates one question for `difficulty`.
pub fn generate<R: Rng + ?Sized>(
    difficulty: &DifficultyConfig,
    hint: Option<Operator>,
    rng: &mut R,
) -> Question {
    let operator = choose_operator(difficulty, hint, rng);
    match operator {
        Operator::Add => {
            let range = difficulty.operand_range;
            Question::new(range.sample(rng), Operator::Add, range.sample(rng))
        }
        Operator::Subtract => {
            let range = difficulty.operand_range;
            let (a, b) = (range.sample(rng), range.sample(rng));
            // Never show a negative result.
            let (left, right) = if a < b { (b, a) } else { (a, b) };
            Question::new(left, Operator::Subtract, right)
        }
        Operator::Multiply => {
            let range = difficulty.multiply_range();
            Question::new(range.sample(rng), Operator::Multiply, range.sample(rng))
        }
        Operator::Divide => {
            // Build the dividend from the answer so the quotient is whole.
            let range = difficulty.divide_range();
            let divisor = range.sample(rng);
            let quotient = range.sample(rng);
            Question::division(divisor, quotient)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OperandRange;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn create_test_rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(12345)
    }

    fn only(op: Operator) -> DifficultyConfig {
        let mut difficulty = DifficultyConfig::hard();
        difficulty.operators = vec![op];
        difficulty
    }

    #[test]
    fn test_allowed_hint_is_used() {
        let mut rng = create_test_rng();
        let difficulty = DifficultyConfig::hard();
        for _ in 0..50 {
            let q = generate(&difficulty, Some(Operator::Divide), &mut rng);
            assert_eq!(q.operator, Operator::Divide);
        }
    }

    #[test]
    fn test_disallowed_hint_falls_back_to_allowed_set() {
        let mut rng = create_test_rng();
        let difficulty = DifficultyConfig::easy();
        for _ in 0..100 {
            let q = generate(&difficulty, Some(Operator::Multiply), &mut rng);
            assert!(matches!(q.operator, Operator::Add | Operator::Subtract));
        }
    }

    #[test]
    fn test_uniform_choice_reaches_every_operator() {
        let mut rng = create_test_rng();
        let difficulty = DifficultyConfig::hard();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(choose_operator(&difficulty, None, &mut rng));
        }
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_addition_operands_in_range() {
        let mut rng = create_test_rng();
        let difficulty = only(Operator::Add);
        for _ in 0..100 {
            let q = generate(&difficulty, None, &mut rng);
            assert!(difficulty.operand_range.contains(q.left));
            assert!(difficulty.operand_range.contains(q.right));
            assert_eq!(q.answer, (q.left + q.right) as f64);
        }
    }

    #[test]
    fn test_subtraction_never_negative() {
        let mut rng = create_test_rng();
        let difficulty = only(Operator::Subtract);
        for _ in 0..200 {
            let q = generate(&difficulty, None, &mut rng);
            assert!(q.left >= q.right);
            assert!(q.answer >= 0.0);
        }
    }

    #[test]
    fn test_multiplication_uses_small_range() {
        let mut rng = create_test_rng();
        let difficulty = only(Operator::Multiply);
        for _ in 0..100 {
            let q = generate(&difficulty, None, &mut rng);
            assert!(OperandRange::small().contains(q.left));
            assert!(OperandRange::small().contains(q.right));
        }
    }

    #[test]
    fn test_division_is_whole_and_nonzero() {
        let mut rng = create_test_rng();
        let difficulty = only(Operator::Divide);
        for _ in 0..200 {
            let q = generate(&difficulty, None, &mut rng);
            assert_ne!(q.right, 0);
            assert_eq!(q.left % q.right, 0);
            assert_eq!(q.answer, (q.left / q.right) as f64);
            assert_eq!(q.answer.fract(), 0.0);
        }
    }

    #[test]
    fn test_same_seed_same_questions() {
        let difficulty = DifficultyConfig::hard();
        let mut a = create_test_rng();
        let mut b = create_test_rng();
        for _ in 0..20 {
            assert_eq!(
                generate(&difficulty, None, &mut a),
                generate(&difficulty, None, &mut b)
            );
        }
    }
}
