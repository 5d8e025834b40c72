//! Property tests for question generation and answer evaluation.

use std::time::Duration;

use math_arena::answer::{evaluate, OutcomeKind};
use math_arena::config::{DifficultyConfig, OperandRange};
use math_arena::question::{generate, Operator};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn arb_classic_difficulty() -> impl Strategy<Value = DifficultyConfig> {
    prop_oneof![
        Just(DifficultyConfig::easy()),
        Just(DifficultyConfig::medium()),
        Just(DifficultyConfig::hard()),
    ]
}

fn arb_hint() -> impl Strategy<Value = Option<Operator>> {
    prop_oneof![
        Just(None),
        Just(Some(Operator::Add)),
        Just(Some(Operator::Subtract)),
        Just(Some(Operator::Multiply)),
        Just(Some(Operator::Divide)),
    ]
}

proptest! {
    #[test]
    fn prop_division_never_by_zero_and_whole(
        seed in any::<u64>(),
        min in 1i64..50,
        span in 0i64..50,
    ) {
        let mut difficulty = DifficultyConfig::hard();
        difficulty.operators = vec![Operator::Divide];
        difficulty.divide_range = Some(OperandRange::new(min, min + span));
        let mut rng = ChaCha8Rng::seed_from_u64(seed);

        let q = generate(&difficulty, None, &mut rng);
        prop_assert_eq!(q.operator, Operator::Divide);
        prop_assert_ne!(q.right, 0);
        prop_assert_eq!(q.answer.fract(), 0.0);
        prop_assert_eq!(q.left, q.right * q.answer as i64);
    }

    #[test]
    fn prop_subtraction_never_negative(seed in any::<u64>(), difficulty in arb_classic_difficulty()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let q = generate(&difficulty, Some(Operator::Subtract), &mut rng);
        prop_assert_eq!(q.operator, Operator::Subtract);
        prop_assert!(q.answer >= 0.0, "{} gave {}", q, q.answer);
    }

    #[test]
    fn prop_generated_operator_is_allowed(
        seed in any::<u64>(),
        difficulty in arb_classic_difficulty(),
        hint in arb_hint(),
    ) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let q = generate(&difficulty, hint, &mut rng);
        prop_assert!(difficulty.allows(q.operator));
        if let Some(op) = hint.filter(|op| difficulty.allows(*op)) {
            prop_assert_eq!(q.operator, op);
        }
    }

    #[test]
    fn prop_late_answers_are_too_slow(
        deadline_ms in 1u64..10_000,
        late_by_ms in 1u64..10_000,
        correct in -1000i64..1000,
        reward in 1u32..100,
        penalty in 1u32..100,
    ) {
        let outcome = evaluate(
            Duration::from_millis(deadline_ms + late_by_ms),
            Duration::from_millis(deadline_ms),
            &correct.to_string(),
            correct as f64,
            reward,
            penalty,
        );
        prop_assert_eq!(outcome.kind, OutcomeKind::TooSlow);
        prop_assert_eq!(outcome.player_hp_delta, -(penalty as i64));
        prop_assert_eq!(outcome.monster_hp_delta, 0);
        prop_assert_eq!(outcome.score_delta, 0);
    }

    #[test]
    fn prop_unparseable_input_costs_penalty_only(
        text in "[a-zA-Z ?!]{0,12}",
        elapsed_ms in 0u64..20_000,
        penalty in 1u32..100,
    ) {
        // "inf" and "nan" spellings parse as floats but are rejected too.
        let outcome = evaluate(
            Duration::from_millis(elapsed_ms),
            Duration::from_secs(6),
            &text,
            12.0,
            10,
            penalty,
        );
        prop_assert_eq!(outcome.kind, OutcomeKind::InvalidInput);
        prop_assert_eq!(outcome.player_hp_delta, -(penalty as i64));
        prop_assert_eq!(outcome.monster_hp_delta, 0);
        prop_assert_eq!(outcome.score_delta, 0);
    }
}
