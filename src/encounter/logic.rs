//! Encounter state transitions.
//!
//! `AwaitingQuestion -> AwaitingAnswer -> Resolving`, then back to
//! `AwaitingQuestion`, through `MonsterDefeated -> SpawnNext`, or into one
//! of the terminal phases.

use std::time::Duration;

use rand::Rng;

use super::{BattleEvent, Phase, RunState};
use crate::answer::{evaluate, OutcomeKind};
use crate::config::OperatorPolicy;
use crate::question::{generate, Operator, Question};

/// Operator hint for the next question under the run's operator policy.
pub fn operator_hint(state: &RunState) -> Option<Operator> {
    match state.rules.operator_policy {
        OperatorPolicy::Uniform => None,
        OperatorPolicy::MonsterAffinity => state.monster.affinity,
    }
}

/// Draws a fresh question and waits for its answer.
///
/// Returns `None` unless the run is awaiting a question.
pub fn next_question<R: Rng + ?Sized>(state: &mut RunState, rng: &mut R) -> Option<Question> {
    if state.phase != Phase::AwaitingQuestion {
        tracing::warn!(phase = ?state.phase, "question requested out of turn");
        return None;
    }

    let question = generate(&state.difficulty, operator_hint(state), rng);
    tracing::debug!(question = %question, answer = question.answer, "question asked");

    state.questions.push(question.clone());
    state.current_question = Some(question.clone());
    state.phase = Phase::AwaitingAnswer;
    Some(question)
}

/// Evaluates the reply to the current question and resolves the turn.
///
/// Every submission counts as one turn, invalid input included. Returns the
/// events the turn produced; empty if no question was pending.
pub fn submit_answer<R: Rng + ?Sized>(
    state: &mut RunState,
    elapsed: Duration,
    submitted: &str,
    rng: &mut R,
) -> Vec<BattleEvent> {
    if state.phase != Phase::AwaitingAnswer {
        tracing::warn!(phase = ?state.phase, "answer submitted out of turn");
        return Vec::new();
    }
    let Some(question) = state.current_question.take() else {
        state.phase = Phase::AwaitingQuestion;
        return Vec::new();
    };
    state.phase = Phase::Resolving;
    state.turns += 1;

    let outcome = evaluate(
        elapsed,
        state.difficulty.time_limit,
        submitted,
        question.answer,
        state.difficulty.reward,
        state.difficulty.penalty,
    );

    let mut monster_delta = outcome.monster_hp_delta;
    if outcome.kind == OutcomeKind::Correct {
        monster_delta -= state.rules.bonus_damage(state.level) as i64;
    }
    state.player.apply_hp_delta(outcome.player_hp_delta);
    state.monster.apply_hp_delta(monster_delta);
    state.player.score = state.player.score.saturating_add(outcome.score_delta);

    tracing::debug!(
        turn = state.turns,
        kind = ?outcome.kind,
        elapsed_ms = elapsed.as_millis() as u64,
        player_hp = state.player.hp,
        monster_hp = state.monster.current_hp,
        "answer resolved"
    );

    let mut events = vec![BattleEvent::Answered {
        question,
        outcome,
        damage: monster_delta.unsigned_abs() as u32,
    }];
    resolve(state, rng, &mut events);
    events
}

/// Checks for the end of the encounter after deltas have been applied.
/// Player defeat is checked before monster defeat.
fn resolve<R: Rng + ?Sized>(state: &mut RunState, rng: &mut R, events: &mut Vec<BattleEvent>) {
    if !state.player.is_alive() {
        state.phase = Phase::PlayerDefeated;
        tracing::info!(
            by = %state.monster.name,
            score = state.player.score,
            defeated = state.log.defeated_count(),
            "player defeated"
        );
        events.push(BattleEvent::PlayerDefeated {
            by: state.monster.name.clone(),
        });
    } else if !state.monster.is_alive() {
        state.phase = Phase::MonsterDefeated;
        let name = state.monster.name.clone();
        state.log.record_defeat(&name);

        let score_bonus = state.rules.defeat_bonus(state.level);
        state.player.score = state.player.score.saturating_add(score_bonus);
        let healed = state.player.heal(state.rules.heal_on_defeat);
        tracing::info!(monster = %name, score_bonus, healed, "monster defeated");
        events.push(BattleEvent::MonsterDefeated {
            name,
            score_bonus,
            healed,
        });

        state.phase = Phase::SpawnNext;
        spawn_next(state, rng, events);
    } else {
        state.phase = Phase::AwaitingQuestion;
    }
}

/// Spawns a new monster, leveling up first if the leveling policy says so.
fn spawn_next<R: Rng + ?Sized>(state: &mut RunState, rng: &mut R, events: &mut Vec<BattleEvent>) {
    if let Some(policy) = state.rules.leveling {
        if policy.levels_up_at(state.log.defeated_count()) {
            state.level += 1;
            tracing::info!(level = state.level, "level up");
            events.push(BattleEvent::LevelUp { level: state.level });
        }
    }

    let Some(template) = state.pick_template(rng) else {
        tracing::warn!("monster pool is empty, ending run");
        state.phase = Phase::UserExit;
        return;
    };
    let bonus_hp = state
        .difficulty
        .reward
        .saturating_add(state.rules.bonus_hp(state.level));
    state.monster = template.instantiate(bonus_hp);
    state.log.record_encounter(&state.monster.name);
    tracing::info!(monster = %state.monster.name, max_hp = state.monster.max_hp, "monster spawned");

    events.push(BattleEvent::MonsterSpawned {
        name: state.monster.name.clone(),
        max_hp: state.monster.max_hp,
    });
    state.phase = Phase::AwaitingQuestion;
}

/// Ends the run at the player's request.
///
/// Only allowed while awaiting a question or an answer; returns whether the
/// run ended.
pub fn exit_run(state: &mut RunState) -> bool {
    if !state.phase.is_awaiting() {
        return false;
    }
    state.current_question = None;
    state.phase = Phase::UserExit;
    tracing::info!(
        score = state.player.score,
        turns = state.turns,
        "player left the arena"
    );
    true
}
