//! The blocking turn loop.
//!
//! Each turn asks a question, blocks on one reply, and measures the wall-clock
//! time around that read. Timing is checked after the read returns; a slow
//! reply is never cut off.

use std::io;
use std::time::Instant;

use rand::Rng;

use super::{exit_run, next_question, submit_answer, BattleEvent, RunState};
use crate::answer::PlayerReply;
use crate::question::Question;

/// Source of time for measuring answer latency.
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Where replies come from: the terminal, or a script in tests.
pub trait AnswerSource {
    /// Blocks until the player replies to `question`.
    fn read_reply(&mut self, state: &RunState, question: &Question) -> io::Result<PlayerReply>;

    /// Receives the events each turn produced.
    fn narrate(&mut self, _state: &RunState, _events: &[BattleEvent]) {}
}

/// Plays one turn. Returns the events it produced, or nothing if the run is
/// not awaiting a question.
///
/// A failed read ends the run the same way an exit request does.
pub fn play_turn<S, C, R>(state: &mut RunState, source: &mut S, clock: &C, rng: &mut R) -> Vec<BattleEvent>
where
    S: AnswerSource + ?Sized,
    C: Clock + ?Sized,
    R: Rng + ?Sized,
{
    let Some(question) = next_question(state, rng) else {
        return Vec::new();
    };

    let started = clock.now();
    let reply = source.read_reply(state, &question);
    let elapsed = clock.now().saturating_duration_since(started);

    match reply {
        Ok(PlayerReply::Answer(text)) => submit_answer(state, elapsed, &text, rng),
        Ok(PlayerReply::Exit) => {
            exit_run(state);
            vec![BattleEvent::Exited]
        }
        Err(err) => {
            tracing::warn!(error = %err, "answer read failed, ending run");
            exit_run(state);
            vec![BattleEvent::Exited]
        }
    }
}

/// Plays turns until the player is defeated or leaves.
pub fn run_to_completion<S, C, R>(state: &mut RunState, source: &mut S, clock: &C, rng: &mut R)
where
    S: AnswerSource + ?Sized,
    C: Clock + ?Sized,
    R: Rng + ?Sized,
{
    while !state.is_over() {
        let events = play_turn(state, source, clock, rng);
        if events.is_empty() {
            // Not awaiting a question and not over: nothing can make progress.
            tracing::warn!(phase = ?state.phase, "turn loop stalled, ending run");
            exit_run(state);
            break;
        }
        source.narrate(state, &events);
    }
    tracing::info!(
        phase = ?state.phase,
        score = state.player.score,
        turns = state.turns,
        defeated = state.log.defeated_count(),
        "run finished"
    );
}
