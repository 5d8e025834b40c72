//! The encounter state machine and the turn loop that drives it.

pub mod driver;
pub mod logic;
pub mod types;

pub use driver::{play_turn, run_to_completion, AnswerSource, Clock, SystemClock};
pub use logic::{exit_run, next_question, operator_hint, submit_answer};
pub use types::{hero_name, BattleEvent, EncounterLog, Phase, Player, RunState};
