//! Reads answers from the terminal while the countdown ticks.

use std::io;
use std::time::Duration;

use math_arena::answer::PlayerReply;
use math_arena::core::constants::INPUT_POLL_MS;
use math_arena::countdown::Countdown;
use math_arena::encounter::{AnswerSource, BattleEvent, RunState};
use math_arena::input::{line_input, AnswerLine};
use math_arena::question::Question;

use super::battle_scene::{draw_battle_scene, BattleView};
use super::{next_key, Tui};

pub struct TerminalAnswerSource<'a> {
    terminal: &'a mut Tui,
    view: BattleView,
}

impl<'a> TerminalAnswerSource<'a> {
    pub fn new(terminal: &'a mut Tui, state: &RunState) -> Self {
        let mut view = BattleView::new();
        view.push_events(&[BattleEvent::MonsterSpawned {
            name: state.monster.name.clone(),
            max_hp: state.monster.max_hp,
        }]);
        Self { terminal, view }
    }
}

impl AnswerSource for TerminalAnswerSource<'_> {
    fn read_reply(&mut self, state: &RunState, question: &Question) -> io::Result<PlayerReply> {
        // The ticker only feeds the display; the driver times the read itself.
        let mut countdown = Countdown::start(state.difficulty.time_limit);
        let mut line = AnswerLine::new();

        loop {
            self.view.remaining_secs = countdown.remaining_secs();
            self.view.input.clone_from(&line.text);
            let view = &self.view;
            self.terminal.draw(|f| {
                let area = f.size();
                draw_battle_scene(f, area, state, question, view);
            })?;

            if let Some(key) = next_key(Duration::from_millis(INPUT_POLL_MS))? {
                if let Some(reply) = line.apply(line_input(key)) {
                    countdown.cancel();
                    self.view.input.clear();
                    return Ok(reply);
                }
            }
        }
    }

    fn narrate(&mut self, _state: &RunState, events: &[BattleEvent]) {
        self.view.push_events(events);
    }
}
