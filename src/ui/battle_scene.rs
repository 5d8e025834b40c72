use std::collections::VecDeque;

use math_arena::answer::OutcomeKind;
use math_arena::core::constants::PLAYER_MAX_HP;
use math_arena::encounter::{BattleEvent, RunState};
use math_arena::question::Question;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::{controls, hp_color};

const MAX_MESSAGES: usize = 6;

/// Everything the battle screen shows besides the run state itself.
#[derive(Debug, Default)]
pub struct BattleView {
    messages: VecDeque<(String, Color)>,
    pub input: String,
    pub remaining_secs: u64,
}

impl BattleView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_events(&mut self, events: &[BattleEvent]) {
        for event in events {
            self.push(describe_event(event), event_color(event));
        }
    }

    pub fn push(&mut self, message: String, color: Color) {
        if self.messages.len() == MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.messages.push_back((message, color));
    }
}

/// One line of battle narration.
pub fn describe_event(event: &BattleEvent) -> String {
    match event {
        BattleEvent::Answered {
            question,
            outcome,
            damage,
        } => {
            let penalty = -outcome.player_hp_delta;
            match outcome.kind {
                OutcomeKind::Correct => format!(
                    "Correct! {} = {}. You deal {} damage.",
                    question, question.answer, damage
                ),
                OutcomeKind::Incorrect => format!(
                    "Wrong! {} = {}. You take {} damage.",
                    question, question.answer, penalty
                ),
                OutcomeKind::TooSlow => format!("Too slow! You take {} damage.", penalty),
                OutcomeKind::InvalidInput => {
                    format!("That's not a number. You take {} damage.", penalty)
                }
            }
        }
        BattleEvent::MonsterDefeated {
            name,
            score_bonus,
            healed,
        } => format!(
            "You defeated {}! +{} points, +{} HP.",
            name, score_bonus, healed
        ),
        BattleEvent::LevelUp { level } => format!("Level up! You are now level {}.", level),
        BattleEvent::MonsterSpawned { name, max_hp } => {
            format!("A wild {} appears with {} HP!", name, max_hp)
        }
        BattleEvent::PlayerDefeated { by } => format!("You were defeated by {}.", by),
        BattleEvent::Exited => "You leave the arena.".to_string(),
    }
}

fn event_color(event: &BattleEvent) -> Color {
    match event {
        BattleEvent::Answered { outcome, .. } if outcome.kind.is_penalty() => Color::Red,
        BattleEvent::Answered { .. } => Color::Green,
        BattleEvent::PlayerDefeated { .. } => Color::Red,
        BattleEvent::MonsterDefeated { .. } | BattleEvent::LevelUp { .. } => Color::Yellow,
        BattleEvent::MonsterSpawned { .. } => Color::Magenta,
        BattleEvent::Exited => Color::Gray,
    }
}

/// Draws the battle screen: HP bars, the question, the answer line, and recent events.
pub fn draw_battle_scene(
    frame: &mut Frame,
    area: Rect,
    state: &RunState,
    question: &Question,
    view: &BattleView,
) {
    let block = Block::default().borders(Borders::ALL).title(format!(
        " Math Arena - {} ",
        state.difficulty.name
    ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status
            Constraint::Length(3), // Player HP
            Constraint::Length(3), // Monster HP
            Constraint::Length(5), // Question
            Constraint::Min(3),    // Messages
            Constraint::Length(1), // Controls
        ])
        .split(inner);

    draw_status(frame, chunks[0], state);
    draw_player_hp(frame, chunks[1], state);
    draw_monster_hp(frame, chunks[2], state);
    draw_question(frame, chunks[3], question, view, state);
    draw_messages(frame, chunks[4], view);
    frame.render_widget(
        controls("[Enter] Answer  Type 'exit' or press [Esc] to leave"),
        chunks[5],
    );
}

fn draw_status(frame: &mut Frame, area: Rect, state: &RunState) {
    let mut spans = vec![
        Span::styled(
            state.player.name.clone(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("   Score: {}", state.player.score)),
        Span::raw(format!("   Defeated: {}", state.log.defeated_count())),
    ];
    if state.rules.leveling.is_some() {
        spans.push(Span::raw(format!("   Level: {}", state.level)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_player_hp(frame: &mut Frame, area: Rect, state: &RunState) {
    let ratio = state.player.hp_ratio();
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Your HP"))
        .gauge_style(Style::default().fg(hp_color(ratio)).add_modifier(Modifier::BOLD))
        .label(format!("{}/{}", state.player.display_hp(), PLAYER_MAX_HP))
        .ratio(ratio);
    frame.render_widget(gauge, area);
}

fn draw_monster_hp(frame: &mut Frame, area: Rect, state: &RunState) {
    let monster = &state.monster;
    let title = match monster.affinity {
        Some(op) => format!("{} ({})", monster.name, op.name()),
        None => monster.name.clone(),
    };
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(title))
        .gauge_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .label(format!("{}/{}", monster.display_hp(), monster.max_hp))
        .ratio(monster.hp_ratio());
    frame.render_widget(gauge, area);
}

fn draw_question(
    frame: &mut Frame,
    area: Rect,
    question: &Question,
    view: &BattleView,
    state: &RunState,
) {
    let timer_color = if view.remaining_secs <= 2 {
        Color::Red
    } else {
        Color::White
    };
    let lines = vec![
        Line::from(Span::styled(
            question.prompt(),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format!(
                "Time left: {}s of {}s",
                view.remaining_secs,
                state.difficulty.time_limit.as_secs_f64()
            ),
            Style::default().fg(timer_color),
        )),
        Line::from(format!("> {}_", view.input)),
    ];
    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Question"));
    frame.render_widget(paragraph, area);
}

fn draw_messages(frame: &mut Frame, area: Rect, view: &BattleView) {
    let lines: Vec<Line> = view
        .messages
        .iter()
        .map(|(text, color)| Line::from(Span::styled(text.clone(), Style::default().fg(*color))))
        .collect();
    let paragraph =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title("Battle Log"));
    frame.render_widget(paragraph, area);
}
