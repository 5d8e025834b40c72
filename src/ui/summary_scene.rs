use math_arena::core::constants::GOOD_SCORE_THRESHOLD;
use math_arena::input::MenuInput;
use math_arena::summary::{HighScoreBoard, RunEnding, RunSummary};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{centered, controls};

/// What the player wants after a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryAction {
    PlayAgain,
    Menu,
}

impl SummaryAction {
    pub fn from_input(input: MenuInput) -> Option<Self> {
        match input {
            MenuInput::Select => Some(Self::PlayAgain),
            MenuInput::Back => Some(Self::Menu),
            _ => None,
        }
    }
}

fn heading(text: &str) -> Line<'static> {
    Line::from(Span::styled(
        text.to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))
}

fn names_or_none<'a>(names: impl Iterator<Item = &'a str>) -> String {
    let joined: Vec<&str> = names.collect();
    if joined.is_empty() {
        "none".to_string()
    } else {
        joined.join(", ")
    }
}

/// Report lines for a finished run.
pub fn summary_lines(summary: &RunSummary, tough_threshold: u32) -> Vec<String> {
    let title = match summary.ending {
        RunEnding::PlayerDefeated => format!("Game over, {}!", summary.hero),
        RunEnding::UserExit | RunEnding::InProgress => {
            format!("Thanks for playing, {}!", summary.hero)
        }
    };
    let monsters = &summary.monsters;
    let mut lines = vec![
        title,
        String::new(),
        format!("Difficulty: {}", summary.difficulty),
        format!("Final score: {}", summary.score),
        format!("Monsters defeated: {}", summary.defeated_count()),
        format!(
            "Turns: {}   Questions asked: {}",
            summary.turns, summary.questions_asked
        ),
        format!("Level reached: {}", summary.level),
        format!(
            "Monsters fought: {}",
            names_or_none(monsters.encountered.iter().map(|m| m.name.as_str()))
        ),
        format!(
            "Tough monsters (over {} HP): {}",
            tough_threshold,
            names_or_none(monsters.tough.iter().map(|m| m.name.as_str()))
        ),
        format!(
            "Total HP of monsters fought: {}",
            monsters.total_encountered_hp
        ),
    ];
    if !summary.first_questions.is_empty() {
        lines.push(format!(
            "First questions: {}",
            summary.first_questions.join("  ")
        ));
    }
    lines
}

/// Top-five lines plus the count of good runs.
pub fn high_score_lines(board: &HighScoreBoard) -> Vec<String> {
    if board.is_empty() {
        return vec!["No scores yet. Go fight something!".to_string()];
    }
    let mut lines: Vec<String> = board
        .leaders()
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {}", i + 1, entry.describe()))
        .collect();
    lines.push(String::new());
    lines.push(format!(
        "Runs scoring {}+: {} of {}",
        GOOD_SCORE_THRESHOLD,
        board.good_runs(),
        board.len()
    ));
    lines
}

pub fn draw_summary_scene(
    frame: &mut Frame,
    area: Rect,
    summary: &RunSummary,
    tough_threshold: u32,
    board: &HighScoreBoard,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Min(14),   // Run report
            Constraint::Length(9), // High scores
            Constraint::Length(1), // Controls
        ])
        .split(area);

    let mut report = summary_lines(summary, tough_threshold).into_iter();
    let mut lines = Vec::new();
    if let Some(title) = report.next() {
        lines.push(heading(&title));
    }
    lines.extend(report.map(Line::from));
    let report = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Run Summary "));
    frame.render_widget(report, chunks[0]);

    draw_high_score_panel(frame, chunks[1], board);

    frame.render_widget(
        controls("[Enter] Play Again    [Esc] Main Menu"),
        chunks[2],
    );
}

pub fn draw_high_scores_scene(frame: &mut Frame, area: Rect, board: &HighScoreBoard) {
    let area = centered(area, 50, 12);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    draw_high_score_panel(frame, chunks[0], board);
    frame.render_widget(controls("[Esc] Back"), chunks[1]);
}

fn draw_high_score_panel(frame: &mut Frame, area: Rect, board: &HighScoreBoard) {
    let lines: Vec<Line> = high_score_lines(board).into_iter().map(Line::from).collect();
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Left)
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(" High Scores "));
    frame.render_widget(panel, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn test_high_score_lines() {
        let mut board = HighScoreBoard::new();
        assert_eq!(high_score_lines(&board).len(), 1);

        let noon = NaiveTime::from_hms_opt(12, 30, 0).unwrap();
        board.record_at("Ada", 40, noon);
        board.record_at("Bob", 75, noon);
        let lines = high_score_lines(&board);
        assert_eq!(lines[0], "1. Bob - 75 pts (12:30)");
        assert_eq!(lines[1], "2. Ada - 40 pts (12:30)");
        assert_eq!(lines.last().map(String::as_str), Some("Runs scoring 50+: 1 of 2"));
    }

    #[test]
    fn test_summary_action_keys() {
        assert_eq!(
            SummaryAction::from_input(MenuInput::Select),
            Some(SummaryAction::PlayAgain)
        );
        assert_eq!(SummaryAction::from_input(MenuInput::Back), Some(SummaryAction::Menu));
        assert_eq!(SummaryAction::from_input(MenuInput::Up), None);
    }

    #[test]
    fn test_names_or_none() {
        assert_eq!(names_or_none(std::iter::empty()), "none");
        assert_eq!(names_or_none(["A", "B"].into_iter()), "A, B");
    }
}
