use math_arena::input::MenuInput;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{centered, controls};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Start,
    HighScores,
    Quit,
}

impl MenuChoice {
    const ALL: [MenuChoice; 3] = [MenuChoice::Start, MenuChoice::HighScores, MenuChoice::Quit];

    fn label(&self) -> &'static str {
        match self {
            MenuChoice::Start => "Start Battle",
            MenuChoice::HighScores => "High Scores",
            MenuChoice::Quit => "Exit",
        }
    }
}

pub struct MainMenuScreen {
    pub selected: usize,
}

impl MainMenuScreen {
    pub fn new() -> Self {
        Self { selected: 0 }
    }

    pub fn handle(&mut self, input: MenuInput) -> Option<MenuChoice> {
        let count = MenuChoice::ALL.len();
        match input {
            MenuInput::Up => {
                self.selected = (self.selected + count - 1) % count;
                None
            }
            MenuInput::Down => {
                self.selected = (self.selected + 1) % count;
                None
            }
            MenuInput::Select => Some(MenuChoice::ALL[self.selected]),
            MenuInput::Choose(n) if n <= count => {
                self.selected = n - 1;
                Some(MenuChoice::ALL[self.selected])
            }
            MenuInput::Back => Some(MenuChoice::Quit),
            _ => None,
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let area = centered(area, 44, 14);
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Math Arena ");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(2), // Tagline
                Constraint::Length(4), // Options
                Constraint::Min(0),
                Constraint::Length(1), // Controls
            ])
            .split(inner);

        let tagline = Paragraph::new("Defeat monsters with arithmetic!")
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(tagline, chunks[0]);

        let options: Vec<Line> = MenuChoice::ALL
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let text = format!("{}. {}", i + 1, choice.label());
                if i == self.selected {
                    Line::from(Span::styled(
                        format!("> {}", text),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("  {}", text))
                }
            })
            .collect();
        f.render_widget(Paragraph::new(options), chunks[1]);

        f.render_widget(controls("[↑/↓] Move  [Enter] Select  [Esc] Exit"), chunks[3]);
    }
}
