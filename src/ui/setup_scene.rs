//! Hero setup: name first, then difficulty.

use math_arena::config::{parse_choice, DifficultyConfig};
use math_arena::core::constants::DEFAULT_HERO_NAME;
use math_arena::encounter::hero_name;
use math_arena::input::{LineInput, MAX_LINE_LEN};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::controls;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    Name,
    Difficulty,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupAction {
    None,
    Cancel,
    Ready { hero: String, difficulty: usize },
}

pub struct SetupScreen {
    pub step: SetupStep,
    pub name_input: String,
    pub choice_input: String,
    pub validation_error: Option<String>,
    hero: String,
    preset_difficulty: Option<usize>,
    options: Vec<String>,
}

impl SetupScreen {
    pub fn new(difficulties: &[DifficultyConfig]) -> Self {
        Self {
            step: SetupStep::Name,
            name_input: String::new(),
            choice_input: String::new(),
            validation_error: None,
            hero: DEFAULT_HERO_NAME.to_string(),
            preset_difficulty: None,
            options: difficulties
                .iter()
                .map(|d| format!("{} ({})", d.name, d.describe()))
                .collect(),
        }
    }

    /// Starts at the difficulty step when the hero was named on the command line.
    pub fn with_hero(mut self, hero: Option<&str>) -> Self {
        if let Some(name) = hero {
            self.hero = hero_name(name);
            self.step = SetupStep::Difficulty;
        }
        self
    }

    /// Skips the difficulty prompt with an already checked zero-based index.
    pub fn with_difficulty(mut self, difficulty: Option<usize>) -> Self {
        self.preset_difficulty = difficulty;
        self
    }

    pub fn hero(&self) -> &str {
        &self.hero
    }

    pub fn handle(&mut self, input: LineInput) -> SetupAction {
        let buffer = match self.step {
            SetupStep::Name => &mut self.name_input,
            SetupStep::Difficulty => &mut self.choice_input,
        };
        match input {
            LineInput::Char(c) => {
                if !c.is_control() && buffer.chars().count() < MAX_LINE_LEN {
                    buffer.push(c);
                }
                SetupAction::None
            }
            LineInput::Backspace => {
                buffer.pop();
                SetupAction::None
            }
            LineInput::Interrupt => SetupAction::Cancel,
            LineInput::Submit => self.submit(),
            LineInput::Other => SetupAction::None,
        }
    }

    fn submit(&mut self) -> SetupAction {
        match self.step {
            SetupStep::Name => {
                self.hero = hero_name(&self.name_input);
                self.step = SetupStep::Difficulty;
                match self.preset_difficulty {
                    Some(difficulty) => SetupAction::Ready {
                        hero: self.hero.clone(),
                        difficulty,
                    },
                    None => SetupAction::None,
                }
            }
            SetupStep::Difficulty => match parse_choice(&self.choice_input, self.options.len()) {
                Some(difficulty) => {
                    self.validation_error = None;
                    SetupAction::Ready {
                        hero: self.hero.clone(),
                        difficulty,
                    }
                }
                None => {
                    self.validation_error = Some(format!(
                        "Please enter a number from 1 to {}",
                        self.options.len()
                    ));
                    self.choice_input.clear();
                    SetupAction::None
                }
            },
        }
    }

    pub fn draw(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(3), // Input
                Constraint::Length(1), // Spacer
                Constraint::Min(3),    // Difficulty list
                Constraint::Length(2), // Validation
                Constraint::Length(1), // Controls
            ])
            .split(area);

        let title = match self.step {
            SetupStep::Name => "Enter Your Hero's Name".to_string(),
            SetupStep::Difficulty => format!("Welcome, {}! Choose Your Difficulty", self.hero()),
        };
        let title = Paragraph::new(title)
            .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);

        let (label, text) = match self.step {
            SetupStep::Name => ("Name", &self.name_input),
            SetupStep::Difficulty => ("Choice", &self.choice_input),
        };
        let input = Paragraph::new(format!("{}_", text))
            .block(Block::default().borders(Borders::ALL).title(label))
            .style(Style::default().fg(Color::White));
        f.render_widget(input, chunks[1]);

        if self.step == SetupStep::Difficulty {
            let lines: Vec<Line> = self
                .options
                .iter()
                .enumerate()
                .map(|(i, option)| Line::from(format!("{}. {}", i + 1, option)))
                .collect();
            let list = Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title("Difficulty"));
            f.render_widget(list, chunks[3]);
        } else {
            let hint = Paragraph::new(format!("Leave blank to play as {}.", DEFAULT_HERO_NAME))
                .style(Style::default().fg(Color::Gray));
            f.render_widget(hint, chunks[3]);
        }

        if let Some(error) = &self.validation_error {
            let line = Line::from(Span::styled(
                format!("✗ {}", error),
                Style::default().fg(Color::Red),
            ));
            f.render_widget(Paragraph::new(line), chunks[4]);
        }

        f.render_widget(controls("[Enter] Confirm    [Esc] Back"), chunks[5]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_text(screen: &mut SetupScreen, text: &str) {
        for c in text.chars() {
            screen.handle(LineInput::Char(c));
        }
    }

    #[test]
    fn test_name_then_difficulty() {
        let mut screen = SetupScreen::new(&DifficultyConfig::classic());
        type_text(&mut screen, "  aDA ");
        assert_eq!(screen.handle(LineInput::Submit), SetupAction::None);
        assert_eq!(screen.step, SetupStep::Difficulty);
        assert_eq!(screen.hero(), "Ada");

        type_text(&mut screen, "2");
        assert_eq!(
            screen.handle(LineInput::Submit),
            SetupAction::Ready {
                hero: "Ada".to_string(),
                difficulty: 1
            }
        );
    }

    #[test]
    fn test_blank_name_defaults() {
        let mut screen = SetupScreen::new(&DifficultyConfig::classic());
        screen.handle(LineInput::Submit);
        assert_eq!(screen.hero(), "Hero");
    }

    #[test]
    fn test_bad_choice_reprompts() {
        let mut screen =
            SetupScreen::new(&DifficultyConfig::classic()).with_hero(Some("bob"));
        assert_eq!(screen.step, SetupStep::Difficulty);

        for bad in ["0", "4", "x"] {
            type_text(&mut screen, bad);
            assert_eq!(screen.handle(LineInput::Submit), SetupAction::None);
            assert!(screen.validation_error.is_some());
            assert!(screen.choice_input.is_empty());
            assert_eq!(screen.step, SetupStep::Difficulty);
        }

        type_text(&mut screen, "3");
        assert!(matches!(
            screen.handle(LineInput::Submit),
            SetupAction::Ready { difficulty: 2, .. }
        ));
        assert!(screen.validation_error.is_none());
    }

    #[test]
    fn test_preset_difficulty_skips_prompt() {
        let mut screen = SetupScreen::new(&DifficultyConfig::classic()).with_difficulty(Some(2));
        type_text(&mut screen, "zed");
        assert_eq!(
            screen.handle(LineInput::Submit),
            SetupAction::Ready {
                hero: "Zed".to_string(),
                difficulty: 2
            }
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut screen = SetupScreen::new(&DifficultyConfig::classic());
        assert_eq!(screen.handle(LineInput::Interrupt), SetupAction::Cancel);
    }
}
