//! UI-agnostic input handling.
//!
//! Key events are mapped to small input enums first, so the text buffers and
//! menu logic can be tested without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::answer::PlayerReply;

/// Longest line the answer and name prompts accept.
pub const MAX_LINE_LEN: usize = 24;

/// Input events for a free-text prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineInput {
    /// Character typed
    Char(char),
    /// Backspace pressed
    Backspace,
    /// Enter pressed
    Submit,
    /// Ctrl+C or Esc
    Interrupt,
    /// Any other key
    Other,
}

/// Input events for list menus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuInput {
    Up,
    Down,
    Select,
    /// Digit shortcut, 1-based
    Choose(usize),
    Back,
    Other,
}

fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c')
}

/// Maps a key press to a prompt input. Key releases map to `Other`.
pub fn line_input(key: KeyEvent) -> LineInput {
    if key.kind == KeyEventKind::Release {
        return LineInput::Other;
    }
    if is_interrupt(&key) {
        return LineInput::Interrupt;
    }
    match key.code {
        KeyCode::Char(c) => LineInput::Char(c),
        KeyCode::Backspace => LineInput::Backspace,
        KeyCode::Enter => LineInput::Submit,
        KeyCode::Esc => LineInput::Interrupt,
        _ => LineInput::Other,
    }
}

pub fn menu_input(key: KeyEvent) -> MenuInput {
    if key.kind == KeyEventKind::Release {
        return MenuInput::Other;
    }
    if is_interrupt(&key) {
        return MenuInput::Back;
    }
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => MenuInput::Up,
        KeyCode::Down | KeyCode::Char('j') => MenuInput::Down,
        KeyCode::Enter => MenuInput::Select,
        KeyCode::Char(c) if c.is_ascii_digit() && c != '0' => {
            MenuInput::Choose(c as usize - '0' as usize)
        }
        KeyCode::Esc | KeyCode::Char('q') => MenuInput::Back,
        _ => MenuInput::Other,
    }
}

/// Single-line text buffer for the answer prompt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerLine {
    pub text: String,
}

impl AnswerLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies one input. Returns a reply once the line is submitted or the
    /// player interrupts; the buffer is cleared either way.
    pub fn apply(&mut self, input: LineInput) -> Option<PlayerReply> {
        match input {
            LineInput::Char(c) => {
                if !c.is_control() && self.text.chars().count() < MAX_LINE_LEN {
                    self.text.push(c);
                }
                None
            }
            LineInput::Backspace => {
                self.text.pop();
                None
            }
            LineInput::Submit => Some(PlayerReply::from_line(&std::mem::take(&mut self.text))),
            LineInput::Interrupt => {
                self.text.clear();
                Some(PlayerReply::Exit)
            }
            LineInput::Other => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_ctrl_c_is_interrupt() {
        let event = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(line_input(event), LineInput::Interrupt);
        assert_eq!(menu_input(event), MenuInput::Back);
        assert_eq!(line_input(key(KeyCode::Char('c'))), LineInput::Char('c'));
    }

    #[test]
    fn test_line_keys() {
        assert_eq!(line_input(key(KeyCode::Enter)), LineInput::Submit);
        assert_eq!(line_input(key(KeyCode::Backspace)), LineInput::Backspace);
        assert_eq!(line_input(key(KeyCode::Esc)), LineInput::Interrupt);
        assert_eq!(line_input(key(KeyCode::Tab)), LineInput::Other);
    }

    #[test]
    fn test_menu_keys() {
        assert_eq!(menu_input(key(KeyCode::Up)), MenuInput::Up);
        assert_eq!(menu_input(key(KeyCode::Char('j'))), MenuInput::Down);
        assert_eq!(menu_input(key(KeyCode::Char('3'))), MenuInput::Choose(3));
        assert_eq!(menu_input(key(KeyCode::Char('0'))), MenuInput::Other);
        assert_eq!(menu_input(key(KeyCode::Enter)), MenuInput::Select);
    }

    #[test]
    fn test_answer_line_submit() {
        let mut line = AnswerLine::new();
        for c in "125".chars() {
            assert_eq!(line.apply(LineInput::Char(c)), None);
        }
        line.apply(LineInput::Backspace);
        assert_eq!(line.text, "12");
        assert_eq!(
            line.apply(LineInput::Submit),
            Some(PlayerReply::Answer("12".to_string()))
        );
        assert!(line.text.is_empty());
    }

    #[test]
    fn test_answer_line_exit_keyword() {
        let mut line = AnswerLine::new();
        for c in "QUIT".chars() {
            line.apply(LineInput::Char(c));
        }
        assert_eq!(line.apply(LineInput::Submit), Some(PlayerReply::Exit));
    }

    #[test]
    fn test_answer_line_interrupt() {
        let mut line = AnswerLine::new();
        line.apply(LineInput::Char('4'));
        assert_eq!(line.apply(LineInput::Interrupt), Some(PlayerReply::Exit));
        assert!(line.text.is_empty());
    }

    #[test]
    fn test_answer_line_length_cap() {
        let mut line = AnswerLine::new();
        for _ in 0..(MAX_LINE_LEN + 10) {
            line.apply(LineInput::Char('9'));
        }
        assert_eq!(line.text.len(), MAX_LINE_LEN);
    }
}
