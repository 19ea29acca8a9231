//! Event handling for the TUI.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::BreatheError;

/// Action to take after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Quit the application.
    Quit,
    /// Start or pause the session.
    Toggle,
    /// Reset the session.
    Reset,
    /// Select a technique by 0-based index.
    Select(usize),
    /// Select the next technique.
    Next,
    /// Select the previous technique.
    Previous,
    /// Show key help.
    Help,
}

/// Wait up to `timeout` for a key press.
///
/// Returns an action to take, or None if no action is needed.
///
/// # Errors
///
/// Returns an error if event polling fails.
pub fn handle_events(timeout: Duration) -> Result<Option<Action>, BreatheError> {
    if event::poll(timeout)
        .map_err(|e| BreatheError::Terminal(format!("Event poll failed: {e}")))?
    {
        if let Event::Key(key) = event::read()
            .map_err(|e| BreatheError::Terminal(format!("Event read failed: {e}")))?
        {
            if key.kind == KeyEventKind::Press {
                return Ok(action_for_key(key));
            }
        }
    }

    Ok(None)
}

/// Map a key press to an action.
#[must_use]
pub fn action_for_key(key: KeyEvent) -> Option<Action> {
    // Handle Ctrl+C
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Action::Quit);
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') | KeyCode::Enter => Some(Action::Toggle),
        KeyCode::Char('r') => Some(Action::Reset),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::Next),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::Previous),
        KeyCode::Char('?') => Some(Action::Help),
        KeyCode::Char(c @ '1'..='9') => c
            .to_digit(10)
            .and_then(|d| usize::try_from(d).ok())
            .map(|d| Action::Select(d - 1)),
        _ => None,
    }
}
