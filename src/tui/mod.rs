//! Terminal User Interface (TUI) for breathe.
//!
//! Hosts an interactive breathing session: the driver is pumped on every
//! frame and key presses become session commands. Built with ratatui and
//! crossterm.

mod app;
mod event;
mod ui;

pub use app::App;
pub use event::{action_for_key, Action};

use std::io;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::debug;

use crate::cli::commands::Context;
use crate::error::BreatheError;
use crate::features::breathing::{Clock, SystemClock, MAX_STEPS_PER_SECOND};
use crate::features::history::{PracticeEntry, PracticeLog};

/// Run the TUI with technique `initial` selected.
///
/// Returns the sessions completed before quitting.
///
/// # Errors
///
/// Returns an error if the TUI fails to initialize or run.
pub fn run(ctx: &Context, initial: usize) -> Result<Vec<PracticeEntry>, BreatheError> {
    let log = if ctx.config.session.record_history {
        Some(PracticeLog::new(&ctx.paths)?)
    } else {
        None
    };

    let mut app = App::new(
        ctx.catalog.clone(),
        SystemClock::new(),
        ctx.config.session.steps_per_second,
        ctx.config.session.indicator_scale(),
        log,
        initial,
    )?;

    // Setup terminal
    enable_raw_mode()
        .map_err(|e| BreatheError::Terminal(format!("Failed to enable raw mode: {e}")))?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)
        .map_err(|e| BreatheError::Terminal(format!("Failed to setup terminal: {e}")))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)
        .map_err(|e| BreatheError::Terminal(format!("Failed to create terminal: {e}")))?;

    let frame_time = frame_time(ctx.config.session.steps_per_second);
    let result = run_app(&mut terminal, &mut app, frame_time);

    // Restore terminal
    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    result.map(|()| app.completed)
}

/// One animation step.
fn frame_time(steps_per_second: u32) -> Duration {
    Duration::from_secs(1) / steps_per_second.clamp(1, MAX_STEPS_PER_SECOND)
}

/// Run the main application loop.
fn run_app<B: Backend, C: Clock>(
    terminal: &mut Terminal<B>,
    app: &mut App<C>,
    frame_time: Duration,
) -> Result<(), BreatheError> {
    loop {
        app.tick()?;

        terminal
            .draw(|frame| ui::render(frame, app))
            .map_err(|e| BreatheError::Terminal(format!("Failed to draw: {e}")))?;

        if let Some(action) = event::handle_events(frame_time)? {
            debug!(?action, "key");
            match action {
                Action::Quit => break,
                Action::Toggle => app.toggle()?,
                Action::Reset => app.reset()?,
                Action::Select(index) => app.select(index)?,
                Action::Next => app.select_next()?,
                Action::Previous => app.select_previous()?,
                Action::Help => app.status = Some(ui::HELP.to_string()),
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_time() {
        assert_eq!(frame_time(10), Duration::from_millis(100));
        assert_eq!(frame_time(0), Duration::from_secs(1));
        assert_eq!(frame_time(u32::MAX), Duration::from_millis(1));
    }
}
