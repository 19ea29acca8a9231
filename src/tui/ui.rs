//! UI rendering for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::features::breathing::{format_mmss, Clock, PhaseLabel};
use crate::tui::app::App;

pub const HELP: &str = "space:start/pause | r:reset | 1-9 j/k:select | ?:help | q:quit";

/// Render the application UI.
pub fn render<C: Clock>(frame: &mut Frame<'_>, app: &App<C>) {
    // Create layout: header, body, status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(0)])
        .split(chunks[1]);

    render_header(frame, app, chunks[0]);
    render_techniques(frame, app, body[0]);
    render_session(frame, app, body[1]);
    render_status_bar(frame, app, chunks[2]);
}

const fn label_color(label: PhaseLabel) -> Color {
    match label {
        PhaseLabel::Inhale => Color::Cyan,
        PhaseLabel::Hold => Color::Yellow,
        PhaseLabel::Exhale => Color::Magenta,
    }
}

/// Render the header.
fn render_header<C: Clock>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let title = app.technique().map_or_else(
        || " breathe ".to_string(),
        |t| format!(" {} ({}) ", t.name(), t.pattern_text()),
    );

    let header = Paragraph::new(title)
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan)),
        );

    frame.render_widget(header, area);
}

/// Render the technique list.
fn render_techniques<C: Clock>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let items: Vec<ListItem<'_>> = app
        .catalog()
        .iter()
        .enumerate()
        .map(|(i, technique)| {
            let is_selected = i == app.selected;
            let spans = vec![
                Span::styled(format!("{} ", i + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    technique.name(),
                    Style::default().add_modifier(if is_selected {
                        Modifier::BOLD
                    } else {
                        Modifier::empty()
                    }),
                ),
            ];
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Techniques ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White)),
        )
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.selected));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the indicator, countdown and cycle counter.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn render_session<C: Clock>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let snapshot = &app.snapshot;
    let color = label_color(snapshot.phase_label);

    let outer = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Indicator
            Constraint::Length(1), // Phase and countdown
            Constraint::Length(1), // Cycle
            Constraint::Length(1), // Phase progress
        ])
        .split(inner);

    // Indicator grows on inhale and shrinks on exhale.
    let relative = app.scale.relative(snapshot.progress_fraction);
    let width = ((f64::from(rows[0].width) * relative).round() as u16).max(2);
    let height = ((f64::from(rows[0].height) * relative).round() as u16).max(2);
    let [row] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(rows[0]);
    let [indicator] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(row);
    frame.render_widget(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(color))
            .style(Style::default().bg(color)),
        indicator,
    );

    let untouched = !snapshot.is_running
        && snapshot.completed_cycles == 0
        && snapshot.phase_index == 0
        && snapshot.seconds_remaining == snapshot.phase_seconds;
    let phase_line = if !untouched {
        let mut spans = vec![
            Span::styled(
                snapshot.phase_label.display_name(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {}s", snapshot.seconds_remaining)),
        ];
        if !snapshot.is_running {
            spans.push(Span::styled("  Paused", Style::default().fg(Color::Yellow)));
        }
        Line::from(spans)
    } else {
        Line::from(Span::styled(
            "Press space to begin",
            Style::default().fg(Color::DarkGray),
        ))
    };
    frame.render_widget(Paragraph::new(phase_line).centered(), rows[1]);

    let remaining = app.technique().map_or(0, |t| {
        t.session_seconds()
            .saturating_sub(u64::from(snapshot.completed_cycles) * u64::from(t.cycle_seconds()))
    });
    let cycle = format!(
        "Cycle {} of {}  ·  {} left in session",
        (snapshot.completed_cycles + 1).min(snapshot.total_cycles.max(1)),
        snapshot.total_cycles,
        format_mmss(remaining)
    );
    frame.render_widget(
        Paragraph::new(cycle)
            .centered()
            .style(Style::default().fg(Color::Gray)),
        rows[2],
    );

    let elapsed = snapshot
        .phase_seconds
        .saturating_sub(snapshot.seconds_remaining);
    let ratio = if snapshot.phase_seconds == 0 {
        0.0
    } else {
        f64::from(elapsed) / f64::from(snapshot.phase_seconds)
    };
    frame.render_widget(
        Gauge::default()
            .gauge_style(Style::default().fg(color))
            .ratio(ratio.clamp(0.0, 1.0))
            .label(format!("{:.0}", app.indicator_size())),
        rows[3],
    );
}

/// Render the status bar.
fn render_status_bar<C: Clock>(frame: &mut Frame<'_>, app: &App<C>, area: Rect) {
    let status_text = app.status.as_deref().unwrap_or(HELP);

    let status = Paragraph::new(status_text).style(Style::default().fg(Color::DarkGray));

    frame.render_widget(status, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::breathing::{Catalog, IndicatorScale, ManualClock};
    use ratatui::{backend::TestBackend, Terminal};

    fn rendered(app: &App<&ManualClock>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 20)).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(ratatui::buffer::Cell::symbol)
            .collect()
    }

    #[test]
    fn test_render_idle() {
        let clock = ManualClock::new();
        let app = App::new(
            Catalog::builtin(),
            &clock,
            10,
            IndicatorScale::default(),
            None,
            1,
        )
        .unwrap();

        let screen = rendered(&app);
        assert!(screen.contains("Box Breathing (4-4-4-4)"));
        assert!(screen.contains("Press space to begin"));
        assert!(screen.contains("Cycle 1 of 5"));
    }

    #[test]
    fn test_render_running() {
        let clock = ManualClock::new();
        let mut app = App::new(
            Catalog::builtin(),
            &clock,
            10,
            IndicatorScale::default(),
            None,
            0,
        )
        .unwrap();
        app.toggle().unwrap();

        let screen = rendered(&app);
        assert!(screen.contains("Inhale"));
        assert!(screen.contains("4s"));
        assert!(!screen.contains("Paused"));
    }

    #[test]
    fn test_render_paused_keeps_phase_and_countdown() {
        let clock = ManualClock::new();
        let mut app = App::new(
            Catalog::builtin(),
            &clock,
            10,
            IndicatorScale::default(),
            None,
            0,
        )
        .unwrap();
        app.toggle().unwrap();
        clock.advance(std::time::Duration::from_secs(6));
        app.tick().unwrap();
        app.toggle().unwrap();

        let snapshot = app.snapshot.clone();
        assert!(!snapshot.is_running);
        assert_eq!(snapshot.phase_index, 1);
        assert_eq!(snapshot.seconds_remaining, 5);

        let screen = rendered(&app);
        assert!(screen.contains("Hold"));
        assert!(screen.contains("5s"));
        assert!(screen.contains("Paused"));
        assert!(!screen.contains("Press space to begin"));
    }
}
