use colored::Colorize;

use crate::error::BreatheError;
use crate::features::breathing::{
    format_duration, format_mmss, render_progress_bar, Catalog, PhaseLabel, SessionEvent,
    Simulation, Technique,
};
use crate::features::history::HistoryReport;

/// Format the catalog as a numbered list
pub fn format_techniques_pretty(catalog: &Catalog, rejected: &[BreatheError]) -> String {
    let mut output = format!("Techniques ({})\n", catalog.len());
    output.push_str(&"─".repeat(60));
    output.push('\n');

    if catalog.is_empty() {
        output.push_str("  No techniques\n");
    }

    for (i, technique) in catalog.iter().enumerate() {
        output.push_str(&format!(
            "{:>2}. {}  {}  {}\n",
            i + 1,
            technique.name().bold(),
            technique.pattern_text().cyan(),
            format!(
                "×{} · {}",
                technique.cycles(),
                format_duration(technique.session_seconds())
            )
            .dimmed()
        ));
        if !technique.description().is_empty() {
            output.push_str(&format!("    {}\n", technique.description().dimmed()));
        }
    }

    for err in rejected {
        output.push_str(&format!("{} {}\n", "warning:".yellow().bold(), err));
    }

    output
}

/// Format one technique with its phases
pub fn format_technique_pretty(number: usize, technique: &Technique) -> String {
    let mut output = format!("{}. {}\n", number, technique.name().bold());

    if !technique.description().is_empty() {
        output.push_str(&format!("  {}\n", technique.description()));
    }
    output.push('\n');

    output.push_str(&format!("  {}:\n", "Phases".dimmed()));
    for (label, seconds) in technique.labelled_phases() {
        let name = format!("{:<8}", label.display_name());
        let line = format!("    {} {:>2}s", paint_label(label, &name), seconds);
        if seconds == 0 {
            output.push_str(&format!("{}  {}\n", line, "(skipped)".dimmed()));
        } else {
            output.push_str(&line);
            output.push('\n');
        }
    }

    output.push_str(&format!("  {}: {}\n", "Pattern".dimmed(), technique.pattern_text()));
    output.push_str(&format!("  {}: {}\n", "Cycles".dimmed(), technique.cycles()));
    output.push_str(&format!(
        "  {}: {}\n",
        "Cycle length".dimmed(),
        format_duration(u64::from(technique.cycle_seconds()))
    ));
    output.push_str(&format!(
        "  {}: {}\n",
        "Session length".dimmed(),
        format_duration(technique.session_seconds())
    ));
    if let Some(bpm) = technique.breaths_per_minute() {
        output.push_str(&format!("  {}: {:.1}\n", "Breaths/minute".dimmed(), bpm));
    }

    output
}

/// Format a simulated run as a timeline
pub fn format_simulation_pretty(simulation: &Simulation) -> String {
    let total_cycles = simulation.final_snapshot.total_cycles;

    let mut output = format!("{}  {}\n", simulation.technique.bold(), simulation.pattern.cyan());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for timed in &simulation.events {
        let at = format!("[{}]", format_mmss(timed.at_seconds)).dimmed();
        let line = match &timed.event {
            SessionEvent::Started {
                label,
                seconds_remaining,
                ..
            } => format!("Started  {} {}s", label_colored(*label), seconds_remaining),
            SessionEvent::PhaseStarted { label, seconds, .. } => {
                format!("{} {}s", label_colored(*label), seconds)
            }
            SessionEvent::CycleCompleted { completed } => {
                format!("Cycle {completed} of {total_cycles} complete")
                    .green()
                    .to_string()
            }
            SessionEvent::SessionCompleted { .. } => "Session complete".green().bold().to_string(),
            SessionEvent::Stopped => "Stopped".yellow().to_string(),
        };
        output.push_str(&format!("{at} {line}\n"));
    }

    output.push('\n');
    if simulation.completed {
        output.push_str(&format!(
            "Completed in {}\n",
            format_duration(simulation.elapsed_seconds)
        ));
    } else {
        let snapshot = &simulation.final_snapshot;
        output.push_str(&format!(
            "Stopped after {}: {} with {}s left, cycle {} of {}\n",
            format_duration(simulation.elapsed_seconds),
            snapshot.phase_label,
            snapshot.seconds_remaining,
            snapshot.completed_cycles + 1,
            snapshot.total_cycles
        ));
        let done = f64::from(snapshot.completed_cycles) / f64::from(snapshot.total_cycles.max(1));
        output.push_str(&format!("{}\n", render_progress_bar(done, 20).dimmed()));
    }

    output
}

/// Format a practice log report
pub fn format_history_pretty(report: &HistoryReport) -> String {
    let range = if report.from == report.to {
        report.from.to_string()
    } else {
        format!("{} to {}", report.from, report.to)
    };

    let mut output = format!("Practice log: {range}\n");
    output.push_str(&"─".repeat(50));
    output.push('\n');

    if report.is_empty() {
        output.push_str("  No sessions recorded\n");
    }

    for day in &report.days {
        let sessions = if day.sessions == 1 { "session" } else { "sessions" };
        output.push_str(&format!(
            "  {}  {:>2} {:<8} {:>4} cycles  {:>10}  {}\n",
            day.day.to_string().bold(),
            day.sessions,
            sessions,
            day.cycles,
            format_mmss(day.seconds),
            day.techniques.join(", ").dimmed()
        ));
    }

    output.push('\n');
    output.push_str(&format!(
        "  {}: {}\n",
        "Total".dimmed(),
        if report.total_seconds == 0 {
            "nothing yet".to_string()
        } else {
            format!(
                "{} in {} sessions",
                format_duration(report.total_seconds),
                report.total_sessions
            )
        }
    ));
    output.push_str(&format!("  {}: {} days\n", "Streak".dimmed(), report.streak_days));

    output
}

fn label_colored(label: PhaseLabel) -> colored::ColoredString {
    paint_label(label, label.display_name())
}

fn paint_label(label: PhaseLabel, text: &str) -> colored::ColoredString {
    match label {
        PhaseLabel::Inhale => text.cyan(),
        PhaseLabel::Hold => text.yellow(),
        PhaseLabel::Exhale => text.magenta(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::breathing::{simulate, SimulationOptions};
    use crate::features::history::{PracticeEntry, PracticeLog};
    use crate::storage::Database;
    use chrono::NaiveDate;

    #[test]
    fn test_format_techniques_pretty() {
        let rejected = vec![BreatheError::InvalidPattern {
            technique: "Broken".to_string(),
            reason: "pattern is empty".to_string(),
        }];
        let output = format_techniques_pretty(&Catalog::builtin(), &rejected);

        assert!(output.contains("Techniques (3)"));
        assert!(output.contains("4-7-8 Breathing"));
        assert!(output.contains("Box Breathing"));
        assert!(output.contains("4-4-4-4"));
        assert!(output.contains("Broken"));
    }

    #[test]
    fn test_format_technique_pretty_marks_skipped_phase() {
        let catalog = Catalog::builtin();
        let output = format_technique_pretty(3, catalog.get(2).unwrap());

        assert!(output.contains("Deep Breathing"));
        assert!(output.contains("(skipped)"));
        assert!(output.contains("1 minute"));
        assert!(output.contains("6.0"));
    }

    #[test]
    fn test_phase_column_aligned_with_color() {
        colored::control::set_override(true);
        let catalog = Catalog::builtin();
        let output = format_technique_pretty(1, catalog.get(0).unwrap());
        colored::control::unset_override();

        let strip = regex::Regex::new(r"\x1b\[[0-9;]*m").unwrap();
        let plain = strip.replace_all(&output, "");
        let columns: Vec<usize> = plain
            .lines()
            .filter(|line| line.trim_end().ends_with('s') && line.starts_with("    "))
            .filter_map(|line| line.find(|c: char| c.is_ascii_digit()))
            .collect();

        assert_eq!(columns.len(), 3);
        assert!(columns.iter().all(|&c| c == columns[0]));
        assert!(plain.contains("    Inhale    4s"));
        assert!(plain.contains("    Hold      7s"));
    }

    #[test]
    fn test_format_simulation_pretty() {
        let sim = simulate(Catalog::builtin(), 0, SimulationOptions::default()).unwrap();
        let output = format_simulation_pretty(&sim);

        assert!(output.contains("Started"));
        assert!(output.contains("Cycle 1 of 4 complete"));
        assert!(output.contains("Session complete"));
        assert!(output.contains("01:16"));
        assert!(output.contains("1 minute, 16 seconds"));
    }

    #[test]
    fn test_format_simulation_pretty_when_cut_short() {
        let options = SimulationOptions {
            max_seconds: Some(5),
            ..SimulationOptions::default()
        };
        let sim = simulate(Catalog::builtin(), 0, options).unwrap();
        let output = format_simulation_pretty(&sim);

        assert!(output.contains("Stopped after 5 seconds"));
        assert!(output.contains("cycle 1 of 4"));
        assert!(output.contains("[░░░░░░░░░░░░░░░░░░░░]"));
    }

    #[test]
    fn test_format_history_pretty() {
        let log = PracticeLog::with_database(Database::open_in_memory().unwrap());
        let day = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        log.record(&mut PracticeEntry::on(day, "Box Breathing", 5, 80))
            .unwrap();

        let report = HistoryReport::for_date(&log, day, day).unwrap();
        let output = format_history_pretty(&report);
        assert!(output.contains("2024-05-01"));
        assert!(output.contains("Box Breathing"));
        assert!(output.contains("1 minute, 20 seconds"));

        let empty = HistoryReport::for_date(&log, day.succ_opt().unwrap(), day).unwrap();
        assert!(format_history_pretty(&empty).contains("No sessions recorded"));
    }
}
