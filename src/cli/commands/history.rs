//! `history` command.

use chrono::{Local, NaiveDate};

use crate::error::BreatheError;
use crate::features::history::{HistoryReport, PracticeLog};
use crate::output::format_history;

use super::Context;

/// Summarize the practice log.
///
/// # Errors
///
/// Returns an error if `date` is not `YYYY-MM-DD` or the log cannot be read.
pub fn history(ctx: &Context, days: u32, date: Option<&str>) -> Result<String, BreatheError> {
    let log = PracticeLog::new(&ctx.paths)?;
    let today = Local::now().date_naive();

    let report = match date {
        Some(text) => HistoryReport::for_date(&log, parse_day(text)?, today)?,
        None => HistoryReport::recent_days(&log, days, today)?,
    };

    format_history(&report, ctx.format)
}

fn parse_day(text: &str) -> Result<NaiveDate, BreatheError> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|e| {
        BreatheError::Parse(format!("Invalid date '{text}' (expected YYYY-MM-DD): {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::super::test_support::context;
    use super::*;
    use crate::cli::args::OutputFormat;
    use crate::features::history::PracticeEntry;

    #[test]
    fn test_history_reads_recorded_sessions() {
        let (_dir, ctx) = context(OutputFormat::Json);
        {
            let log = PracticeLog::new(&ctx.paths).unwrap();
            log.record(&mut PracticeEntry::now("Box Breathing", 5, 80))
                .unwrap();
        }

        let output = history(&ctx, 7, None).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["total_sessions"], 1);
        assert_eq!(parsed["streak_days"], 1);
    }

    #[test]
    fn test_history_single_date() {
        let (_dir, ctx) = context(OutputFormat::Json);
        let output = history(&ctx, 7, Some("2020-01-01")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["from"], "2020-01-01");
        assert_eq!(parsed["days"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn test_history_bad_date() {
        let (_dir, ctx) = context(OutputFormat::Pretty);
        assert!(matches!(
            history(&ctx, 7, Some("yesterday")).unwrap_err(),
            BreatheError::Parse(_)
        ));
    }
}
