//! Practice summaries.
//!
//! Groups the practice log by day and tracks the practice streak.

use std::collections::BTreeMap;

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use super::entry::PracticeEntry;
use super::storage::PracticeLog;
use crate::error::BreatheError;

/// Practice on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DaySummary {
    /// The day.
    pub day: NaiveDate,
    /// Sessions finished.
    pub sessions: u32,
    /// Cycles completed across all sessions.
    pub cycles: u64,
    /// Seconds spent breathing.
    pub seconds: u64,
    /// Techniques practised, in first-use order.
    pub techniques: Vec<String>,
}

/// Practice over a range of days.
#[derive(Debug, Clone, Serialize)]
pub struct HistoryReport {
    /// First day covered.
    pub from: NaiveDate,
    /// Last day covered.
    pub to: NaiveDate,
    /// Days with practice, most recent first.
    pub days: Vec<DaySummary>,
    /// Sessions in range.
    pub total_sessions: u32,
    /// Seconds in range.
    pub total_seconds: u64,
    /// Consecutive practice days ending today or yesterday.
    pub streak_days: u32,
}

impl HistoryReport {
    /// Report on the `days` days ending at `today`.
    ///
    /// # Errors
    ///
    /// Returns an error if the practice log cannot be read.
    pub fn recent_days(
        log: &PracticeLog,
        days: u32,
        today: NaiveDate,
    ) -> Result<Self, BreatheError> {
        let from = today - Duration::days(i64::from(days.max(1)) - 1);
        Self::build(log, from, today, today)
    }

    /// Report on a single day.
    ///
    /// # Errors
    ///
    /// Returns an error if the practice log cannot be read.
    pub fn for_date(
        log: &PracticeLog,
        day: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self, BreatheError> {
        Self::build(log, day, day, today)
    }

    fn build(
        log: &PracticeLog,
        from: NaiveDate,
        to: NaiveDate,
        today: NaiveDate,
    ) -> Result<Self, BreatheError> {
        let entries = log.between(from, to)?;
        let days = summarize_days(&entries);
        let streak_days = current_streak(&log.practice_days()?, today);

        Ok(Self {
            from,
            to,
            total_sessions: days.iter().map(|d| d.sessions).sum(),
            total_seconds: days.iter().map(|d| d.seconds).sum(),
            days,
            streak_days,
        })
    }

    /// Whether any practice falls in range.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }
}

/// Group entries by day, most recent day first.
#[must_use]
pub fn summarize_days(entries: &[PracticeEntry]) -> Vec<DaySummary> {
    let mut by_day: BTreeMap<NaiveDate, DaySummary> = BTreeMap::new();

    for entry in entries {
        let summary = by_day.entry(entry.day).or_insert_with(|| DaySummary {
            day: entry.day,
            sessions: 0,
            cycles: 0,
            seconds: 0,
            techniques: Vec::new(),
        });
        summary.sessions += 1;
        summary.cycles += u64::from(entry.cycles);
        summary.seconds += entry.seconds;
        if !summary.techniques.contains(&entry.technique) {
            summary.techniques.push(entry.technique.clone());
        }
    }

    by_day.into_values().rev().collect()
}

/// Consecutive practice days counting back from `today`.
///
/// A streak still counts when today has no practice yet but yesterday does.
#[must_use]
pub fn current_streak(days: &[NaiveDate], today: NaiveDate) -> u32 {
    let mut check = today;
    if !days.contains(&check) {
        check = today - Duration::days(1);
    }

    let mut streak = 0;
    while days.contains(&check) {
        streak += 1;
        check -= Duration::days(1);
    }

    streak
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_summarize_days() {
        let entries = vec![
            PracticeEntry::on(day(1), "Box Breathing", 5, 80),
            PracticeEntry::on(day(1), "Deep Breathing", 6, 60),
            PracticeEntry::on(day(1), "Box Breathing", 5, 80),
            PracticeEntry::on(day(3), "4-7-8 Breathing", 4, 76),
        ];

        let days = summarize_days(&entries);
        assert_eq!(days.len(), 2);
        assert_eq!(days[0].day, day(3));
        assert_eq!(days[1].sessions, 3);
        assert_eq!(days[1].cycles, 16);
        assert_eq!(days[1].seconds, 220);
        assert_eq!(days[1].techniques, vec!["Box Breathing", "Deep Breathing"]);
    }

    #[test]
    fn test_current_streak() {
        let days = vec![day(10), day(9), day(8), day(6)];
        assert_eq!(current_streak(&days, day(10)), 3);
        // Nothing yet today, streak carries from yesterday.
        assert_eq!(current_streak(&days, day(11)), 3);
        assert_eq!(current_streak(&days, day(12)), 0);
        assert_eq!(current_streak(&[], day(1)), 0);
    }

    #[test]
    fn test_recent_days_report() {
        let log = PracticeLog::with_database(Database::open_in_memory().unwrap());
        for d in [1, 5, 6, 7] {
            log.record(&mut PracticeEntry::on(day(d), "Box Breathing", 5, 80))
                .unwrap();
        }

        let report = HistoryReport::recent_days(&log, 3, day(7)).unwrap();
        assert_eq!(report.from, day(5));
        assert_eq!(report.to, day(7));
        assert_eq!(report.days.len(), 3);
        assert_eq!(report.total_sessions, 3);
        assert_eq!(report.total_seconds, 240);
        assert_eq!(report.streak_days, 3);

        let single = HistoryReport::for_date(&log, day(2), day(7)).unwrap();
        assert!(single.is_empty());
    }
}
