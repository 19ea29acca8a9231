//! A single practice log row.

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeEntry {
    /// Database ID (None until stored).
    pub id: Option<i64>,
    /// Calendar day the session belongs to.
    pub day: NaiveDate,
    /// Technique name at the time of practice.
    pub technique: String,
    /// Cycles completed.
    pub cycles: u32,
    /// Seconds spent breathing.
    pub seconds: u64,
    /// When the entry was written.
    pub recorded_at: DateTime<Utc>,
}

impl PracticeEntry {
    /// An entry for a session finished now, filed under today's local date.
    #[must_use]
    pub fn now(technique: impl Into<String>, cycles: u32, seconds: u64) -> Self {
        Self {
            id: None,
            day: Local::now().date_naive(),
            technique: technique.into(),
            cycles,
            seconds,
            recorded_at: Utc::now(),
        }
    }

    /// An entry filed under a specific day.
    #[must_use]
    pub fn on(day: NaiveDate, technique: impl Into<String>, cycles: u32, seconds: u64) -> Self {
        Self {
            day,
            ..Self::now(technique, cycles, seconds)
        }
    }

    /// Day key as `YYYY-MM-DD`.
    #[must_use]
    pub fn day_key(&self) -> String {
        self.day.format("%Y-%m-%d").to_string()
    }
}
