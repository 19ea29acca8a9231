//! Practice log storage.
//!
//! Persists finished sessions to the local database.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Row};
use tracing::debug;

use super::entry::PracticeEntry;
use crate::config::Paths;
use crate::error::BreatheError;
use crate::storage::Database;

const DAY_FORMAT: &str = "%Y-%m-%d";

const SELECT_COLUMNS: &str =
    "SELECT id, day, technique, cycles, seconds, recorded_at FROM practice_log";

/// Storage for the practice log.
pub struct PracticeLog {
    db: Database,
}

impl PracticeLog {
    /// Open the practice log at the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened.
    pub fn new(paths: &Paths) -> Result<Self, BreatheError> {
        let db = Database::open(paths)?;
        Ok(Self { db })
    }

    /// Create storage with an existing database connection.
    #[must_use]
    pub const fn with_database(db: Database) -> Self {
        Self { db }
    }

    /// Append an entry, filling in its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn record(&self, entry: &mut PracticeEntry) -> Result<(), BreatheError> {
        let conn = self.db.connection();

        conn.execute(
            r"INSERT INTO practice_log (day, technique, cycles, seconds, recorded_at)
              VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.day_key(),
                entry.technique,
                entry.cycles,
                i64::try_from(entry.seconds).unwrap_or(i64::MAX),
                entry.recorded_at.to_rfc3339(),
            ],
        )
        .map_err(|e| BreatheError::Database(format!("Failed to record session: {e}")))?;

        entry.id = Some(conn.last_insert_rowid());
        debug!(
            id = ?entry.id,
            day = %entry.day_key(),
            technique = %entry.technique,
            "recorded session"
        );
        Ok(())
    }

    /// Entries for one day, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn for_date(&self, day: NaiveDate) -> Result<Vec<PracticeEntry>, BreatheError> {
        self.between(day, day)
    }

    /// Entries from `start` through `end` inclusive, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<PracticeEntry>, BreatheError> {
        let (start, end) = if start <= end { (start, end) } else { (end, start) };
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare(&format!(
                "{SELECT_COLUMNS} WHERE day >= ?1 AND day <= ?2 ORDER BY day ASC, id ASC"
            ))
            .map_err(|e| BreatheError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map(
                [
                    start.format(DAY_FORMAT).to_string(),
                    end.format(DAY_FORMAT).to_string(),
                ],
                row_to_entry,
            )
            .map_err(|e| BreatheError::Database(format!("Failed to query practice log: {e}")))?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row?);
        }

        Ok(entries)
    }

    /// Every day that has at least one entry, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn practice_days(&self) -> Result<Vec<NaiveDate>, BreatheError> {
        let conn = self.db.connection();

        let mut stmt = conn
            .prepare("SELECT DISTINCT day FROM practice_log ORDER BY day DESC")
            .map_err(|e| BreatheError::Database(format!("Failed to prepare query: {e}")))?;

        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| BreatheError::Database(format!("Failed to query practice days: {e}")))?;

        let mut days = Vec::new();
        for row in rows {
            let text = row?;
            let day = NaiveDate::parse_from_str(&text, DAY_FORMAT)
                .map_err(|e| BreatheError::Parse(format!("Invalid day '{text}': {e}")))?;
            days.push(day);
        }

        Ok(days)
    }

    /// Number of stored entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn count(&self) -> Result<u64, BreatheError> {
        let count: i64 = self
            .db
            .connection()
            .query_row("SELECT COUNT(*) FROM practice_log", [], |row| row.get(0))
            .map_err(|e| BreatheError::Database(format!("Failed to count entries: {e}")))?;

        Ok(u64::try_from(count).unwrap_or(0))
    }
}

/// Convert a database row to a `PracticeEntry`.
fn row_to_entry(row: &Row<'_>) -> Result<PracticeEntry, rusqlite::Error> {
    let id: i64 = row.get(0)?;
    let day_str: String = row.get(1)?;
    let technique: String = row.get(2)?;
    let cycles: u32 = row.get(3)?;
    let seconds: i64 = row.get(4)?;
    let recorded_at_str: String = row.get(5)?;

    let day = NaiveDate::parse_from_str(&day_str, DAY_FORMAT).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
    })?;

    let recorded_at = DateTime::parse_from_rfc3339(&recorded_at_str)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(5, rusqlite::types::Type::Text, Box::new(e))
        })?;

    Ok(PracticeEntry {
        id: Some(id),
        day,
        technique,
        cycles,
        seconds: u64::try_from(seconds).unwrap_or(0),
        recorded_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_log() -> PracticeLog {
        let db = Database::open_in_memory().unwrap();
        PracticeLog::with_database(db)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, d).unwrap()
    }

    #[test]
    fn test_record_and_for_date() {
        let log = create_test_log();

        let mut entry = PracticeEntry::on(day(1), "4-7-8 Breathing", 4, 76);
        log.record(&mut entry).unwrap();
        assert!(entry.id.is_some());

        let loaded = log.for_date(day(1)).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].technique, "4-7-8 Breathing");
        assert_eq!(loaded[0].cycles, 4);
        assert_eq!(loaded[0].seconds, 76);
        assert_eq!(loaded[0].id, entry.id);

        assert!(log.for_date(day(2)).unwrap().is_empty());
    }

    #[test]
    fn test_between_is_inclusive_and_ordered() {
        let log = create_test_log();

        for (d, name) in [(3, "Box Breathing"), (1, "Deep Breathing"), (5, "Box Breathing")] {
            log.record(&mut PracticeEntry::on(day(d), name, 5, 80)).unwrap();
        }

        let entries = log.between(day(1), day(3)).unwrap();
        let days: Vec<NaiveDate> = entries.iter().map(|e| e.day).collect();
        assert_eq!(days, vec![day(1), day(3)]);

        // Reversed bounds are accepted.
        assert_eq!(log.between(day(5), day(1)).unwrap().len(), 3);
    }

    #[test]
    fn test_practice_days_and_count() {
        let log = create_test_log();

        log.record(&mut PracticeEntry::on(day(2), "Box Breathing", 5, 80)).unwrap();
        log.record(&mut PracticeEntry::on(day(2), "Deep Breathing", 6, 60)).unwrap();
        log.record(&mut PracticeEntry::on(day(4), "Deep Breathing", 6, 60)).unwrap();

        assert_eq!(log.practice_days().unwrap(), vec![day(4), day(2)]);
        assert_eq!(log.count().unwrap(), 3);
    }
}
