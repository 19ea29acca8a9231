//! Practice log.
//!
//! Finished breathing sessions, keyed by the local calendar day they were
//! recorded on.

pub mod entry;
pub mod report;
pub mod storage;

pub use entry::PracticeEntry;
pub use report::{current_streak, summarize_days, DaySummary, HistoryReport};
pub use storage::PracticeLog;
