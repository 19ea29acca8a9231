//! Feature modules for breathe.
//!
//! - Breathing: technique catalog, session engine and tick driver
//! - History: practice log of finished sessions

pub mod breathing;
pub mod history;
