//! Storage layer for breathe.
//!
//! `SQLite` persistence for the practice log.

mod database;
mod migrations;

pub use database::Database;
