//! breathe - Guided breathing sessions in the terminal
//!
//! A deterministic breathing session engine driven by injected ticks, a
//! terminal host for it, and a practice log of completed sessions.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::BreatheError;
pub use features::breathing::{BreathingSessionEngine, Catalog, Snapshot, Technique};
