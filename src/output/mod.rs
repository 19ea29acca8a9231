//! Output formatting for breathe.
//!
//! Pretty (colored) and JSON renderers for techniques, simulations and the
//! practice log.

mod json;
mod pretty;

use crate::cli::args::OutputFormat;
use crate::error::BreatheError;
use crate::features::breathing::{Catalog, Simulation, Technique};
use crate::features::history::HistoryReport;

pub use json::*;
pub use pretty::*;

/// Format the technique catalog based on output format
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_techniques(
    catalog: &Catalog,
    rejected: &[BreatheError],
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_techniques_pretty(catalog, rejected)),
        OutputFormat::Json => format_techniques_json(catalog, rejected),
    }
}

/// Format a single technique based on output format
///
/// `number` is the technique's 1-based position in the catalog.
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_technique(
    number: usize,
    technique: &Technique,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_technique_pretty(number, technique)),
        OutputFormat::Json => format_technique_json(number, technique),
    }
}

/// Format a simulated run based on output format
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_simulation(
    simulation: &Simulation,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_simulation_pretty(simulation)),
        OutputFormat::Json => to_json(simulation),
    }
}

/// Format a practice log report based on output format
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_history(
    report: &HistoryReport,
    format: OutputFormat,
) -> Result<String, BreatheError> {
    match format {
        OutputFormat::Pretty => Ok(format_history_pretty(report)),
        OutputFormat::Json => to_json(report),
    }
}
