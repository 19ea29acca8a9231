//! JSON output formatting for breathe.

use serde::Serialize;
use serde_json::json;

use crate::error::BreatheError;
use crate::features::breathing::{Catalog, PhaseLabel, Technique};

/// A technique as shown to scripts.
#[derive(Debug, Serialize)]
struct TechniqueView<'a> {
    number: usize,
    name: &'a str,
    description: &'a str,
    pattern: &'a [u32],
    phases: Vec<PhaseView>,
    cycles: u32,
    cycle_seconds: u32,
    session_seconds: u64,
    breaths_per_minute: Option<f64>,
}

#[derive(Debug, Serialize)]
struct PhaseView {
    label: PhaseLabel,
    seconds: u32,
}

impl<'a> TechniqueView<'a> {
    fn new(number: usize, technique: &'a Technique) -> Self {
        Self {
            number,
            name: technique.name(),
            description: technique.description(),
            pattern: technique.pattern(),
            phases: technique
                .labelled_phases()
                .into_iter()
                .map(|(label, seconds)| PhaseView { label, seconds })
                .collect(),
            cycles: technique.cycles(),
            cycle_seconds: technique.cycle_seconds(),
            session_seconds: technique.session_seconds(),
            breaths_per_minute: technique.breaths_per_minute(),
        }
    }
}

/// Format the technique catalog as JSON
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_techniques_json(
    catalog: &Catalog,
    rejected: &[BreatheError],
) -> Result<String, BreatheError> {
    let items: Vec<TechniqueView<'_>> = catalog
        .iter()
        .enumerate()
        .map(|(i, t)| TechniqueView::new(i + 1, t))
        .collect();
    let rejected: Vec<String> = rejected.iter().map(ToString::to_string).collect();

    let output = json!({
        "count": items.len(),
        "items": items,
        "rejected": rejected,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}

/// Format a single technique as JSON
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn format_technique_json(number: usize, technique: &Technique) -> Result<String, BreatheError> {
    Ok(serde_json::to_string_pretty(&TechniqueView::new(
        number, technique,
    ))?)
}

/// Generic JSON formatter for any serializable type
///
/// # Errors
///
/// Returns `BreatheError::Parse` if JSON serialization fails.
pub fn to_json<T: Serialize>(value: &T) -> Result<String, BreatheError> {
    Ok(serde_json::to_string_pretty(value)?)
}
