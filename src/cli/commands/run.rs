//! `run` command.

use crate::cli::args::OutputFormat;
use crate::error::BreatheError;
use crate::features::breathing::format_duration;
use crate::output::to_json;
use crate::tui;

use super::Context;

/// Start the interactive session.
///
/// # Errors
///
/// Returns an error if the technique cannot be found or the terminal fails.
pub fn run(ctx: &Context, technique: Option<&str>) -> Result<String, BreatheError> {
    let index = match technique {
        Some(query) => ctx.resolve(query)?,
        None => ctx.default_technique(),
    };

    let completed = tui::run(ctx, index)?;

    match ctx.format {
        OutputFormat::Json => to_json(&completed),
        OutputFormat::Pretty if completed.is_empty() => Ok(String::new()),
        OutputFormat::Pretty => {
            let seconds: u64 = completed.iter().map(|e| e.seconds).sum();
            let sessions = if completed.len() == 1 { "session" } else { "sessions" };
            Ok(format!(
                "Completed {} {} ({})",
                completed.len(),
                sessions,
                format_duration(seconds)
            ))
        }
    }
}
