//! `show` command.

use crate::error::BreatheError;
use crate::output::format_technique;

use super::Context;

/// Show one technique in detail.
///
/// # Errors
///
/// Returns `BreatheError::NotFound` if no technique matches `query`.
pub fn show(ctx: &Context, query: &str) -> Result<String, BreatheError> {
    let index = ctx.resolve(query)?;
    let technique = ctx.catalog.get(index).ok_or(BreatheError::InvalidTechnique {
        index,
        available: ctx.catalog.len(),
    })?;
    format_technique(index + 1, technique, ctx.format)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::context;
    use super::*;
    use crate::cli::args::OutputFormat;

    #[test]
    fn test_show_by_prefix() {
        let (_dir, ctx) = context(OutputFormat::Json);
        let output = show(&ctx, "box").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["name"], "Box Breathing");
        assert_eq!(parsed["number"], 2);
        assert_eq!(parsed["session_seconds"], 80);
    }

    #[test]
    fn test_show_unknown() {
        let (_dir, ctx) = context(OutputFormat::Pretty);
        assert!(show(&ctx, "triangle").is_err());
    }
}
