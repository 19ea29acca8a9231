//! `techniques` command.

use crate::error::BreatheError;
use crate::output::format_techniques;

use super::Context;

/// List the catalog.
///
/// # Errors
///
/// Returns an error if output formatting fails.
pub fn techniques(ctx: &Context) -> Result<String, BreatheError> {
    format_techniques(&ctx.catalog, &ctx.rejected, ctx.format)
}
