//! `simulate` command.

use tracing::debug;

use crate::cli::args::SimulateArgs;
use crate::error::BreatheError;
use crate::features::breathing::{self, parse_pattern, Catalog, SimulationOptions, Technique};
use crate::output::format_simulation;

use super::Context;

const CUSTOM_NAME: &str = "Custom";
const CUSTOM_CYCLES: u32 = 4;

/// Run a session headlessly and print its timeline.
///
/// # Errors
///
/// Returns an error if the technique cannot be found, the pattern does not
/// parse, or the engine rejects the technique.
pub fn simulate(ctx: &Context, args: &SimulateArgs) -> Result<String, BreatheError> {
    let technique = build_technique(ctx, args)?;
    debug!(technique = %technique.name(), pattern = %technique.pattern_text(), "simulating");

    let options = SimulationOptions {
        steps_per_second: ctx.config.session.steps_per_second,
        max_seconds: args.ticks,
    };
    let simulation = breathing::simulate(Catalog::new(vec![technique]), 0, options)?;
    format_simulation(&simulation, ctx.format)
}

/// The catalog technique named by `args`, with any overrides applied.
fn build_technique(ctx: &Context, args: &SimulateArgs) -> Result<Technique, BreatheError> {
    let base = match &args.technique {
        Some(query) => {
            let index = ctx.resolve(query)?;
            ctx.catalog.get(index).cloned()
        }
        None => None,
    };

    if args.pattern.is_none() && args.cycles.is_none() {
        return base.ok_or(BreatheError::NoTechniqueSelected);
    }

    let name = base
        .as_ref()
        .map_or_else(|| CUSTOM_NAME.to_string(), |t| t.name().to_string());
    let description = base
        .as_ref()
        .map_or_else(String::new, |t| t.description().to_string());

    let pattern = match (&args.pattern, &base) {
        (Some(text), _) => parse_pattern(text).map_err(|reason| BreatheError::InvalidPattern {
            technique: name.clone(),
            reason,
        })?,
        (None, Some(t)) => t.pattern().to_vec(),
        (None, None) => return Err(BreatheError::NoTechniqueSelected),
    };

    let cycles = args
        .cycles
        .or_else(|| base.as_ref().map(Technique::cycles))
        .unwrap_or(CUSTOM_CYCLES);

    Technique::new(name, description, pattern, cycles)
}
