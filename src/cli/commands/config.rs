//! `config` command.

use crate::cli::args::{ConfigCommands, OutputFormat};
use crate::config::Config;
use crate::error::BreatheError;
use crate::output::to_json;

use super::Context;

/// Execute config subcommands.
///
/// # Errors
///
/// Returns an error if the config file cannot be written or serialized.
pub fn config(ctx: &Context, cmd: ConfigCommands) -> Result<String, BreatheError> {
    match cmd {
        ConfigCommands::Show => match ctx.format {
            OutputFormat::Pretty => ctx.config.to_yaml(),
            OutputFormat::Json => to_json(&ctx.config),
        },
        ConfigCommands::Init { force } => init(ctx, force),
        ConfigCommands::Path => Ok(ctx.paths.config_file.display().to_string()),
    }
}

fn init(ctx: &Context, force: bool) -> Result<String, BreatheError> {
    let path = &ctx.paths.config_file;
    if path.exists() && !force {
        return Err(BreatheError::Config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    ctx.paths.ensure_dirs()?;
    Config::default().save_to_path(path)?;
    Ok(format!("Wrote {}", path.display()))
}
