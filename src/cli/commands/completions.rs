//! `completions` command.

use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::args::Cli;
use crate::error::BreatheError;

/// Generate a completion script for `shell`.
///
/// # Errors
///
/// Returns an error if the generated script is not valid UTF-8.
pub fn completions(shell: Shell) -> Result<String, BreatheError> {
    let mut cmd = Cli::command();
    let mut buf = Vec::new();
    clap_complete::generate(shell, &mut cmd, "breathe", &mut buf);
    String::from_utf8(buf).map_err(|e| BreatheError::Parse(format!("UTF-8 error: {e}")))
}
