//! Command implementations for breathe.
//!
//! Every command receives a [`Context`] with the loaded configuration and
//! technique catalog, and returns the text to print.

mod completions;
mod config;
mod history;
mod run;
mod show;
mod simulate;
mod techniques;

pub use completions::completions;
pub use config::config;
pub use history::history;
pub use run::run;
pub use show::show;
pub use simulate::simulate;
pub use techniques::techniques;

use tracing::warn;

use crate::cli::args::OutputFormat;
use crate::config::{Config, Paths};
use crate::error::BreatheError;
use crate::features::breathing::Catalog;

/// Everything a command needs from the environment.
#[derive(Debug)]
pub struct Context {
    /// Data file locations.
    pub paths: Paths,
    /// Loaded configuration.
    pub config: Config,
    /// Built-in plus configured techniques.
    pub catalog: Catalog,
    /// Configured techniques that failed validation.
    pub rejected: Vec<BreatheError>,
    /// Output format for this invocation.
    pub format: OutputFormat,
}

impl Context {
    /// Build a context from an already loaded configuration.
    #[must_use]
    pub fn with_config(paths: Paths, config: Config, output: Option<OutputFormat>) -> Self {
        let load = config.catalog();
        let format = output.unwrap_or(config.general.default_output);
        Self {
            paths,
            config,
            catalog: load.catalog,
            rejected: load.rejected,
            format,
        }
    }

    /// Find a technique by number or name prefix.
    ///
    /// # Errors
    ///
    /// Returns `BreatheError::NotFound` if nothing matches.
    pub fn resolve(&self, query: &str) -> Result<usize, BreatheError> {
        self.catalog.resolve(query).ok_or_else(|| {
            BreatheError::NotFound(format!(
                "No technique matches '{query}' (try 'breathe techniques')"
            ))
        })
    }

    /// The configured default technique, or the first one if it is missing.
    #[must_use]
    pub fn default_technique(&self) -> usize {
        let name = &self.config.session.default_technique;
        self.catalog.resolve(name).unwrap_or_else(|| {
            warn!(technique = %name, "default technique not in catalog, using the first");
            0
        })
    }
}
