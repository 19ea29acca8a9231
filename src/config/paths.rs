//! Path resolution for breathe configuration and data files.
//!
//! All data is stored in `~/.breathe/` unless `BREATHE_HOME` points
//! elsewhere:
//! - `config.yaml` - Main configuration file
//! - `breathe.db` - `SQLite` practice log
//! - `breathe.log` - Log output of interactive sessions

use std::path::PathBuf;

use crate::error::BreatheError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "BREATHE_HOME";

/// Paths to breathe configuration and data files.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Root directory: `~/.breathe/`
    pub root: PathBuf,
    /// Config file: `~/.breathe/config.yaml`
    pub config_file: PathBuf,
    /// Database file: `~/.breathe/breathe.db`
    pub database: PathBuf,
    /// Log file: `~/.breathe/breathe.log`
    pub log_file: PathBuf,
}

impl Paths {
    /// Resolve paths from `BREATHE_HOME` or the user's home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if neither variable is set.
    pub fn new() -> Result<Self, BreatheError> {
        if let Some(root) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
            return Ok(Self::with_root(PathBuf::from(root)));
        }

        let home = std::env::var("HOME").map_err(|_| {
            BreatheError::Config("Could not determine home directory".to_string())
        })?;

        Ok(Self::with_root(PathBuf::from(home).join(".breathe")))
    }

    /// Create paths with a custom root directory.
    #[must_use]
    pub fn with_root(root: PathBuf) -> Self {
        Self {
            config_file: root.join("config.yaml"),
            database: root.join("breathe.db"),
            log_file: root.join("breathe.log"),
            root,
        }
    }

    /// Ensure the root directory exists.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation fails.
    pub fn ensure_dirs(&self) -> Result<(), BreatheError> {
        if !self.root.exists() {
            std::fs::create_dir_all(&self.root).map_err(|e| {
                BreatheError::Config(format!(
                    "Failed to create directory {}: {e}",
                    self.root.display()
                ))
            })?;
        }

        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().unwrap_or_else(|_| Self::with_root(PathBuf::from(".breathe")))
    }
}
