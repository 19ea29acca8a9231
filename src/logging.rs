//! Logging initialization.
//!
//! Structured logging via `tracing`. Verbosity comes from the `-v` flag and
//! can be overridden with `BREATHE_LOG`.

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::BreatheError;

/// Environment variable holding a filter directive, e.g. `breathe=debug`.
pub const LOG_ENV: &str = "BREATHE_LOG";

/// Where log lines go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogTarget {
    /// Standard error.
    #[default]
    Stderr,
    /// Appended to a file. Used while the terminal is in the alternate screen.
    File(PathBuf),
}

/// Maps a verbosity level to a tracing directive string.
///
/// - 0 → `"warn"`
/// - 1 → `"info"`
/// - 2 → `"debug"`
/// - 3+ → `"trace"` (saturates)
#[must_use]
pub const fn verbosity_to_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initializes the global tracing subscriber.
///
/// If `BREATHE_LOG` is set it takes precedence over `verbosity`. Uses
/// `try_init()` so calling this more than once (e.g. in tests) is safe.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
pub fn init_logging(verbosity: u8, target: &LogTarget) -> Result<(), BreatheError> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(verbosity_to_directive(verbosity)));

    let show_target = verbosity >= 2;

    match target {
        LogTarget::Stderr => {
            let use_ansi =
                std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none();
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(use_ansi)
                .with_target(show_target)
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|e| {
                    BreatheError::Config(format!(
                        "Failed to open log file {}: {e}",
                        path.display()
                    ))
                })?;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_target(show_target)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_target_is_stderr() {
        assert_eq!(LogTarget::default(), LogTarget::Stderr);
    }

    #[test]
    fn test_init_logging_is_repeatable() {
        init_logging(0, &LogTarget::Stderr).unwrap();
        init_logging(3, &LogTarget::Stderr).unwrap();
    }

    #[test]
    fn test_file_target_creates_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("breathe.log");

        init_logging(1, &LogTarget::File(path.clone())).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_file_target_in_missing_dir_fails() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("breathe.log");

        let err = init_logging(1, &LogTarget::File(path)).unwrap_err();
        assert!(matches!(err, BreatheError::Config(_)));
    }

    #[test]
    fn test_verbosity_mapping() {
        assert_eq!(verbosity_to_directive(0), "warn");
        assert_eq!(verbosity_to_directive(1), "info");
        assert_eq!(verbosity_to_directive(2), "debug");
        assert_eq!(verbosity_to_directive(3), "trace");
        assert_eq!(verbosity_to_directive(255), "trace");
    }
}
