//! Error types for breathe.

use thiserror::Error;

/// Errors produced by the breathing engine, its catalog and the host program.
#[derive(Debug, Error)]
pub enum BreatheError {
    /// A technique index outside the catalog was selected.
    #[error("Invalid technique index {index} (catalog has {available} techniques)")]
    InvalidTechnique {
        /// The rejected index.
        index: usize,
        /// Number of techniques in the catalog.
        available: usize,
    },

    /// A session command was issued before any technique was selected.
    #[error("No technique selected")]
    NoTechniqueSelected,

    /// The technique's phases are all zero seconds long.
    #[error("Technique '{0}' has no phase longer than zero seconds")]
    DegenerateTechnique(String),

    /// A catalog entry failed validation.
    #[error("Invalid pattern for technique '{technique}': {reason}")]
    InvalidPattern {
        /// Name of the rejected technique.
        technique: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Configuration could not be read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Practice log database failure.
    #[error("Database error: {0}")]
    Database(String),

    /// Input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Terminal setup or drawing failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for BreatheError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {err}"))
    }
}

impl From<rusqlite::Error> for BreatheError {
    fn from(err: rusqlite::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl BreatheError {
    /// Whether this error is a local engine validation failure.
    ///
    /// Validation failures leave the engine untouched; hosts surface them to
    /// the user instead of aborting.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidTechnique { .. }
                | Self::NoTechniqueSelected
                | Self::DegenerateTechnique(_)
                | Self::InvalidPattern { .. }
        )
    }
}
