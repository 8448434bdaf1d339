//! Error types for Heredity.

use thiserror::Error;

/// Result type alias for Heredity operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for Heredity.
#[derive(Error, Debug)]
pub enum Error {
    // Configuration errors (10-19)
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid network parameters: {0}")]
    InvalidParams(String),

    // Pedigree errors (20-29)
    #[error("malformed pedigree: {person}: {reason}")]
    MalformedPedigree { person: String, reason: String },

    #[error("failed to load pedigree: {0}")]
    Load(String),

    #[error("population of {size} exceeds the limit of {limit} individuals")]
    PopulationTooLarge { size: usize, limit: usize },

    // Inference errors (30-39)
    #[error("invalid world: {0}")]
    InvalidWorld(String),

    #[error("unsatisfiable evidence: {distribution} distribution of {person} has zero mass")]
    UnsatisfiableEvidence {
        person: String,
        distribution: &'static str,
    },

    #[error("inference cancelled after {worlds} worlds")]
    Cancelled { worlds: u64 },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Returns the error code for this error type.
    /// Used for detailed error reporting in JSON output.
    pub fn code(&self) -> u32 {
        match self {
            Error::Config(_) => 10,
            Error::InvalidParams(_) => 11,
            Error::MalformedPedigree { .. } => 20,
            Error::Load(_) => 21,
            Error::PopulationTooLarge { .. } => 22,
            Error::InvalidWorld(_) => 30,
            Error::UnsatisfiableEvidence { .. } => 31,
            Error::Cancelled { .. } => 32,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Shorthand for a pedigree structure violation.
    pub fn malformed(person: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedPedigree {
            person: person.into(),
            reason: reason.into(),
        }
    }
}
