//! Exit codes for the heredity CLI.
//!
//! Exit codes communicate operation outcome without requiring output parsing.

use hd_common::Error;

/// Exit codes for heredity operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Clean = 0,

    /// Configuration or parameter error
    ConfigError = 10,

    /// Pedigree could not be loaded or is malformed
    PedigreeError = 11,

    /// Inference error (unsatisfiable evidence, cancellation)
    InferenceError = 12,

    /// I/O error
    IoError = 13,

    /// Internal/unknown error
    InternalError = 99,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates success.
    pub fn is_success(self) -> bool {
        matches!(self, ExitCode::Clean)
    }

    /// Map a library error to the exit code reported for it.
    pub fn for_error(err: &Error) -> Self {
        match err {
            Error::Config(_) | Error::InvalidParams(_) => ExitCode::ConfigError,
            Error::MalformedPedigree { .. } | Error::Load(_) | Error::PopulationTooLarge { .. } => {
                ExitCode::PedigreeError
            }
            Error::InvalidWorld(_) | Error::UnsatisfiableEvidence { .. } | Error::Cancelled { .. } => {
                ExitCode::InferenceError
            }
            Error::Io(_) | Error::Json(_) => ExitCode::IoError,
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}
