//! Validation errors for configuration files.

use thiserror::Error;

/// Errors raised while loading or checking configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("parse error: {0}")]
    ParseError(String),

    #[error("incompatible schema version {found} (expected {expected})")]
    SchemaVersion { found: String, expected: String },

    #[error("{field} must be a probability in [0, 1], got {value}")]
    NotAProbability { field: String, value: f64 },

    #[error("{field} must sum to 1, got {sum}")]
    NotNormalized { field: String, sum: f64 },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

impl From<ValidationError> for hd_common::Error {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::IoError(msg) => hd_common::Error::Config(msg),
            other => hd_common::Error::InvalidParams(other.to_string()),
        }
    }
}

/// Check that `value` is a finite probability.
pub(crate) fn check_probability(field: &str, value: f64) -> Result<(), ValidationError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::NotAProbability {
            field: field.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probability_bounds() {
        assert!(check_probability("p", 0.0).is_ok());
        assert!(check_probability("p", 1.0).is_ok());
        assert!(check_probability("p", -0.1).is_err());
        assert!(check_probability("p", 1.000_001).is_err());
        assert!(check_probability("p", f64::NAN).is_err());
    }

    #[test]
    fn io_errors_map_to_config() {
        let err: hd_common::Error = ValidationError::IoError("gone".into()).into();
        assert_eq!(err.code(), 10);
        let err: hd_common::Error = ValidationError::ParseError("bad".into()).into();
        assert_eq!(err.code(), 11);
    }
}
