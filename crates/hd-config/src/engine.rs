//! Inference engine tuning.
//!
//! Enumeration cost grows as 6^n in the population size, so the engine
//! refuses populations above `max_population` instead of running for hours.

use serde::{Deserialize, Serialize};

use crate::validate::ValidationError;

/// Hard upper bound on `max_population`.
pub const MAX_POPULATION_CEILING: usize = 20;

/// Largest supported rounding precision (decimal places).
pub const MAX_PRECISION: u32 = 15;

/// Configuration for one inference run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InferenceConfig {
    /// Largest population accepted.
    pub max_population: usize,
    /// Decimal places kept in percent outputs. `None` keeps full precision.
    pub precision: Option<u32>,
    /// Run shards on the rayon pool.
    pub parallel: bool,
    /// Number of index-range shards the world space is split into.
    pub shards: usize,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            max_population: 10,
            precision: Some(1),
            parallel: true,
            shards: 64,
        }
    }
}

impl InferenceConfig {
    /// Full-precision outputs, otherwise defaults.
    pub fn exact() -> Self {
        Self {
            precision: None,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_population == 0 || self.max_population > MAX_POPULATION_CEILING {
            return Err(ValidationError::InvalidValue {
                field: "max_population".to_string(),
                reason: format!("must be in 1..={MAX_POPULATION_CEILING}"),
            });
        }
        if self.shards == 0 {
            return Err(ValidationError::InvalidValue {
                field: "shards".to_string(),
                reason: "must be > 0".to_string(),
            });
        }
        if let Some(precision) = self.precision {
            if precision > MAX_PRECISION {
                return Err(ValidationError::InvalidValue {
                    field: "precision".to_string(),
                    reason: format!("must be <= {MAX_PRECISION}"),
                });
            }
        }
        Ok(())
    }
}
