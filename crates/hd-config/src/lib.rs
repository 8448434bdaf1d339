//! Heredity configuration loading and validation.
//!
//! This crate provides:
//! - Typed Rust structs for the network CPT file (params.json)
//! - Engine tuning knobs (population ceiling, rounding, sharding)
//! - Parameter resolution (CLI → env → XDG → embedded defaults)
//! - Semantic validation

pub mod engine;
pub mod params;
pub mod resolve;
pub mod validate;

pub use engine::InferenceConfig;
pub use params::{GeneTable, NetworkParams};
pub use resolve::{resolve_params, ParamsSource, PARAMS_ENV_VAR};
pub use validate::ValidationError;

/// Schema version for configuration files.
pub const CONFIG_SCHEMA_VERSION: &str = "1.0.0";
