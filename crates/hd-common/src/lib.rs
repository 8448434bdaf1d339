//! Heredity common types, IDs, and errors.
//!
//! This crate provides foundational types shared across hd-core modules:
//! - Person and run identity types
//! - Gene copy counts
//! - Report schema versioning
//! - Common error types
//! - Output format selection

pub mod error;
pub mod gene;
pub mod id;
pub mod output;
pub mod schema;

pub use error::{Error, Result};
pub use gene::GeneCount;
pub use id::{PersonName, RunId};
pub use output::OutputFormat;
pub use schema::SCHEMA_VERSION;
