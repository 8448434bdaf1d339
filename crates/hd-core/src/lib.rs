//! Heredity core: exact inference over a gene-inheritance pedigree.
//!
//! Every person carries three variables: a gene copy count (0, 1 or 2),
//! the alleles passed to children, and trait expression. Given observed
//! traits, the engine enumerates every consistent assignment, weighs it by
//! the network's conditional probability tables, and reports per-person
//! gene and trait marginals on a percent scale.
//!
//! ```no_run
//! use hd_core::config::NetworkParams;
//! use hd_core::pedigree::{Person, Population};
//!
//! let population = Population::from_people([
//!     Person::founder("Lily"),
//!     Person::founder("James"),
//!     Person::child("Harry", "Lily", "James").observed(true),
//! ])?;
//! let marginals = hd_core::calculate_probabilities(&population, &NetworkParams::default())?;
//! assert_eq!(marginals["Harry"].expression.present, 100.0);
//! # Ok::<(), hd_core::Error>(())
//! ```

pub mod cli;
pub mod exit_codes;
pub mod inference;
pub mod joint;
pub mod loader;
pub mod logging;
pub mod pedigree;
pub mod report;
pub mod world;

pub use hd_common::{Error, GeneCount, PersonName, Result};
pub use hd_config as config;

pub use inference::{calculate_by_subsets, calculate_probabilities, infer, InferenceEngine};
pub use joint::{joint_probability, world_probability};
pub use pedigree::{Person, Population};
pub use report::{InferenceReport, PersonPosterior, Posteriors};
