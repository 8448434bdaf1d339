//! Heredity math utilities.

pub mod math;

pub use math::normalize::*;
pub use math::radix::MixedRadix;
pub use math::subset::{powerset, Subsets};
