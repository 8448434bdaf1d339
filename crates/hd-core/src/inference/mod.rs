//! Inference engine modules.

pub mod accumulator;
pub mod cancel;
pub mod engine;
pub mod reference;

pub use accumulator::MarginalAccumulator;
pub use cancel::CancellationToken;
pub use engine::{calculate_probabilities, infer, InferenceEngine, CANCEL_CHECK_INTERVAL};
pub use reference::calculate_by_subsets;
