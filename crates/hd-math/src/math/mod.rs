//! Core math modules.

pub mod normalize;
pub mod radix;
pub mod subset;
