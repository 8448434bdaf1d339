//! Gene copy count of a single individual.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of mutated copies of the gene an individual carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
#[repr(u8)]
pub enum GeneCount {
    Zero = 0,
    One = 1,
    Two = 2,
}

impl GeneCount {
    /// All counts in ascending order.
    pub const ALL: [GeneCount; 3] = [GeneCount::Zero, GeneCount::One, GeneCount::Two];

    /// Bucket index (0, 1 or 2).
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl From<GeneCount> for u8 {
    fn from(count: GeneCount) -> Self {
        count as u8
    }
}

impl TryFrom<u8> for GeneCount {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        GeneCount::from_index(value as usize)
            .ok_or_else(|| format!("gene count must be 0, 1 or 2, got {value}"))
    }
}

impl fmt::Display for GeneCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u8)
    }
}
