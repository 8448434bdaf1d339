//! Mixed-radix indexing of Cartesian products.
//!
//! A product of finite per-position domains is numbered `0..total`, with
//! position 0 as the least significant digit. Any index range can be
//! decoded once and then walked with [`MixedRadix::increment`], which is how
//! the product is split into independent shards.

/// Shape of a Cartesian product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MixedRadix {
    radices: Vec<u32>,
    total: u64,
}

impl MixedRadix {
    /// Returns `None` if any radix is zero or the product overflows `u64`.
    pub fn new(radices: Vec<u32>) -> Option<Self> {
        let mut total: u64 = 1;
        for &r in &radices {
            if r == 0 {
                return None;
            }
            total = total.checked_mul(u64::from(r))?;
        }
        Some(Self { radices, total })
    }

    /// Number of elements in the product.
    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn radices(&self) -> &[u32] {
        &self.radices
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.radices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.radices.is_empty()
    }

    /// Write the digits of `index` into `digits`.
    ///
    /// `digits` must have one slot per position; `index` must be below `total`.
    pub fn decode(&self, mut index: u64, digits: &mut [u32]) {
        debug_assert_eq!(digits.len(), self.radices.len());
        debug_assert!(index < self.total);
        for (digit, &radix) in digits.iter_mut().zip(&self.radices) {
            let r = u64::from(radix);
            *digit = (index % r) as u32;
            index /= r;
        }
    }

    /// Advance `digits` to the next index. Returns `false` on wrap-around.
    pub fn increment(&self, digits: &mut [u32]) -> bool {
        for (digit, &radix) in digits.iter_mut().zip(&self.radices) {
            *digit += 1;
            if *digit < radix {
                return true;
            }
            *digit = 0;
        }
        false
    }

    /// Split `0..total` into at most `shards` contiguous, non-empty ranges.
    pub fn shard_ranges(&self, shards: usize) -> Vec<std::ops::Range<u64>> {
        let shards = (shards.max(1) as u64).min(self.total);
        let base = self.total / shards;
        let extra = self.total % shards;
        let mut out = Vec::with_capacity(shards as usize);
        let mut start = 0;
        for i in 0..shards {
            let len = base + u64::from(i < extra);
            out.push(start..start + len);
            start += len;
        }
        out
    }
}
