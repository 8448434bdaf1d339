//! Subset enumeration.
//!
//! Subsets are walked in bitmask order: bit `i` of the counter selects the
//! `i`-th item. The empty set comes first and the full set last.

use std::collections::BTreeSet;

/// Largest set whose subsets can be counted in a `u64`.
pub const MAX_SUBSET_ITEMS: usize = 63;

/// Lazy iterator over every subset of a slice.
#[derive(Debug, Clone)]
pub struct Subsets<'a, T> {
    items: &'a [T],
    next: u64,
    end: u64,
}

impl<'a, T> Subsets<'a, T> {
    /// Returns `None` when `items` has more than [`MAX_SUBSET_ITEMS`] members.
    pub fn new(items: &'a [T]) -> Option<Self> {
        if items.len() > MAX_SUBSET_ITEMS {
            return None;
        }
        Some(Self {
            items,
            next: 0,
            end: 1u64 << items.len(),
        })
    }

    /// Total number of subsets (2^n).
    pub fn count_total(&self) -> u64 {
        self.end
    }

    fn select(&self, mask: u64) -> Vec<&'a T> {
        self.items
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1u64 << i) != 0)
            .map(|(_, item)| item)
            .collect()
    }
}

impl<'a, T> Iterator for Subsets<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.end {
            return None;
        }
        let mask = self.next;
        self.next += 1;
        Some(self.select(mask))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/// Every subset of `set`, including the empty set and `set` itself.
///
/// # Panics
///
/// Panics if `set` has more than [`MAX_SUBSET_ITEMS`] members; the result
/// could not be held in memory anyway.
pub fn powerset<T: Ord + Clone>(set: &BTreeSet<T>) -> Vec<BTreeSet<T>> {
    let items: Vec<T> = set.iter().cloned().collect();
    assert!(
        items.len() <= MAX_SUBSET_ITEMS,
        "powerset of {} items is not enumerable",
        items.len()
    );
    let mut out = Vec::with_capacity(1usize << items.len());
    for mask in 0..(1u64 << items.len()) {
        let subset = items
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1u64 << i) != 0)
            .map(|(_, item)| item.clone())
            .collect();
        out.push(subset);
    }
    out
}
