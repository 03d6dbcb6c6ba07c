//! Sorted multiset of boundary prices
//!
//! Holds the min and max price of every live bucket for one scope (all
//! instruments, or a single instrument). After a bucket is evicted, the
//! smallest and largest remaining entries are the extremes of the data that
//! is still in the window, without rescanning any bucket.

use std::collections::BTreeMap;

use types::numeric::Price;

/// A `(min, max)` pair contributed by one bucket.
pub type Bounds = (Price, Price);

/// Ordered multiset keyed by price, with multiplicities.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundarySet {
    counts: BTreeMap<Price, usize>,
    len: usize,
}

impl BoundarySet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, price: Price) {
        *self.counts.entry(price).or_insert(0) += 1;
        self.len += 1;
    }

    /// Remove one occurrence of `price`. Returns false if it was not present.
    pub fn remove(&mut self, price: Price) -> bool {
        match self.counts.get_mut(&price) {
            Some(count) if *count > 1 => *count -= 1,
            Some(_) => {
                self.counts.remove(&price);
            }
            None => return false,
        }
        self.len -= 1;
        true
    }

    pub fn insert_pair(&mut self, (min, max): Bounds) {
        self.insert(min);
        self.insert(max);
    }

    pub fn remove_pair(&mut self, (min, max): Bounds) {
        let removed_min = self.remove(min);
        let removed_max = self.remove(max);
        debug_assert!(removed_min && removed_max, "boundary pair was not tracked");
    }

    /// Swap a bucket's previous contribution for its current one.
    ///
    /// Keeps each bucket at exactly two entries, however many ticks it has seen.
    pub fn replace_pair(&mut self, previous: Option<Bounds>, current: Bounds) {
        if previous == Some(current) {
            return;
        }
        if let Some(previous) = previous {
            self.remove_pair(previous);
        }
        self.insert_pair(current);
    }

    pub fn first(&self) -> Option<Price> {
        self.counts.keys().next().copied()
    }

    pub fn last(&self) -> Option<Price> {
        self.counts.keys().next_back().copied()
    }

    /// Smallest and largest entry, if any.
    pub fn bounds(&self) -> Option<Bounds> {
        self.first().zip(self.last())
    }

    /// Number of entries, counting duplicates.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
