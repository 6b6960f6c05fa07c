//! ValueIndex - reverse index from value to the number of keys holding it.
//!
//! The index mirrors a key→value map. For every value `V` present,
//! `lookup(V)` equals the number of keys currently mapped to `V`. A value
//! no key maps to has no entry at all; counts never sit at zero.

use std::collections::HashMap;

/// Value → count-of-keys mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueIndex {
    counts: HashMap<String, usize>,
}

impl ValueIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more key holding `value`.
    pub fn increment(&mut self, value: &str) {
        match self.counts.get_mut(value) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(value.to_owned(), 1);
            }
        }
    }

    /// Record one fewer key holding `value`.
    ///
    /// The entry is removed once its count reaches zero. Callers must only
    /// decrement values that are present.
    pub fn decrement(&mut self, value: &str) {
        debug_assert!(
            self.counts.contains_key(value),
            "decrement of unindexed value {:?}",
            value
        );

        if let Some(count) = self.counts.get_mut(value) {
            if *count > 1 {
                *count -= 1;
            } else {
                self.counts.remove(value);
            }
        }
    }

    /// Number of keys holding `value`, or `None` if no key does.
    pub fn lookup(&self, value: &str) -> Option<usize> {
        self.counts.get(value).copied()
    }

    /// Number of distinct values indexed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if no value is indexed.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over `(value, count)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.counts.iter().map(|(v, c)| (v.as_str(), *c))
    }
}
