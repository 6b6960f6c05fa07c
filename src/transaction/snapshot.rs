//! Snapshot - one complete view of the store.
//!
//! A snapshot owns a key→value map and the `ValueIndex` that mirrors it.
//! The base state and every transaction frame are each one snapshot; a
//! frame starts life as a clone of the view it was begun from.

use std::collections::HashMap;

use crate::index::ValueIndex;

/// A key→value map plus its value→count index.
///
/// All mutation goes through [`Snapshot::put`] and [`Snapshot::remove`],
/// which keep the two maps consistent: for every value `V`,
/// `index.lookup(V)` is the number of keys mapped to `V`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Key → value.
    storage: HashMap<String, String>,
    /// Value → number of keys holding it.
    index: ValueIndex,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty snapshot with room for `capacity` keys.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: HashMap::with_capacity(capacity),
            index: ValueIndex::new(),
        }
    }

    /// Get the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.storage.get(key).map(String::as_str)
    }

    /// Number of keys holding `value`.
    pub fn count(&self, value: &str) -> Option<usize> {
        self.index.lookup(value)
    }

    /// Check if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.storage.contains_key(key)
    }

    /// Store `value` under `key`.
    ///
    /// Re-storing a key's current value leaves the index untouched.
    pub fn put(&mut self, key: String, value: String) {
        match self.storage.get(&key) {
            Some(old) if *old == value => return,
            Some(old) => self.index.decrement(old),
            None => {}
        }
        self.index.increment(&value);
        self.storage.insert(key, value);
    }

    /// Remove `key`, returning the value it held.
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let value = self.storage.remove(key)?;
        self.index.decrement(&value);
        Some(value)
    }

    /// Replace this snapshot's contents wholesale with `other`'s.
    ///
    /// Used by commit: the parent view becomes exactly the child frame.
    pub fn replace_with(&mut self, other: Snapshot) {
        *self = other;
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Check if no keys are stored.
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Number of distinct values.
    pub fn distinct_values(&self) -> usize {
        self.index.len()
    }

    /// Get the value index.
    pub fn index(&self) -> &ValueIndex {
        &self.index
    }

    /// Iterate over `(key, value)` pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.storage.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
