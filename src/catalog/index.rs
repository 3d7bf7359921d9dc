//! Derived attribute indices.
//!
//! Each index maps an attribute value to the insertion sequence numbers of
//! the records carrying it. Every insert or replace takes a fresh sequence
//! number and none is reused, so iterating a set yields insertion order.

use std::collections::{BTreeMap, BTreeSet};

pub type IdSet = BTreeSet<u64>;

#[derive(Clone, Debug)]
pub struct AttributeIndex<K: Ord> {
    entries: BTreeMap<K, IdSet>,
}

impl<K: Ord> Default for AttributeIndex<K> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<K: Ord + Clone> AttributeIndex<K> {
    pub fn insert(&mut self, key: K, seq: u64) {
        self.entries.entry(key).or_default().insert(seq);
    }

    /// Drop `seq` from `key`, removing the key once no record carries it.
    pub fn remove(&mut self, key: &K, seq: u64) {
        if let Some(set) = self.entries.get_mut(key) {
            set.remove(&seq);
            if set.is_empty() {
                self.entries.remove(key);
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<&IdSet> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K, seq: u64) -> bool {
        self.entries.get(key).is_some_and(|set| set.contains(&seq))
    }

    /// Distinct keys with the number of records carrying each.
    pub fn counts(&self) -> impl Iterator<Item = (&K, usize)> {
        self.entries.iter().map(|(key, set)| (key, set.len()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &IdSet)> {
        self.entries.iter()
    }

    pub fn key_count(&self) -> usize {
        self.entries.len()
    }

    /// True when every sequence number in the index is in `live`.
    pub fn within(&self, live: &IdSet) -> bool {
        self.entries.values().all(|set| set.is_subset(live))
    }
}

/// Narrow `current` to `next`; `None` means "not narrowed yet".
pub fn intersect(current: Option<IdSet>, next: &IdSet) -> IdSet {
    match current {
        None => next.clone(),
        Some(set) => set.intersection(next).copied().collect(),
    }
}
