//! Frequency counting and ranking shared by the typography and color
//! extractors.

use std::{cmp::Reverse, hash::Hash};

use indexmap::IndexMap;
use itertools::Itertools;

use crate::ordinal::order_label;

/// Insertion-ordered tally from a grouping key to an accumulated value and
/// the number of times the key was recorded.
#[derive(Debug)]
pub struct Tally<K, V> {
    entries: IndexMap<K, Counted<V>>,
}

#[derive(Debug)]
struct Counted<V> {
    value: V,
    count: usize,
}

/// A tallied key and value after ranking.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<K, V> {
    pub key: K,
    pub value: V,
    pub count: usize,
    pub order_label: String,
}

impl<K: Hash + Eq, V> Tally<K, V> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    /// Counts one occurrence of `key`. The value is built by `init` on the
    /// first occurrence only; the returned reference lets callers fold later
    /// occurrences into it.
    pub fn record(&mut self, key: K, init: impl FnOnce() -> V) -> &mut V {
        let entry = self.entries.entry(key).or_insert_with(|| Counted {
            value: init(),
            count: 0,
        });
        entry.count += 1;
        &mut entry.value
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Orders by descending count, keeping first-seen order among equal
    /// counts, and labels each entry by its final 1-indexed position.
    pub fn ranked(self) -> Vec<Ranked<K, V>> {
        self.entries
            .into_iter()
            .sorted_by_key(|(_, counted)| Reverse(counted.count))
            .enumerate()
            .map(|(index, (key, counted))| Ranked {
                key,
                value: counted.value,
                count: counted.count,
                order_label: order_label(index + 1),
            })
            .collect()
    }
}

impl<K: Hash + Eq, V> Default for Tally<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
