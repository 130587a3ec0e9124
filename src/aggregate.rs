use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::collections::btree_map;

use serde::Serialize;

use crate::log::{LogEntry, LogLevel};

/// Occurrence counts per key. Keys only exist once they have been counted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Counter<K: Ord> {
    counts: BTreeMap<K, u64>,
}

impl<K: Ord> Default for Counter<K> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
        }
    }
}

impl<K: Ord> Counter<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, key: K) {
        *self.counts.entry(key).or_insert(0) += 1;
    }

    /// Count for `key`, zero when it was never seen.
    pub fn get<Q>(&self, key: &Q) -> u64
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.counts.get(key).copied().unwrap_or(0)
    }

    #[cfg(test)]
    fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.counts.contains_key(key)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.counts.len()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Entries in ascending key order.
    pub fn iter(&self) -> btree_map::Iter<'_, K, u64> {
        self.counts.iter()
    }
}

impl<'a, K: Ord> IntoIterator for &'a Counter<K> {
    type Item = (&'a K, &'a u64);
    type IntoIter = btree_map::Iter<'a, K, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateCounts {
    pub levels: Counter<LogLevel>,
    pub services: Counter<String>,
    /// Messages of ERROR entries only.
    pub errors: Counter<String>,
}

/// Running tallies for one parse run.
#[derive(Debug, Default)]
pub struct Aggregator {
    counts: AggregateCounts,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, entry: &LogEntry) {
        self.counts.levels.increment(entry.level);
        self.counts.services.increment(entry.service.clone());
        if entry.level == LogLevel::Error {
            self.counts.errors.increment(entry.message.clone());
        }
    }

    #[cfg(test)]
    fn counts(&self) -> &AggregateCounts {
        &self.counts
    }

    pub fn finish(self) -> AggregateCounts {
        self.counts
    }
}

impl<'a> Extend<&'a LogEntry> for Aggregator {
    fn extend<I: IntoIterator<Item = &'a LogEntry>>(&mut self, iter: I) {
        for entry in iter {
            self.record(entry);
        }
    }
}
