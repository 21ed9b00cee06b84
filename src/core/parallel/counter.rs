//! Thread-safe item counting for batched input
//!
//! This module provides the `ItemCounter` struct, which accumulates per-label
//! transaction counts from many batches at once.
//!
//! # Design
//!
//! `ItemCounter` uses `DashMap` (a concurrent HashMap) with fine-grained
//! locking, so tasks counting different batches only contend when they touch
//! the same label shard. Counting is commutative, so the final counts do not
//! depend on the order in which batches finish.

use crate::core::encoder::ItemCounts;
use crate::types::Transaction;
use dashmap::DashMap;

/// Concurrent per-label transaction counter
///
/// Share it behind an `Arc` between the tasks counting individual batches,
/// then take the totals with [`ItemCounter::into_counts`] once every task is
/// done.
#[derive(Debug, Default)]
pub struct ItemCounter {
    /// Number of transactions containing each label so far
    counts: DashMap<String, u64>,
}

impl ItemCounter {
    /// Create an empty counter
    pub fn new() -> Self {
        Self {
            counts: DashMap::new(),
        }
    }

    /// Add one batch of transactions to the counts
    ///
    /// Safe to call from many tasks at once. Labels are assumed distinct
    /// within each transaction.
    pub fn count_batch(&self, batch: &[Transaction]) {
        for transaction in batch {
            for label in transaction {
                // look up by &str first so known labels are not re-allocated
                if let Some(mut count) = self.counts.get_mut(label.as_str()) {
                    *count += 1;
                    continue;
                }
                *self.counts.entry(label.clone()).or_insert(0) += 1;
            }
        }
    }

    /// Current count for `label`
    pub fn get(&self, label: &str) -> u64 {
        self.counts.get(label).map(|count| *count).unwrap_or(0)
    }

    /// Number of distinct labels seen
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Consume the counter and return the plain counts
    pub fn into_counts(self) -> ItemCounts {
        self.counts.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::encoder::count_items;
    use std::sync::Arc;

    fn baskets(rows: &[&[&str]]) -> Vec<Transaction> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_count_batch() {
        let counter = ItemCounter::new();
        counter.count_batch(&baskets(&[&["milk", "bread"], &["milk"]]));
        counter.count_batch(&baskets(&[&["eggs", "milk"]]));

        assert_eq!(counter.get("milk"), 3);
        assert_eq!(counter.get("bread"), 1);
        assert_eq!(counter.get("eggs"), 1);
        assert_eq!(counter.get("butter"), 0);
        assert_eq!(counter.len(), 3);
    }

    #[test]
    fn test_empty_counter() {
        let counter = ItemCounter::new();
        assert!(counter.is_empty());
        assert!(counter.into_counts().is_empty());
    }

    #[test]
    fn test_matches_sequential_counting() {
        let all = baskets(&[
            &["a", "b", "c"],
            &["a", "c"],
            &["b"],
            &["c", "d"],
            &["a", "b", "d"],
        ]);

        let counter = ItemCounter::new();
        for chunk in all.chunks(2) {
            counter.count_batch(chunk);
        }

        assert_eq!(counter.into_counts(), count_items(&all));
    }

    #[test]
    fn test_concurrent_counting() {
        let counter = Arc::new(ItemCounter::new());
        let batch = baskets(&[&["a", "b"], &["a"]]);

        std::thread::scope(|scope| {
            for _ in 0..8 {
                let counter = Arc::clone(&counter);
                let batch = &batch;
                scope.spawn(move || {
                    for _ in 0..100 {
                        counter.count_batch(batch);
                    }
                });
            }
        });

        assert_eq!(counter.get("a"), 1600);
        assert_eq!(counter.get("b"), 800);
    }
}
