//! Transaction encoding
//!
//! This module turns label-based baskets into the integer-coded form the
//! FP-tree works on. It:
//! - Counts how many transactions contain each label
//! - Drops labels below the absolute support threshold (by the Apriori
//!   property they cannot appear in any frequent itemset)
//! - Assigns dense codes by descending count, ties broken by label
//! - Rewrites every transaction as a code list in that order
//!
//! Transactions left with no frequent item are dropped from mining but still
//! count towards the total.

use crate::types::{ItemId, MiningError, Transaction};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Number of transactions containing each label
pub type ItemCounts = HashMap<String, u64>;

/// Integer-coded transactions plus everything needed to decode them
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedTransactions {
    /// Non-empty code lists, each sorted ascending (most frequent item first)
    pub transactions: Vec<Vec<ItemId>>,
    /// Label of each code, indexed by code
    pub labels: Vec<String>,
    /// Count of each code, indexed by code
    pub code_counts: Vec<u64>,
    /// Raw counts for every label seen, including infrequent ones
    pub item_frequency: ItemCounts,
    /// Number of input transactions, empty ones included
    pub total_transactions: usize,
}

impl EncodedTransactions {
    /// Label for an item code
    pub fn label(&self, item: ItemId) -> &str {
        &self.labels[item as usize]
    }

    /// Labels for a list of item codes
    pub fn decode(&self, items: &[ItemId]) -> Vec<String> {
        items.iter().map(|&item| self.label(item).to_string()).collect()
    }
}

/// Reject transactions that break the input contract
///
/// Labels must be non-empty and distinct within one transaction.
///
/// # Errors
///
/// Returns `MiningError::InvalidTransaction` for the first offending basket.
pub fn validate_transactions(transactions: &[Transaction]) -> Result<(), MiningError> {
    for (index, transaction) in transactions.iter().enumerate() {
        let mut seen = HashSet::with_capacity(transaction.len());
        for label in transaction {
            if label.is_empty() {
                return Err(MiningError::invalid_transaction(index, "empty item label"));
            }
            if !seen.insert(label.as_str()) {
                return Err(MiningError::invalid_transaction(
                    index,
                    format!("duplicate item '{}'", label),
                ));
            }
        }
    }

    Ok(())
}

/// Count how many transactions contain each label
pub fn count_items(transactions: &[Transaction]) -> ItemCounts {
    let mut counts = ItemCounts::new();

    for transaction in transactions {
        for label in transaction {
            *counts.entry(label.clone()).or_insert(0) += 1;
        }
    }

    counts
}

/// Encode transactions against precomputed label counts
///
/// # Arguments
///
/// * `transactions` - Validated baskets
/// * `counts` - Label counts over exactly these baskets
/// * `min_count` - Absolute support threshold
pub fn encode(
    transactions: &[Transaction],
    counts: ItemCounts,
    min_count: u64,
) -> EncodedTransactions {
    let (labels, code_counts): (Vec<String>, Vec<u64>) = {
        let mut frequent: Vec<(&String, u64)> = counts
            .iter()
            .filter(|(_, &count)| count >= min_count)
            .map(|(label, &count)| (label, count))
            .collect();

        frequent.sort_by(|a, b| match b.1.cmp(&a.1) {
            Ordering::Equal => a.0.cmp(b.0),
            other => other,
        });

        frequent
            .into_iter()
            .map(|(label, count)| (label.clone(), count))
            .unzip()
    };

    let encoded: Vec<Vec<ItemId>> = {
        let codes: HashMap<&str, ItemId> = labels
            .iter()
            .enumerate()
            .map(|(code, label)| (label.as_str(), code as ItemId))
            .collect();

        transactions
            .iter()
            .filter_map(|transaction| {
                let mut items: Vec<ItemId> = transaction
                    .iter()
                    .filter_map(|label| codes.get(label.as_str()).copied())
                    .collect();
                items.sort_unstable();

                if items.is_empty() {
                    None
                } else {
                    Some(items)
                }
            })
            .collect()
    };

    EncodedTransactions {
        transactions: encoded,
        labels,
        code_counts,
        item_frequency: counts,
        total_transactions: transactions.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn baskets(rows: &[&[&str]]) -> Vec<Transaction> {
        rows.iter()
            .map(|row| row.iter().map(|s| s.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_count_items() {
        let transactions = baskets(&[&["milk", "bread"], &["milk", "bread", "eggs"], &["bread"]]);
        let counts = count_items(&transactions);

        assert_eq!(counts.len(), 3);
        assert_eq!(counts["bread"], 3);
        assert_eq!(counts["milk"], 2);
        assert_eq!(counts["eggs"], 1);
    }

    #[test]
    fn test_encode_orders_codes_by_descending_count() {
        let transactions = baskets(&[
            &["milk", "bread"],
            &["milk", "bread", "eggs"],
            &["bread"],
            &["milk"],
        ]);
        let counts = count_items(&transactions);
        let encoded = encode(&transactions, counts, 2);

        // bread and milk tie at 3, label order breaks the tie
        assert_eq!(encoded.labels, vec!["bread", "milk"]);
        assert_eq!(encoded.code_counts, vec![3, 3]);
        assert_eq!(
            encoded.transactions,
            vec![vec![0, 1], vec![0, 1], vec![0], vec![1]]
        );
        assert_eq!(encoded.total_transactions, 4);
        assert_eq!(encoded.item_frequency["eggs"], 1);
    }

    #[test]
    fn test_encode_drops_transactions_without_frequent_items() {
        let transactions = baskets(&[&["a", "b"], &["c"], &["a"], &["d"]]);
        let counts = count_items(&transactions);
        let encoded = encode(&transactions, counts, 2);

        assert_eq!(encoded.labels, vec!["a"]);
        assert_eq!(encoded.transactions, vec![vec![0], vec![0]]);
        assert_eq!(encoded.total_transactions, 4);
        assert_eq!(encoded.item_frequency.len(), 4);
    }

    #[test]
    fn test_encode_sorts_each_transaction_by_frequency() {
        let transactions = baskets(&[&["x", "y", "z"], &["z", "y"], &["z"]]);
        let counts = count_items(&transactions);
        let encoded = encode(&transactions, counts, 1);

        assert_eq!(encoded.labels, vec!["z", "y", "x"]);
        assert_eq!(encoded.transactions[0], vec![0, 1, 2]);
        assert_eq!(encoded.decode(&[2, 0]), vec!["x", "z"]);
    }

    #[test]
    fn test_encode_empty_input() {
        let encoded = encode(&[], ItemCounts::new(), 1);

        assert!(encoded.transactions.is_empty());
        assert!(encoded.labels.is_empty());
        assert_eq!(encoded.total_transactions, 0);
    }

    #[rstest]
    #[case::empty_label(&[&["milk", ""][..]], "empty item label")]
    #[case::duplicate(&[&["milk"][..], &["bread", "milk", "bread"][..]], "duplicate item 'bread'")]
    fn test_validate_transactions_rejects(#[case] rows: &[&[&str]], #[case] message: &str) {
        let err = validate_transactions(&baskets(rows)).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains(message));
    }

    #[test]
    fn test_validate_transactions_accepts_empty_basket() {
        let transactions = baskets(&[&[], &["milk"]]);
        assert!(validate_transactions(&transactions).is_ok());
    }
}
