//! Output schema consumed by presentation and storage layers
//!
//! Every item is referred to by its label here; item codes never leave the
//! engine.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One frequent itemset with its support fraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemsetReport {
    /// Item labels, sorted alphabetically
    pub itemset: Vec<String>,
    /// Fraction of transactions containing the itemset
    pub support: f64,
}

/// One association rule with its strength metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleReport {
    pub antecedents: Vec<String>,
    pub consequents: Vec<String>,
    pub support: f64,
    pub confidence: f64,
    pub lift: f64,
    pub antecedent_support: f64,
    pub consequent_support: f64,
    pub leverage: f64,
    /// Serialized as `null` for rules with confidence 1
    pub conviction: Option<f64>,
}

/// Complete result of one analysis run
///
/// Itemsets are ordered by descending support, rules by descending lift.
/// `item_frequency` holds raw counts for every label seen, frequent or not.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub frequent_itemsets: Vec<ItemsetReport>,
    pub association_rules: Vec<RuleReport>,
    pub item_frequency: BTreeMap<String, u64>,
    pub total_transactions: usize,
    pub unique_items: usize,
}

impl AnalysisReport {
    /// Report for a run over zero transactions
    pub fn empty() -> Self {
        Self::default()
    }

    /// Support of the itemset with exactly these labels, if it was reported
    ///
    /// Label order does not matter.
    pub fn support_of(&self, labels: &[&str]) -> Option<f64> {
        let mut wanted: Vec<&str> = labels.to_vec();
        wanted.sort_unstable();

        self.frequent_itemsets
            .iter()
            .find(|entry| {
                entry.itemset.len() == wanted.len()
                    && entry.itemset.iter().zip(&wanted).all(|(a, b)| a == b)
            })
            .map(|entry| entry.support)
    }
}
