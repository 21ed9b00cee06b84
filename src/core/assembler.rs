//! Result assembly
//!
//! Decodes item codes back to labels and puts the report in its documented
//! order. No mining logic lives here.
//!
//! # Ordering
//!
//! - Itemsets: descending support, then fewer items first, then labels
//!   compared lexicographically.
//! - Rules: descending lift, then descending confidence, descending support,
//!   then antecedent labels and consequent labels.
//!
//! Labels inside an itemset, antecedent or consequent are sorted
//! alphabetically. Together this makes the output a pure function of the
//! input, whatever order the miner produced results in.

use crate::core::encoder::EncodedTransactions;
use crate::core::rules::ItemsetTable;
use crate::types::{AnalysisReport, AssociationRule, ItemId, ItemsetReport, RuleReport};
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Build the final report
///
/// # Arguments
///
/// * `encoded` - Encoder output, used for labels and raw frequencies
/// * `table` - All frequent itemsets with counts
/// * `rules` - Rules that passed the thresholds
pub fn assemble(
    encoded: &EncodedTransactions,
    table: &ItemsetTable,
    rules: Vec<AssociationRule>,
) -> AnalysisReport {
    let total = encoded.total_transactions;

    let mut frequent_itemsets: Vec<ItemsetReport> = table
        .iter()
        .map(|(items, count)| ItemsetReport {
            itemset: sorted_labels(encoded, items),
            support: fraction(count, total),
        })
        .collect();
    frequent_itemsets.sort_by(compare_itemsets);

    let mut association_rules: Vec<RuleReport> = rules
        .into_iter()
        .map(|rule| RuleReport {
            antecedents: sorted_labels(encoded, &rule.antecedent),
            consequents: sorted_labels(encoded, &rule.consequent),
            support: rule.support,
            confidence: rule.confidence,
            lift: rule.lift,
            antecedent_support: rule.antecedent_support,
            consequent_support: rule.consequent_support,
            leverage: rule.leverage,
            conviction: rule.conviction,
        })
        .collect();
    association_rules.sort_by(compare_rules);

    let item_frequency: BTreeMap<String, u64> = encoded
        .item_frequency
        .iter()
        .map(|(label, &count)| (label.clone(), count))
        .collect();

    AnalysisReport {
        frequent_itemsets,
        association_rules,
        unique_items: item_frequency.len(),
        item_frequency,
        total_transactions: total,
    }
}

fn fraction(count: u64, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64
    }
}

fn sorted_labels(encoded: &EncodedTransactions, items: &[ItemId]) -> Vec<String> {
    let mut labels = encoded.decode(items);
    labels.sort_unstable();
    labels
}

fn compare_itemsets(a: &ItemsetReport, b: &ItemsetReport) -> Ordering {
    b.support
        .total_cmp(&a.support)
        .then_with(|| a.itemset.len().cmp(&b.itemset.len()))
        .then_with(|| a.itemset.cmp(&b.itemset))
}

fn compare_rules(a: &RuleReport, b: &RuleReport) -> Ordering {
    b.lift
        .total_cmp(&a.lift)
        .then_with(|| b.confidence.total_cmp(&a.confidence))
        .then_with(|| b.support.total_cmp(&a.support))
        .then_with(|| a.antecedents.cmp(&b.antecedents))
        .then_with(|| a.consequents.cmp(&b.consequents))
}
