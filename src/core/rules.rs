//! Association rule generation
//!
//! Every frequent itemset S of size ≥ 2 is split into each non-empty proper
//! subset A (antecedent) and its complement C (consequent). Support counts of
//! A and C are looked up in the mined itemset table, never recounted from the
//! transactions. By the Apriori property both are always present; a missing
//! lookup means the miner is broken and aborts the run.

use crate::types::{AssociationRule, FrequentItemset, ItemId, Itemset, MiningError, MiningParams};
use std::collections::HashMap;

/// Largest itemset that can be split with a `u64` subset mask
const MAX_SPLIT_LEN: usize = 63;

/// Support counts of all mined itemsets, keyed by sorted item codes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemsetTable {
    counts: HashMap<Itemset, u64>,
}

impl ItemsetTable {
    /// Collect mined itemsets into a table
    ///
    /// # Errors
    ///
    /// Returns `MiningError::InvariantViolation` if the same itemset arrives
    /// twice with different counts.
    pub fn from_itemsets(itemsets: Vec<FrequentItemset>) -> Result<Self, MiningError> {
        let mut counts: HashMap<Itemset, u64> = HashMap::with_capacity(itemsets.len());

        for itemset in itemsets {
            if itemset.is_empty() {
                return Err(MiningError::invariant("miner produced an empty itemset"));
            }

            match counts.get(&itemset.items) {
                Some(&existing) if existing != itemset.count => {
                    return Err(MiningError::invariant(format!(
                        "itemset {:?} mined with counts {} and {}",
                        itemset.items, existing, itemset.count
                    )));
                }
                Some(_) => {}
                None => {
                    counts.insert(itemset.items, itemset.count);
                }
            }
        }

        Ok(Self { counts })
    }

    /// Support count of a sorted itemset, if it is frequent
    pub fn count(&self, items: &[ItemId]) -> Option<u64> {
        self.counts.get(items).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Itemset, u64)> {
        self.counts.iter().map(|(items, &count)| (items, count))
    }
}

/// Derive all rules meeting the confidence (and optional lift) threshold
///
/// # Arguments
///
/// * `table` - Every frequent itemset of the run with its count
/// * `total_transactions` - Denominator for all support fractions
/// * `params` - Validated thresholds
///
/// # Errors
///
/// Returns `MiningError::InvariantViolation` when a subset of a frequent
/// itemset is missing from the table.
pub fn generate_rules(
    table: &ItemsetTable,
    total_transactions: usize,
    params: &MiningParams,
) -> Result<Vec<AssociationRule>, MiningError> {
    let mut rules = Vec::new();
    if total_transactions == 0 {
        return Ok(rules);
    }

    for (itemset, count) in table.iter() {
        if itemset.len() < 2 {
            continue;
        }
        if itemset.len() > MAX_SPLIT_LEN {
            return Err(MiningError::invariant(format!(
                "itemset of {} items cannot be split into rules",
                itemset.len()
            )));
        }

        let full: u64 = (1u64 << itemset.len()) - 1;
        for mask in 1..full {
            let (antecedent, consequent) = split(itemset, mask);

            let antecedent_count = lookup(table, &antecedent, itemset)?;
            let consequent_count = lookup(table, &consequent, itemset)?;

            let rule = build_rule(
                antecedent,
                consequent,
                count,
                antecedent_count,
                consequent_count,
                total_transactions,
            );

            if rule.confidence < params.min_confidence {
                continue;
            }
            if params.min_lift.is_some_and(|min_lift| rule.lift < min_lift) {
                continue;
            }

            rules.push(rule);
        }
    }

    Ok(rules)
}

/// Items whose bit is set go left, the rest go right; both stay sorted
fn split(itemset: &[ItemId], mask: u64) -> (Itemset, Itemset) {
    let mut antecedent = Vec::new();
    let mut consequent = Vec::new();

    for (position, &item) in itemset.iter().enumerate() {
        if mask & (1u64 << position) != 0 {
            antecedent.push(item);
        } else {
            consequent.push(item);
        }
    }

    (antecedent, consequent)
}

fn lookup(table: &ItemsetTable, subset: &[ItemId], parent: &[ItemId]) -> Result<u64, MiningError> {
    match table.count(subset) {
        Some(count) if count > 0 => Ok(count),
        _ => Err(MiningError::invariant(format!(
            "subset {:?} of frequent itemset {:?} missing from mined itemsets",
            subset, parent
        ))),
    }
}

/// Compute every metric of `A → C` from absolute counts
///
/// Lift is taken as count(S)·N / (count(A)·count(C)), which is the same
/// value in both rule directions.
pub fn build_rule(
    antecedent: Itemset,
    consequent: Itemset,
    count: u64,
    antecedent_count: u64,
    consequent_count: u64,
    total_transactions: usize,
) -> AssociationRule {
    let total = total_transactions as f64;

    let support = count as f64 / total;
    let antecedent_support = antecedent_count as f64 / total;
    let consequent_support = consequent_count as f64 / total;
    let confidence = count as f64 / antecedent_count as f64;
    let lift = (count as f64 * total) / (antecedent_count as f64 * consequent_count as f64);
    let leverage = support - antecedent_support * consequent_support;
    let conviction = if count == antecedent_count {
        None
    } else {
        Some((1.0 - consequent_support) / (1.0 - confidence))
    };

    AssociationRule {
        antecedent,
        consequent,
        count,
        support,
        antecedent_support,
        consequent_support,
        confidence,
        lift,
        leverage,
        conviction,
    }
}
