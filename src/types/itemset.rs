//! Code-level mining results: frequent itemsets and association rules

use super::transaction::Itemset;

/// A frequent itemset with its absolute support count
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequentItemset {
    /// Item codes, sorted ascending
    pub items: Itemset,
    /// Number of transactions containing every item
    pub count: u64,
}

impl FrequentItemset {
    pub fn new(mut items: Itemset, count: u64) -> Self {
        items.sort_unstable();
        Self { items, count }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Directional rule `antecedent → consequent` between disjoint itemsets
///
/// All fractions are relative to the total transaction count of the run.
#[derive(Debug, Clone, PartialEq)]
pub struct AssociationRule {
    /// Left-hand side item codes, sorted ascending
    pub antecedent: Itemset,
    /// Right-hand side item codes, sorted ascending
    pub consequent: Itemset,
    /// Support count of antecedent ∪ consequent
    pub count: u64,
    /// Support of antecedent ∪ consequent
    pub support: f64,
    /// Support of the antecedent alone
    pub antecedent_support: f64,
    /// Support of the consequent alone
    pub consequent_support: f64,
    /// support(A ∪ C) / support(A)
    pub confidence: f64,
    /// confidence / support(C)
    pub lift: f64,
    /// support(A ∪ C) - support(A) * support(C)
    pub leverage: f64,
    /// (1 - support(C)) / (1 - confidence), `None` when confidence is 1
    pub conviction: Option<f64>,
}
