//! Mining pipeline orchestration
//!
//! This module provides the `MiningEngine` that runs one analysis end to end:
//! parameter validation → transaction validation → encoding → FP-tree
//! construction → pattern mining → rule generation → result assembly.
//!
//! The engine enforces the run-level contract:
//! - Invalid parameters are rejected before any counting or tree building
//! - An empty transaction list yields an empty report, never a division by zero
//! - Any internal inconsistency aborts the run; no partial report is returned

use crate::core::assembler::assemble;
use crate::core::encoder::{count_items, encode, validate_transactions, ItemCounts};
use crate::core::fp_tree::FpTree;
use crate::core::miner::{MiningLimits, SequentialMiner};
use crate::core::rules::{generate_rules, ItemsetTable};
use crate::core::traits::PatternMiner;
use crate::types::{AnalysisReport, MiningError, MiningParams, Transaction};
use tracing::debug;

/// Market-basket analysis engine
///
/// Generic over the `PatternMiner` so the same pipeline drives both the
/// sequential and the fork-join miner. The engine holds no per-run state and
/// can analyze any number of datasets.
#[derive(Debug, Clone, Default)]
pub struct MiningEngine<M: PatternMiner = SequentialMiner> {
    miner: M,
}

impl MiningEngine<SequentialMiner> {
    /// Create an engine backed by the single-threaded miner
    pub fn sequential() -> Self {
        Self::new(SequentialMiner)
    }
}

impl<M: PatternMiner> MiningEngine<M> {
    /// Create an engine backed by `miner`
    pub fn new(miner: M) -> Self {
        MiningEngine { miner }
    }

    /// Run a full analysis over `transactions`
    ///
    /// # Arguments
    ///
    /// * `transactions` - Cleaned baskets: non-empty, distinct labels per basket
    /// * `params` - Support, confidence and optional lift/length thresholds
    ///
    /// # Returns
    ///
    /// * `Ok(AnalysisReport)` with itemsets and rules in their documented order
    /// * `Err(MiningError)` if validation fails or an invariant breaks
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A parameter is out of range (`InvalidParameter`)
    /// - A basket holds an empty or repeated label (`InvalidTransaction`)
    /// - The miner or rule generator detects an inconsistency
    ///   (`InvariantViolation`, `WorkerFailed`)
    pub fn analyze(
        &self,
        transactions: &[Transaction],
        params: &MiningParams,
    ) -> Result<AnalysisReport, MiningError> {
        params.validate()?;
        validate_transactions(transactions)?;

        let counts = count_items(transactions);
        self.run(transactions, counts, params)
    }

    /// Run a full analysis with item counts computed elsewhere
    ///
    /// Used when counting already happened while the input was read, e.g.
    /// by the concurrent `ItemCounter`. `counts` must describe exactly
    /// `transactions`.
    ///
    /// # Errors
    ///
    /// Same as [`MiningEngine::analyze`].
    pub fn analyze_with_counts(
        &self,
        transactions: &[Transaction],
        counts: ItemCounts,
        params: &MiningParams,
    ) -> Result<AnalysisReport, MiningError> {
        params.validate()?;
        validate_transactions(transactions)?;

        self.run(transactions, counts, params)
    }

    fn run(
        &self,
        transactions: &[Transaction],
        counts: ItemCounts,
        params: &MiningParams,
    ) -> Result<AnalysisReport, MiningError> {
        let total = transactions.len();
        if total == 0 {
            debug!("no transactions, returning empty report");
            return Ok(AnalysisReport::empty());
        }

        let min_count = params.min_support_count(total);
        let encoded = encode(transactions, counts, min_count);
        debug!(
            transactions = total,
            min_count,
            frequent_items = encoded.labels.len(),
            "encoded transactions"
        );

        let tree = FpTree::from_transactions(&encoded.transactions, min_count);
        debug!(nodes = tree.node_count(), "built FP-tree");

        let limits = MiningLimits::new(min_count, params.max_len);
        let itemsets = self.miner.mine(tree, limits)?;
        debug!(itemsets = itemsets.len(), "mined frequent itemsets");

        let table = ItemsetTable::from_itemsets(itemsets)?;
        let rules = generate_rules(&table, total, params)?;
        debug!(rules = rules.len(), "generated association rules");

        Ok(assemble(&encoded, &table, rules))
    }
}
