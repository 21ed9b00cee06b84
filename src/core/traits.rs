//! Core traits for pattern mining
//!
//! This module defines the trait abstraction that allows the sequential and
//! the parallel miner to be used interchangeably by the engine.

use crate::core::fp_tree::FpTree;
use crate::core::miner::MiningLimits;
use crate::types::{FrequentItemset, MiningError};

/// Trait for mining frequent itemsets out of a built FP-tree
///
/// Implementations must return every itemset meeting `limits` exactly once,
/// or an error. A partial result is never returned.
pub trait PatternMiner: Send + Sync {
    /// Mine all frequent itemsets of the global tree
    fn mine(&self, tree: FpTree, limits: MiningLimits) -> Result<Vec<FrequentItemset>, MiningError>;
}
