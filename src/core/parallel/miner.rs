//! Fork-join FP-growth on a tokio runtime
//!
//! This module provides the `ParallelMiner`, which mines the top-level
//! branches of the global FP-tree concurrently.
//!
//! # Design
//!
//! Branches rooted at different header items are independent: each one only
//! reads the shared global tree and builds its own conditional trees. The
//! miner therefore:
//! 1. Wraps the global tree in an `Arc`
//! 2. Spawns one task per header item on the runtime
//! 3. Lets every task fill a private result buffer
//! 4. Joins the tasks in header order and concatenates their buffers
//!
//! No locking is needed. If any task fails, the whole run fails; a partial
//! result is never returned.

use crate::core::fp_tree::FpTree;
use crate::core::miner::{grow, grow_item, MiningLimits};
use crate::core::traits::PatternMiner;
use crate::types::{FrequentItemset, MiningError};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::debug;

/// Fork-join miner over header-table branches
///
/// Holds a handle to a multi-threaded tokio runtime. `mine` blocks the
/// calling thread until every branch is done, so it must be called from
/// outside the runtime's async context.
#[derive(Debug, Clone)]
pub struct ParallelMiner {
    handle: Handle,
}

impl ParallelMiner {
    /// Create a miner spawning its tasks on `handle`
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }

    async fn join_branches(
        &self,
        tree: Arc<FpTree>,
        limits: MiningLimits,
    ) -> Result<Vec<FrequentItemset>, MiningError> {
        let mut tasks = Vec::with_capacity(tree.header().len());
        for header_index in 0..tree.header().len() {
            let tree = Arc::clone(&tree);
            let task = self.handle.spawn(async move {
                let mut out = Vec::new();
                grow_item(&tree, header_index, &[], limits, &mut out);
                out
            });
            tasks.push(task);
        }

        // every task is awaited even after a failure so none outlives the run
        let mut itemsets = Vec::new();
        let mut failure = None;
        for task in tasks {
            match task.await {
                Ok(branch) => itemsets.extend(branch),
                Err(e) => {
                    failure.get_or_insert(MiningError::from(e));
                }
            }
        }

        match failure {
            Some(error) => Err(error),
            None => Ok(itemsets),
        }
    }
}

impl PatternMiner for ParallelMiner {
    fn mine(&self, tree: FpTree, limits: MiningLimits) -> Result<Vec<FrequentItemset>, MiningError> {
        if tree.header().len() < 2 || tree.single_path().is_some() {
            let mut out = Vec::new();
            grow(&tree, &[], limits, &mut out);
            return Ok(out);
        }

        debug!(branches = tree.header().len(), "mining header branches in parallel");
        let tree = Arc::new(tree);
        self.handle.block_on(self.join_branches(tree, limits))
    }
}
