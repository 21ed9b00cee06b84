//! Parallel processing strategy
//!
//! This module provides a multi-threaded implementation of the
//! ProcessingStrategy trait on a tokio runtime.
//!
//! # Architecture
//!
//! ```text
//! ParallelProcessingStrategy
//!     ├── ParallelConfig (batch_size, max_workers)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── ItemCounter (DashMap-backed counting, one task per batch)
//!     └── MiningEngine<ParallelMiner> (one task per header-table branch)
//! ```
//!
//! # Pipeline
//!
//! - Batches are read in file order; each batch is counted by its own task
//!   while the next one is being read
//! - Once every counting task is joined, the batches are concatenated in
//!   file order, so the transaction list matches the sync strategy's
//! - Mining then runs on the same runtime with one task per top-level branch
//!
//! Counting is commutative and mining results are sorted before output, so
//! the report is identical to the one the sync strategy produces.

use crate::core::encoder::ItemCounts;
use crate::core::{ItemCounter, MiningEngine, ParallelMiner};
use crate::io::async_reader::AsyncReader;
use crate::io::sync_reader::open_error;
use crate::strategy::ProcessingStrategy;
use crate::types::{AnalysisReport, MiningError, MiningParams, Transaction};
use std::path::Path;
use std::sync::Arc;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::{debug, warn};

/// Configuration for parallel processing
///
/// Controls how the input is batched and how many worker threads the
/// runtime gets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParallelConfig {
    /// Number of transactions per input batch
    pub batch_size: usize,
    /// Number of runtime worker threads
    pub max_workers: usize,
}

impl Default for ParallelConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_workers: num_cpus::get(),
        }
    }
}

impl ParallelConfig {
    /// Create a new ParallelConfig with custom values
    ///
    /// Zero values are replaced by the defaults with a warning.
    pub fn new(batch_size: usize, max_workers: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_workers = if max_workers == 0 {
            warn!(
                "Invalid max_workers ({}), using default ({})",
                max_workers, default.max_workers
            );
            default.max_workers
        } else {
            max_workers
        };

        Self {
            batch_size,
            max_workers,
        }
    }
}

/// Parallel processing strategy
///
/// Implements the ProcessingStrategy trait with concurrent counting of input
/// batches and fork-join mining of FP-tree branches.
///
/// # Thread Safety
///
/// ParallelProcessingStrategy is Send + Sync. Each call to `analyze` builds
/// its own runtime, so concurrent calls share nothing.
#[derive(Debug, Clone)]
pub struct ParallelProcessingStrategy {
    config: ParallelConfig,
    has_headers: bool,
}

impl ParallelProcessingStrategy {
    /// Create a new ParallelProcessingStrategy with the specified configuration
    pub fn new(config: ParallelConfig) -> Self {
        Self {
            config,
            has_headers: false,
        }
    }

    /// Treat the first input row as a header
    pub fn with_headers(mut self, has_headers: bool) -> Self {
        self.has_headers = has_headers;
        self
    }

    /// Read all batches and count items concurrently
    ///
    /// Returns the transactions in file order with their item counts.
    async fn read_and_count(
        &self,
        input_path: &Path,
    ) -> Result<(Vec<Transaction>, ItemCounts), MiningError> {
        let file = tokio::fs::File::open(input_path)
            .await
            .map_err(|e| open_error(input_path, e))?;

        // Wrap tokio file in a compatibility layer for csv-async
        let mut reader = AsyncReader::new(file.compat(), self.has_headers);

        let counter = Arc::new(ItemCounter::new());
        let mut batches = Vec::new();
        let mut tasks = Vec::new();

        loop {
            let batch = reader.read_batch(self.config.batch_size).await?;
            if batch.is_empty() {
                break;
            }

            let batch = Arc::new(batch);
            let task_counter = Arc::clone(&counter);
            let task_batch = Arc::clone(&batch);
            tasks.push(tokio::spawn(async move {
                task_counter.count_batch(&task_batch);
            }));
            batches.push(batch);
        }

        debug!(batches = batches.len(), "read input batches");
        for result in futures::future::join_all(tasks).await {
            result?;
        }

        let counter = Arc::try_unwrap(counter)
            .map_err(|_| MiningError::invariant("item counter still shared after counting"))?;

        let transactions: Vec<Transaction> = batches
            .into_iter()
            .flat_map(|batch| Arc::try_unwrap(batch).unwrap_or_else(|shared| (*shared).clone()))
            .collect();

        Ok((transactions, counter.into_counts()))
    }
}

impl ProcessingStrategy for ParallelProcessingStrategy {
    /// Analyze a basket CSV file on a multi-threaded runtime
    ///
    /// 1. Validates the parameters
    /// 2. Creates a tokio runtime with `max_workers` threads
    /// 3. Reads and counts the input batch by batch
    /// 4. Leaves the async context and mines with the ParallelMiner, whose
    ///    branch tasks run on the same runtime
    fn analyze(
        &self,
        input_path: &Path,
        params: &MiningParams,
    ) -> Result<AnalysisReport, MiningError> {
        params.validate()?;

        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_workers)
            .build()
            .map_err(|e| MiningError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })?;

        let (transactions, counts) = runtime.block_on(self.read_and_count(input_path))?;
        debug!(
            transactions = transactions.len(),
            items = counts.len(),
            "counted input"
        );

        let engine = MiningEngine::new(ParallelMiner::new(runtime.handle().clone()));
        engine.analyze_with_counts(&transactions, counts, params)
    }
}
