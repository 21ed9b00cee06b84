//! Synchronous processing strategy
//!
//! This module provides a single-threaded implementation of the
//! ProcessingStrategy trait. It orchestrates analysis by coordinating between
//! the SyncReader (for CSV input) and MiningEngine (for mining).
//!
//! # Design
//!
//! The SyncProcessingStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Mining to `MiningEngine` with the `SequentialMiner`
//! - Output to `csv_format::write_report` (through the trait's `process`)

use crate::core::MiningEngine;
use crate::io::sync_reader::SyncReader;
use crate::strategy::ProcessingStrategy;
use crate::types::{AnalysisReport, MiningError, MiningParams, Transaction};
use std::path::Path;
use tracing::{debug, warn};

/// Synchronous processing strategy
///
/// Reads the whole file through the streaming `SyncReader`, then mines it on
/// the calling thread.
///
/// # Examples
///
/// ```no_run
/// use basket_miner::io::OutputFormat;
/// use basket_miner::strategy::{ProcessingStrategy, SyncProcessingStrategy};
/// use basket_miner::types::MiningParams;
/// use std::path::Path;
///
/// let strategy = SyncProcessingStrategy::new(false);
/// let mut output = std::io::stdout();
///
/// match strategy.process(
///     Path::new("baskets.csv"),
///     &MiningParams::default(),
///     OutputFormat::Json,
///     &mut output,
/// ) {
///     Ok(()) => {}
///     Err(e) => eprintln!("Fatal error: {}", e),
/// }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SyncProcessingStrategy {
    /// Skip the first input row as a header
    pub has_headers: bool,
}

impl SyncProcessingStrategy {
    pub fn new(has_headers: bool) -> Self {
        Self { has_headers }
    }

    /// Read every transaction, skipping malformed rows
    fn read_transactions(&self, input_path: &Path) -> Result<Vec<Transaction>, MiningError> {
        let reader = SyncReader::new(input_path, self.has_headers)?;

        let mut transactions = Vec::new();
        for result in reader {
            match result {
                Ok(transaction) => transactions.push(transaction),
                Err(e @ MiningError::IoError { .. }) => return Err(e),
                Err(e) => warn!(error = %e, "skipping malformed row"),
            }
        }

        Ok(transactions)
    }
}

impl ProcessingStrategy for SyncProcessingStrategy {
    /// Analyze a basket CSV file on the calling thread
    ///
    /// 1. Validates the parameters
    /// 2. Streams transactions from the file with a SyncReader
    /// 3. Runs the MiningEngine with the sequential miner
    fn analyze(
        &self,
        input_path: &Path,
        params: &MiningParams,
    ) -> Result<AnalysisReport, MiningError> {
        params.validate()?;

        let transactions = self.read_transactions(input_path)?;
        debug!(transactions = transactions.len(), "read input");

        MiningEngine::sequential().analyze(&transactions, params)
    }
}
