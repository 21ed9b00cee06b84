//! Processing strategy module for basket analysis
//!
//! This module defines the Strategy pattern for complete analysis pipelines,
//! encompassing CSV reading, mining and report output. This allows different
//! implementations (single-threaded, parallel) to be selected at runtime.
//! Both strategies produce identical reports for the same input.

use crate::cli::StrategyType;
use crate::io::csv_format::{write_report, OutputFormat};
use crate::types::{AnalysisReport, MiningError, MiningParams};
use std::io::Write;
use std::path::Path;

pub mod parallel;
pub mod sync;

pub use parallel::{ParallelConfig, ParallelProcessingStrategy};
pub use sync::SyncProcessingStrategy;

/// Processing strategy trait for complete analysis pipelines
///
/// Each strategy must be able to read transactions from a basket CSV file,
/// mine them with the given thresholds and produce the analysis report.
pub trait ProcessingStrategy: Send + Sync {
    /// Read the input file and run the analysis
    ///
    /// # Arguments
    ///
    /// * `input_path` - Path to the basket CSV file, one transaction per row
    /// * `params` - Mining thresholds, validated before the file is opened
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - A parameter is out of range
    /// - The input file cannot be opened or read
    /// - Mining fails on an internal invariant
    ///
    /// Malformed rows are logged and skipped; they do not fail the run.
    fn analyze(&self, input_path: &Path, params: &MiningParams)
        -> Result<AnalysisReport, MiningError>;

    /// Analyze the input file and write the report to output
    ///
    /// # Errors
    ///
    /// Any error of [`ProcessingStrategy::analyze`], or an output error if
    /// the report cannot be written. Nothing is written when analysis fails.
    fn process(
        &self,
        input_path: &Path,
        params: &MiningParams,
        format: OutputFormat,
        output: &mut dyn Write,
    ) -> Result<(), MiningError> {
        let report = self.analyze(input_path, params)?;
        write_report(&report, format, output)
    }
}

/// Create a processing strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of processing strategy to create
/// * `config` - Optional configuration for parallel processing (ignored for sync)
/// * `has_headers` - Whether the input's first row is a header
///
/// # Returns
///
/// A boxed trait object implementing the ProcessingStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<ParallelConfig>,
    has_headers: bool,
) -> Box<dyn ProcessingStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncProcessingStrategy::new(has_headers)),
        StrategyType::Parallel => {
            let config = config.unwrap_or_default();
            Box::new(ParallelProcessingStrategy::new(config).with_headers(has_headers))
        }
    }
}
