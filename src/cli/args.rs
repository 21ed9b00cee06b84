use crate::io::OutputFormat;
use crate::strategy::ParallelConfig;
use crate::types::params::{DEFAULT_MIN_CONFIDENCE, DEFAULT_MIN_SUPPORT};
use crate::types::MiningParams;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Mine frequent itemsets and association rules from basket data
#[derive(Parser, Debug)]
#[command(name = "basket-miner")]
#[command(
    about = "Mine frequent itemsets and association rules from basket data",
    long_about = None
)]
pub struct CliArgs {
    /// Input CSV file path, one transaction per row and one item per field
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    /// Minimum support as a fraction of all transactions
    #[arg(
        long = "min-support",
        value_name = "FRACTION",
        default_value_t = DEFAULT_MIN_SUPPORT,
        help = "Minimum support, in (0, 1]"
    )]
    pub min_support: f64,

    /// Minimum confidence of a reported rule
    #[arg(
        long = "min-confidence",
        value_name = "FRACTION",
        default_value_t = DEFAULT_MIN_CONFIDENCE,
        help = "Minimum rule confidence, in [0, 1]"
    )]
    pub min_confidence: f64,

    /// Minimum lift of a reported rule
    #[arg(long = "min-lift", value_name = "LIFT", help = "Drop rules with a lower lift")]
    pub min_lift: Option<f64>,

    /// Longest itemset to mine
    #[arg(long = "max-len", value_name = "N", help = "Maximum number of items per itemset")]
    pub max_len: Option<usize>,

    /// Processing strategy
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "parallel",
        help = "Processing strategy: 'sync' for single-threaded or 'parallel' for multi-threaded"
    )]
    pub strategy: StrategyType,

    /// Number of transactions per batch (parallel mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of transactions per input batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Number of worker threads (parallel mode only)
    #[arg(
        long = "max-workers",
        value_name = "COUNT",
        help = "Number of worker threads (default: CPU cores)"
    )]
    pub max_workers: Option<usize>,

    /// Output format
    #[arg(
        long = "format",
        value_name = "FORMAT",
        default_value = "json",
        help = "Output format: full JSON report, rules table or itemsets table"
    )]
    pub format: OutputFormat,

    /// Treat the first row of the input as a header
    #[arg(long = "has-headers")]
    pub has_headers: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Available processing strategies
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Parallel,
}

impl CliArgs {
    /// Mining thresholds from the CLI arguments
    ///
    /// Values are passed through unchecked; the strategy validates them.
    pub fn to_params(&self) -> MiningParams {
        MiningParams {
            min_support: self.min_support,
            min_confidence: self.min_confidence,
            min_lift: self.min_lift,
            max_len: self.max_len,
        }
    }

    /// Create a ParallelConfig from CLI arguments
    ///
    /// Missing values fall back to the defaults. Zero values are replaced by
    /// the defaults with a warning.
    pub fn to_parallel_config(&self) -> ParallelConfig {
        if self.batch_size.is_some() || self.max_workers.is_some() {
            let default = ParallelConfig::default();
            ParallelConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_workers.unwrap_or(default.max_workers),
            )
        } else {
            ParallelConfig::default()
        }
    }
}
