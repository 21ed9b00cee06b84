//! Basket miner CLI
//!
//! Command-line interface for mining frequent itemsets and association rules
//! from basket CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- baskets.csv > report.json
//! cargo run -- --min-support 0.02 --min-confidence 0.3 baskets.csv
//! cargo run -- --strategy sync --format rules-csv baskets.csv > rules.csv
//! cargo run -- --strategy parallel --batch-size 5000 --max-workers 8 baskets.csv
//! ```
//!
//! The program reads one transaction per CSV row, mines it with the selected
//! processing strategy, and writes the report to stdout. Logs go to stderr.
//!
//! # Processing Strategies
//!
//! - **sync**: Streaming CSV reading and single-threaded mining
//! - **parallel**: Batched async reading with concurrent counting and
//!   fork-join mining (default)
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (invalid parameters, file not found, internal failure, etc.)

use basket_miner::cli;
use basket_miner::strategy;
use std::process;

fn main() {
    let args = cli::parse_args();
    cli::init_tracing(args.verbose);

    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Parallel) {
            Some(args.to_parallel_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config, args.has_headers)
    };

    let params = args.to_params();
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &params, args.format, &mut output) {
        if e.is_validation() {
            eprintln!("Invalid input: {}", e);
        } else if e.is_internal() {
            eprintln!("Internal error: {}", e);
        } else {
            eprintln!("Error: {}", e);
        }
        process::exit(1);
    }
}
