//! Market-basket analysis library
//! # Overview
//!
//! This library mines frequent itemsets and association rules from
//! transaction data with the FP-Growth algorithm, using either a sync or a
//! parallel processing strategy.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (itemsets, rules, parameters, report, errors)
//! - [`cli`] - CLI arguments parsing and logging setup
//! - [`core`] - Mining components:
//!   - [`core::encoder`] - Item counting, pruning and integer coding
//!   - [`core::fp_tree`] - Arena-backed FP-tree
//!   - [`core::miner`] - Recursive FP-growth
//!   - [`core::parallel`] - Fork-join miner and concurrent counting
//!   - [`core::rules`] - Association rule generation
//!   - [`core::assembler`] - Report decoding and ordering
//!   - [`core::engine`] - Pipeline orchestration
//! - [`io`] - CSV input and report output
//! - [`strategy`] - Complete read → mine → write pipelines
//!
//! # Metrics
//!
//! For a rule A → C over N transactions:
//!
//! - **Support**: fraction of transactions containing A ∪ C
//! - **Confidence**: support(A ∪ C) / support(A)
//! - **Lift**: confidence / support(C); above 1 means positive association
//! - **Leverage**: support(A ∪ C) - support(A) · support(C)
//! - **Conviction**: (1 - support(C)) / (1 - confidence), absent when confidence is 1
//!
//! # Example
//!
//! ```
//! use basket_miner::{MiningEngine, MiningParams};
//!
//! let transactions = vec![
//!     vec!["milk".to_string(), "bread".to_string()],
//!     vec!["milk".to_string(), "bread".to_string(), "eggs".to_string()],
//!     vec!["bread".to_string()],
//!     vec!["milk".to_string()],
//! ];
//!
//! let report = MiningEngine::sequential()
//!     .analyze(&transactions, &MiningParams::new(0.5, 0.5))
//!     .unwrap();
//!
//! assert_eq!(report.support_of(&["milk", "bread"]), Some(0.5));
//! ```

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use core::{ItemCounter, MiningEngine, ParallelMiner, PatternMiner, SequentialMiner};
pub use io::{write_report, OutputFormat};
pub use types::{
    AnalysisReport, AssociationRule, FrequentItemset, ItemsetReport, MiningError, MiningParams,
    RuleReport, Transaction,
};
