//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: Raw baskets and item codes
//! - `itemset`: Frequent itemsets and association rules at the code level
//! - `params`: Mining thresholds and their validation
//! - `report`: The label-level output schema
//! - `error`: Error types for the basket miner

pub mod error;
pub mod itemset;
pub mod params;
pub mod report;
pub mod transaction;

pub use error::MiningError;
pub use itemset::{AssociationRule, FrequentItemset};
pub use params::MiningParams;
pub use report::{AnalysisReport, ItemsetReport, RuleReport};
pub use transaction::{ItemId, Itemset, Transaction};
