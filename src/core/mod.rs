//! Core mining logic module
//!
//! This module contains the market-basket analysis pipeline:
//! - `encoder` - Label counting, infrequent-item pruning and integer coding
//! - `fp_tree` - Arena-backed FP-tree with header table
//! - `miner` - Recursive FP-growth, sequential
//! - `parallel` - Fork-join miner and concurrent item counting
//! - `rules` - Association rule generation from mined itemsets
//! - `assembler` - Decoding and ordering of the final report
//! - `engine` - Pipeline orchestration
//! - `traits` - Trait abstractions for interchangeable miners

pub mod assembler;
pub mod encoder;
pub mod engine;
pub mod fp_tree;
pub mod miner;
pub mod parallel;
pub mod rules;
pub mod traits;

pub use engine::MiningEngine;
pub use fp_tree::FpTree;
pub use miner::{MiningLimits, SequentialMiner};
pub use parallel::{ItemCounter, ParallelMiner};
pub use traits::PatternMiner;
