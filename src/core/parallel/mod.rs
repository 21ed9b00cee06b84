//! Concurrent implementations of core components
//!
//! This module provides the multi-threaded counterparts used by the parallel
//! processing strategy:
//!
//! - **ItemCounter**: Thread-safe per-label counting across input batches using DashMap
//! - **ParallelMiner**: Fork-join mining of header-table branches on a tokio runtime
//!
//! Both produce exactly the same results as their sequential versions; only
//! the amount of work done concurrently differs.

pub mod counter;
pub mod miner;

pub use counter::ItemCounter;
pub use miner::ParallelMiner;
