//! I/O module
//!
//! Handles basket CSV parsing and report output.
//!
//! # Components
//!
//! - `csv_format` - Row cleaning and report serialization (JSON, CSV tables)
//! - `sync_reader` - Synchronous CSV reader with iterator interface
//! - `async_reader` - Asynchronous CSV reader with batch reading interface

pub mod async_reader;
pub mod csv_format;
pub mod sync_reader;

pub use async_reader::AsyncReader;
pub use csv_format::{parse_fields, write_report, OutputFormat};
pub use sync_reader::SyncReader;
