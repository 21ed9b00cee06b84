//! Error types for the basket miner
//!
//! This module defines all error types that can occur while reading baskets,
//! mining frequent itemsets and writing the resulting report.
//!
//! # Error Categories
//!
//! - **Validation Errors**: Parameters outside their range, malformed transactions.
//!   Raised before any tree construction; the caller can fix the input and retry.
//! - **Internal Errors**: A broken mining invariant or a failed worker task.
//!   Fatal to the invocation, no partial result is returned.
//! - **I/O Errors**: File not found, unreadable CSV, output failures.
//!
//! Thresholds that are too strict for the data are not an error: they yield an
//! empty but well-formed report.

use thiserror::Error;

/// Main error type for the basket miner
///
/// Each variant carries enough context to tell the user what to fix.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MiningError {
    /// A mining parameter is outside its valid range
    #[error("Invalid {name} {value}: {reason}")]
    InvalidParameter {
        /// Parameter name as exposed on the command line
        name: String,
        /// The rejected value
        value: f64,
        /// Human readable description of the valid range
        reason: String,
    },

    /// A transaction violates the input contract (empty or duplicate label)
    #[error("Invalid transaction {index}: {message}")]
    InvalidTransaction {
        /// Position of the transaction in the input sequence
        index: usize,
        /// What is wrong with it
        message: String,
    },

    /// A mining invariant did not hold
    ///
    /// Indicates a bug in the miner, never a property of the data.
    #[error("Internal invariant violated: {message}")]
    InvariantViolation {
        /// Description of the broken invariant
        message: String,
    },

    /// A parallel mining task panicked or was cancelled
    #[error("Mining worker failed: {message}")]
    WorkerFailed {
        /// Description of the task failure
        message: String,
    },

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Malformed rows are logged and skipped by the readers; this variant is
    /// what they report for the skipped row.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// The report could not be serialized or written
    #[error("Output error: {message}")]
    OutputError {
        /// Description of the output failure
        message: String,
    },
}

impl From<std::io::Error> for MiningError {
    fn from(error: std::io::Error) -> Self {
        MiningError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for MiningError {
    fn from(error: csv::Error) -> Self {
        if let csv::ErrorKind::Io(io_error) = error.kind() {
            return MiningError::IoError {
                message: io_error.to_string(),
            };
        }

        let line = error.position().map(|pos| pos.line());

        MiningError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for MiningError {
    fn from(error: csv_async::Error) -> Self {
        MiningError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for MiningError {
    fn from(error: tokio::task::JoinError) -> Self {
        let message = if error.is_panic() {
            format!("task panicked: {}", error)
        } else {
            format!("task cancelled: {}", error)
        };

        MiningError::WorkerFailed { message }
    }
}

impl From<serde_json::Error> for MiningError {
    fn from(error: serde_json::Error) -> Self {
        MiningError::OutputError {
            message: error.to_string(),
        }
    }
}

impl MiningError {
    /// Create an InvalidParameter error
    pub fn invalid_parameter(name: &str, value: f64, reason: &str) -> Self {
        MiningError::InvalidParameter {
            name: name.to_string(),
            value,
            reason: reason.to_string(),
        }
    }

    /// Create an InvalidTransaction error
    pub fn invalid_transaction(index: usize, message: impl Into<String>) -> Self {
        MiningError::InvalidTransaction {
            index,
            message: message.into(),
        }
    }

    /// Create an InvariantViolation error
    pub fn invariant(message: impl Into<String>) -> Self {
        MiningError::InvariantViolation {
            message: message.into(),
        }
    }

    /// Create a WorkerFailed error
    pub fn worker_failed(message: impl Into<String>) -> Self {
        MiningError::WorkerFailed {
            message: message.into(),
        }
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        MiningError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// True for errors the caller can fix by correcting its input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            MiningError::InvalidParameter { .. } | MiningError::InvalidTransaction { .. }
        )
    }

    /// True for errors that indicate a defect in the miner itself
    pub fn is_internal(&self) -> bool {
        matches!(
            self,
            MiningError::InvariantViolation { .. } | MiningError::WorkerFailed { .. }
        )
    }
}
