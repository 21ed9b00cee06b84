//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over transactions from a basket CSV file.
//! Delegates row cleaning to the csv_format module.
//!
//! # Design
//!
//! Each CSV row is one transaction and each field one item, so rows have no
//! fixed width. The reader walks `StringRecord`s one at a time, reusing a
//! single record buffer, and hands their fields to
//! `csv_format::parse_fields`. Rows left without items are skipped.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding
//! `Result<Transaction, MiningError>` for each non-blank row:
//!
//! ```no_run
//! use basket_miner::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("baskets.csv"), false).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(transaction) => println!("basket: {:?}", transaction),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, permission denied) are returned from `new()`
//! - Malformed rows (e.g. invalid UTF-8) are yielded as Err variants with
//!   their line number, and iteration continues with the next row
//! - An I/O failure mid-file is yielded once and ends the iteration

use crate::io::csv_format::parse_fields;
use crate::types::{MiningError, Transaction};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::{ErrorKind, Read};
use std::path::Path;

/// Synchronous CSV reader
///
/// Provides an iterator interface over transactions.
/// Maintains streaming behavior with constant memory usage.
#[derive(Debug)]
pub struct SyncReader<R: Read = File> {
    reader: csv::Reader<R>,
    record: StringRecord,
    finished: bool,
}

impl SyncReader<File> {
    /// Open a basket CSV file for streaming iteration
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the CSV file
    /// * `has_headers` - Skip the first row as a header
    ///
    /// # Errors
    ///
    /// Returns `MiningError::FileNotFound` if the path does not exist and
    /// `MiningError::IoError` if the file cannot be opened otherwise.
    pub fn new(path: &Path, has_headers: bool) -> Result<Self, MiningError> {
        let file = File::open(path).map_err(|e| open_error(path, e))?;
        Ok(Self::from_reader(file, has_headers))
    }
}

impl<R: Read> SyncReader<R> {
    /// Wrap any byte reader
    ///
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow a different field count on every row
    /// - Use an 8KB buffer for efficient I/O
    pub fn from_reader(reader: R, has_headers: bool) -> Self {
        let reader = ReaderBuilder::new()
            .has_headers(has_headers)
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(reader);

        Self {
            reader,
            record: StringRecord::new(),
            finished: false,
        }
    }
}

/// Map a failure to open `path` onto the error the user should see
pub(crate) fn open_error(path: &Path, error: std::io::Error) -> MiningError {
    if error.kind() == ErrorKind::NotFound {
        MiningError::file_not_found(path)
    } else {
        MiningError::IoError {
            message: format!("Failed to open file '{}': {}", path.display(), error),
        }
    }
}

impl<R: Read> Iterator for SyncReader<R> {
    type Item = Result<Transaction, MiningError>;

    /// Get the next non-blank transaction from the CSV file
    ///
    /// # Returns
    ///
    /// * `Some(Ok(Transaction))` - Cleaned basket
    /// * `Some(Err(MiningError))` - Parse error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        loop {
            match self.reader.read_record(&mut self.record) {
                Ok(true) => {
                    if let Some(transaction) = parse_fields(self.record.iter()) {
                        return Some(Ok(transaction));
                    }
                }
                Ok(false) => {
                    self.finished = true;
                    return None;
                }
                Err(e) => {
                    if e.is_io_error() {
                        self.finished = true;
                    }
                    return Some(Err(e.into()));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    fn labels(row: &[&str]) -> Transaction {
        row.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_sync_reader_new_opens_file() {
        let file = create_temp_csv(b"milk,bread\n");
        assert!(SyncReader::new(file.path(), false).is_ok());
    }

    #[test]
    fn test_sync_reader_new_fails_on_missing_file() {
        let err = SyncReader::new(Path::new("nonexistent.csv"), false).unwrap_err();
        assert_eq!(
            err,
            MiningError::FileNotFound {
                path: "nonexistent.csv".to_string()
            }
        );
    }

    #[test]
    fn test_sync_reader_iterates_ragged_rows() {
        let file = create_temp_csv(b"milk,bread\nmilk,bread,eggs\nbread\nmilk\n");

        let reader = SyncReader::new(file.path(), false).unwrap();
        let transactions: Vec<Transaction> = reader.map(Result::unwrap).collect();

        assert_eq!(
            transactions,
            vec![
                labels(&["milk", "bread"]),
                labels(&["milk", "bread", "eggs"]),
                labels(&["bread"]),
                labels(&["milk"]),
            ]
        );
    }

    #[test]
    fn test_sync_reader_cleans_rows() {
        let file = create_temp_csv(b"  milk , bread,,\nbread,bread,eggs\n,,\n\neggs\n");

        let reader = SyncReader::new(file.path(), false).unwrap();
        let transactions: Vec<Transaction> = reader.map(Result::unwrap).collect();

        assert_eq!(
            transactions,
            vec![
                labels(&["milk", "bread"]),
                labels(&["bread", "eggs"]),
                labels(&["eggs"]),
            ]
        );
    }

    #[test]
    fn test_sync_reader_skips_header_when_asked() {
        let content = b"item1,item2\nmilk,bread\n";

        let with_header = SyncReader::from_reader(&content[..], true);
        assert_eq!(with_header.count(), 1);

        let without_header = SyncReader::from_reader(&content[..], false);
        assert_eq!(without_header.count(), 2);
    }

    #[test]
    fn test_sync_reader_reports_invalid_utf8_and_continues() {
        let file = create_temp_csv(b"milk,bread\n\xff\xfe,eggs\nmilk\n");

        let reader = SyncReader::new(file.path(), false).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 3);
        assert!(records[0].is_ok());
        match &records[1] {
            Err(MiningError::ParseError { line, .. }) => assert!(line.is_some()),
            other => panic!("expected parse error, got {:?}", other),
        }
        assert_eq!(records[2].as_ref().unwrap(), &labels(&["milk"]));
    }

    #[test]
    fn test_sync_reader_stops_after_io_error() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");

        let reader = SyncReader::new(dir.path(), false).unwrap();
        let records: Vec<_> = reader.collect();

        assert_eq!(records.len(), 1);
        assert!(matches!(records[0], Err(MiningError::IoError { .. })));
    }

    #[test]
    fn test_sync_reader_handles_empty_file() {
        let file = create_temp_csv(b"");

        let reader = SyncReader::new(file.path(), false).unwrap();
        assert_eq!(reader.count(), 0);
    }
}
