//! Asynchronous CSV reader with batch interface
//!
//! Provides batched reading of transactions from a basket CSV file.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - tokio (through a compat layer) for async file access
//! - Batch reading so counting can start before the whole file is read
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of Transactions
//!                  ↓
//!           csv_format module
//!            (parse_fields)
//! ```

use crate::io::csv_format::parse_fields;
use crate::types::{MiningError, Transaction};
use csv_async::{AsyncReaderBuilder, ErrorKind, StringRecord};
use futures::io::AsyncRead;
use tracing::warn;

/// Asynchronous CSV reader
///
/// Provides batch reading interface over transactions.
/// Maintains streaming behavior with constant memory usage.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncReader<R>,
    record: StringRecord,
}

impl<R: AsyncRead + Unpin + Send> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    ///
    /// # Arguments
    ///
    /// * `reader` - Async reader providing CSV data
    /// * `has_headers` - Skip the first row as a header
    pub fn new(reader: R, has_headers: bool) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .has_headers(has_headers)
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_reader(reader);

        Self {
            csv_reader,
            record: StringRecord::new(),
        }
    }

    /// Read a batch of transactions
    ///
    /// This method reads rows until `batch_size` transactions are collected or
    /// the input ends. Blank rows are skipped. Malformed rows are logged as
    /// warnings and skipped.
    ///
    /// # Returns
    ///
    /// The transactions of the batch, in file order. An empty vector means
    /// the end of the file was reached.
    ///
    /// # Errors
    ///
    /// Returns `MiningError::IoError` if the underlying reader fails.
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<Transaction>, MiningError> {
        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            match self.csv_reader.read_record(&mut self.record).await {
                Ok(true) => {
                    if let Some(transaction) = parse_fields(self.record.iter()) {
                        batch.push(transaction);
                    }
                }
                Ok(false) => break,
                Err(e) => {
                    if let ErrorKind::Io(io_error) = e.kind() {
                        return Err(MiningError::IoError {
                            message: io_error.to_string(),
                        });
                    }
                    warn!(error = %MiningError::from(e), "skipping malformed row");
                }
            }
        }

        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::Cursor;

    fn labels(row: &[&str]) -> Transaction {
        row.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let reader = Cursor::new("milk,bread\nmilk,bread,eggs\nbread\n".as_bytes());
        let mut async_reader = AsyncReader::new(reader, false);

        let batch = async_reader.read_batch(2).await.unwrap();
        assert_eq!(
            batch,
            vec![labels(&["milk", "bread"]), labels(&["milk", "bread", "eggs"])]
        );

        let batch = async_reader.read_batch(2).await.unwrap();
        assert_eq!(batch, vec![labels(&["bread"])]);

        let batch = async_reader.read_batch(2).await.unwrap();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_empty_input() {
        let reader = Cursor::new("".as_bytes());
        let mut async_reader = AsyncReader::new(reader, false);

        let batch = async_reader.read_batch(10).await.unwrap();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_skips_blank_rows_and_cleans_fields() {
        let reader = Cursor::new(" milk , milk ,bread,\n,,\neggs\n".as_bytes());
        let mut async_reader = AsyncReader::new(reader, false);

        let batch = async_reader.read_batch(10).await.unwrap();
        assert_eq!(batch, vec![labels(&["milk", "bread"]), labels(&["eggs"])]);
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_utf8_row() {
        let content: &[u8] = b"milk\n\xff,eggs\nbread\n";
        let mut async_reader = AsyncReader::new(Cursor::new(content), false);

        let batch = async_reader.read_batch(10).await.unwrap();
        assert_eq!(batch, vec![labels(&["milk"]), labels(&["bread"])]);
    }

    #[tokio::test]
    async fn test_async_reader_header_row() {
        let reader = Cursor::new("item_1,item_2\nmilk,bread\n".as_bytes());
        let mut async_reader = AsyncReader::new(reader, true);

        let batch = async_reader.read_batch(10).await.unwrap();
        assert_eq!(batch, vec![labels(&["milk", "bread"])]);
    }
}
