//! Asynchronous CSV reader with batch interface
//!
//! Provides a streaming interface over archived task rows from a CSV file.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - futures streams for record iteration
//! - Batch reading so callers control how many rows are buffered at once
//!
//! Expected header: `id,type,queue,payload,max_retry,retried,last_failed_at,error_message`.
//! The last two columns may be empty.

use crate::types::{ExportError, TaskRecord};
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;
use tracing::warn;

/// Columns every task file must carry; the rest default to empty
pub const REQUIRED_COLUMNS: &[&str] = &["id", "type", "queue", "payload", "max_retry", "retried"];

/// Asynchronous CSV reader
///
/// Provides batch reading interface over archived task rows.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
    skipped: usize,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    ///
    /// # Arguments
    ///
    /// * `reader` - Async reader providing CSV data
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::Headers)
            .create_deserializer(reader);

        Self {
            csv_reader,
            skipped: 0,
        }
    }

    /// Check that the header row names every required column
    ///
    /// # Errors
    ///
    /// Returns `ParseError` naming the first missing column, or `IoError` if
    /// the header row cannot be read.
    pub async fn require_columns(&mut self, required: &[&str]) -> Result<(), ExportError> {
        let headers = self.csv_reader.headers().await?;

        match required
            .iter()
            .find(|column| !headers.iter().any(|h| h == **column))
        {
            Some(missing) => Err(ExportError::ParseError {
                line: Some(1),
                message: format!("missing column '{}'", missing),
            }),
            None => Ok(()),
        }
    }

    /// Read a batch of task records
    ///
    /// Reads up to `batch_size` rows. Rows that fail to parse are logged
    /// and skipped.
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<TaskRecord>)` with the parsed records, in file order; empty
    ///   when the end of the file is reached
    /// * `Err(ExportError::IoError)` if reading the underlying input fails
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<TaskRecord>, ExportError> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<TaskRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(record)) => batch.push(record),
                Some(Err(e)) if matches!(e.kind(), csv_async::ErrorKind::Io(_)) => {
                    return Err(e.into());
                }
                Some(Err(e)) => {
                    warn!("Skipping malformed task row: {}", e);
                    self.skipped += 1;
                }
                None => break,
            }
        }

        Ok(batch)
    }

    /// Number of rows skipped so far because they failed to parse
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::Cursor;
    use std::pin::Pin;
    use std::task::{Context, Poll};

    const HEADER: &str = "id,type,queue,payload,max_retry,retried,last_failed_at,error_message\n";

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let csv_content = format!(
            "{HEADER}\
             a,email:send,default,{{}},25,25,2024-01-01T00:00:00Z,timeout\n\
             b,email:send,default,{{}},25,25,2024-01-02T00:00:00Z,timeout\n\
             c,image:resize,critical,{{}},3,3,2024-01-03T00:00:00Z,oom\n"
        );
        let reader = Cursor::new(csv_content.into_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(2).await.unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].id, "a");
        assert_eq!(batch[1].id, "b");

        let batch = async_reader.read_batch(2).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].queue, "critical");
        assert_eq!(batch[0].error_message, "oom");

        let batch = async_reader.read_batch(2).await.unwrap();
        assert!(batch.is_empty());
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let reader = Cursor::new(HEADER.as_bytes().to_vec());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(10).await.unwrap();
        assert_eq!(batch.len(), 0);
    }

    #[tokio::test]
    async fn test_async_reader_skips_invalid_rows() {
        let csv_content = format!(
            "{HEADER}\
             a,email:send,default,{{}},not_a_number,0,,\n\
             b,email:send,default,{{}},25,1,,\n"
        );
        let reader = Cursor::new(csv_content.into_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(10).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].id, "b");
        assert_eq!(async_reader.skipped(), 1);
    }

    #[tokio::test]
    async fn test_async_reader_quoted_fields() {
        let csv_content = format!(
            "{HEADER}\
             a,email:send,default,\"{{\"\"to\"\":\"\"x@y.z\"\"}}\",25,25,,\"line one\nline two\"\n"
        );
        let reader = Cursor::new(csv_content.into_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(10).await.unwrap();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].payload, "{\"to\":\"x@y.z\"}");
        assert_eq!(batch[0].last_failed_at, "");
        assert_eq!(batch[0].error_message, "line one\nline two");
    }

    /// Reader whose every read fails
    struct FailingInput;

    impl AsyncRead for FailingInput {
        fn poll_read(
            self: Pin<&mut Self>,
            _cx: &mut Context<'_>,
            _buf: &mut [u8],
        ) -> Poll<std::io::Result<usize>> {
            Poll::Ready(Err(std::io::Error::other("device unavailable")))
        }
    }

    #[tokio::test]
    async fn test_async_reader_propagates_io_errors() {
        let mut async_reader = AsyncReader::new(FailingInput);

        let result = async_reader.read_batch(10).await;
        assert!(matches!(result, Err(ExportError::IoError { .. })));
        assert_eq!(async_reader.skipped(), 0);
    }

    #[tokio::test]
    async fn test_require_columns_accepts_full_header() {
        let mut async_reader = AsyncReader::new(Cursor::new(HEADER.as_bytes().to_vec()));
        async_reader.require_columns(REQUIRED_COLUMNS).await.unwrap();
    }

    #[tokio::test]
    async fn test_require_columns_reports_missing_column() {
        let reader = Cursor::new(b"id,type,payload,max_retry,retried\n".to_vec());
        let mut async_reader = AsyncReader::new(reader);

        let result = async_reader.require_columns(REQUIRED_COLUMNS).await;
        assert_eq!(
            result,
            Err(ExportError::ParseError {
                line: Some(1),
                message: "missing column 'queue'".to_string()
            })
        );
    }
}
