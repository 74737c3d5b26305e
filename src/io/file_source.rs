//! File-backed page source
//!
//! Serves archived tasks loaded from a local CSV file through the
//! `PageSource` interface, one queue per collection. Used by the CLI and by
//! end-to-end tests in place of a remote listing endpoint.

use crate::core::traits::PageSource;
use crate::io::async_reader::{AsyncReader, REQUIRED_COLUMNS};
use crate::types::{ExportError, Page, PageNumber, TaskRecord};
use async_trait::async_trait;
use std::path::Path;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::{debug, info};

/// Rows read from the file per batch while loading
const LOAD_BATCH_SIZE: usize = 1000;

/// In-memory paged view over a CSV file of archived tasks
#[derive(Debug, Clone, Default)]
pub struct CsvFileSource {
    records: Vec<TaskRecord>,
}

impl CsvFileSource {
    /// Load every task row from `path`
    ///
    /// Malformed rows are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` if the file does not exist, `IoError` if it
    /// cannot be opened or read, and `ParseError` if its header row lacks a
    /// required column.
    pub async fn open(path: &Path) -> Result<Self, ExportError> {
        let file = tokio::fs::File::open(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ExportError::file_not_found(&path.display().to_string())
            } else {
                ExportError::from(e)
            }
        })?;

        // Wrap tokio file in a compatibility layer for csv-async
        let mut reader = AsyncReader::new(file.compat());
        reader.require_columns(REQUIRED_COLUMNS).await?;
        let mut records = Vec::new();

        loop {
            let batch = reader.read_batch(LOAD_BATCH_SIZE).await?;
            if batch.is_empty() {
                break;
            }
            records.extend(batch);
        }

        info!(
            "Loaded {} tasks from {} ({} rows skipped)",
            records.len(),
            path.display(),
            reader.skipped()
        );

        Ok(Self { records })
    }

    /// Build a source over records already in memory
    pub fn from_records(records: Vec<TaskRecord>) -> Self {
        Self { records }
    }

    /// Number of tasks in a queue
    pub fn count(&self, queue: &str) -> usize {
        self.records.iter().filter(|r| r.queue == queue).count()
    }
}

#[async_trait]
impl PageSource for CsvFileSource {
    type Record = TaskRecord;

    async fn fetch_page(
        &self,
        collection: &str,
        page: PageNumber,
        page_size: usize,
    ) -> Result<Page<TaskRecord>, ExportError> {
        let total_count = self.count(collection);
        if page == 0 || page_size == 0 {
            return Ok(Page::empty(total_count));
        }

        let offset = (page - 1).saturating_mul(page_size);
        let records: Vec<TaskRecord> = self
            .records
            .iter()
            .filter(|r| r.queue == collection)
            .skip(offset)
            .take(page_size)
            .cloned()
            .collect();

        debug!(
            "Served page {} of '{}' ({} of {} tasks)",
            page,
            collection,
            records.len(),
            total_count
        );

        Ok(Page::new(records, total_count))
    }
}
