//! Export coordinator for paginated bulk retrieval
//!
//! This module provides the `ExportCoordinator`, which pulls every record of a
//! remote collection (up to a cap) through a paged source and hands the ordered
//! result to the serializer.
//!
//! # Architecture
//!
//! ```text
//! ExportCoordinator
//!     ├── ExportConfig (page_size, max_records, max_concurrent_pages)
//!     ├── PageSource   (external page fetch)
//!     └── serialize_records (header + one row per record)
//! ```
//!
//! # Batching
//!
//! - Page 1 is fetched alone to learn the collection total
//! - Remaining pages are fetched in sequential batches of at most
//!   `max_concurrent_pages` concurrent requests
//! - Each batch settles completely before its records are appended, in
//!   page-number order, so completion order never affects output order
//! - The first failed fetch aborts the export and drops the rest of the batch

use crate::core::traits::PageSource;
use crate::io::csv_format::serialize_records;
use crate::types::{
    ExportError, ExportOutcome, ExportRecord, Page, PageNumber, TruncationWarning,
};
use futures::future::try_join_all;
use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Configuration for a paginated export
///
/// Controls the page size requested from the source, the maximum number of
/// records an export may contain, and how many page fetches may be in flight
/// at once.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportConfig {
    /// Number of records requested per page
    pub page_size: usize,
    /// Maximum number of records included in an export
    pub max_records: usize,
    /// Maximum number of page fetches running concurrently
    pub max_concurrent_pages: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            page_size: 100,
            max_records: 10_000,
            max_concurrent_pages: 10,
        }
    }
}

impl ExportConfig {
    /// Create a new ExportConfig with custom values
    ///
    /// Zero values are invalid for every field and fall back to the default.
    pub fn new(page_size: usize, max_records: usize, max_concurrent_pages: usize) -> Self {
        let default = Self::default();

        Self {
            page_size: non_zero_or_default("page_size", page_size, default.page_size),
            max_records: non_zero_or_default("max_records", max_records, default.max_records),
            max_concurrent_pages: non_zero_or_default(
                "max_concurrent_pages",
                max_concurrent_pages,
                default.max_concurrent_pages,
            ),
        }
    }
}

fn non_zero_or_default(name: &str, value: usize, default: usize) -> usize {
    if value == 0 {
        warn!("Invalid {} ({}), using default ({})", name, value, default);
        default
    } else {
        value
    }
}

/// Records collected by an export, before serialization
#[derive(Debug, Clone, PartialEq)]
pub struct ExportResult<R> {
    /// Collected records in source order, at most `max_records` long
    pub records: Vec<R>,
    /// Collection total reported by page 1
    pub total_count: usize,
    /// Number of pages fetched, page 1 included
    pub pages_fetched: usize,
    /// Set when the collection was larger than the cap
    pub warning: Option<TruncationWarning>,
}

/// Pages left to fetch after page 1 for a capped export
///
/// Empty when the whole capped count fits on the first page.
pub fn remaining_pages(capped_count: usize, page_size: usize) -> Vec<PageNumber> {
    if page_size == 0 || capped_count <= page_size {
        return Vec::new();
    }

    let total_pages = capped_count.div_ceil(page_size);
    (2..=total_pages).collect()
}

/// Coordinator for paginated export operations
///
/// Owns the page source and configuration for exports of any collection
/// exposed by that source. A single coordinator may run several exports.
pub struct ExportCoordinator<S> {
    /// Paged source records are fetched from
    source: S,
    /// Page size, cap and concurrency width
    config: ExportConfig,
    /// Cancellation token for aborting an export
    cancel_token: Option<CancellationToken>,
}

impl<S: PageSource> ExportCoordinator<S> {
    /// Create a new export coordinator
    ///
    /// Zero values in `config` are replaced by defaults.
    pub fn new(source: S, config: ExportConfig) -> Self {
        let config = ExportConfig::new(
            config.page_size,
            config.max_records,
            config.max_concurrent_pages,
        );

        Self {
            source,
            config,
            cancel_token: None,
        }
    }

    /// Set cancellation token for exports run by this coordinator
    ///
    /// When the token fires, in-flight fetches are dropped and the export
    /// fails with [`ExportError::Cancelled`].
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel_token = Some(token);
        self
    }

    /// Fetch every record of a collection, up to the configured cap
    ///
    /// # Arguments
    ///
    /// * `collection` - Identifier of the collection to export
    ///
    /// # Returns
    ///
    /// * `Ok(ExportResult)` with records in source order
    /// * `Err(ExportError)` if any page fetch failed or the export was cancelled
    pub async fn collect(&self, collection: &str) -> Result<ExportResult<S::Record>, ExportError> {
        let page_size = self.config.page_size;
        let max_records = self.config.max_records;

        info!("Starting export of '{}'", collection);

        let first = self
            .guarded(self.fetch(collection, 1, page_size))
            .await?;
        let total_count = first.total_count;
        debug!(
            "Page 1 returned {} records, collection total is {}",
            first.len(),
            total_count
        );

        let capped_count = total_count.min(max_records);
        let warning = if total_count > max_records {
            info!(
                "Collection '{}' holds {} records, export is capped at {}",
                collection, total_count, max_records
            );
            Some(TruncationWarning {
                total_count,
                max_records,
            })
        } else {
            None
        };

        let mut records = Vec::with_capacity(capped_count);
        records.extend(first.records);
        let mut pages_fetched = 1;

        let pending = remaining_pages(capped_count, page_size);
        for batch in pending.chunks(self.config.max_concurrent_pages) {
            debug!(
                "Fetching pages {}..={} ({} concurrent)",
                batch[0],
                batch[batch.len() - 1],
                batch.len()
            );

            let fetches = batch
                .iter()
                .map(|&page| self.fetch(collection, page, page_size));

            // try_join_all yields pages in request order, not completion order
            let pages = self.guarded(try_join_all(fetches)).await?;
            pages_fetched += pages.len();

            for page in pages {
                records.extend(page.records);
            }
        }

        records.truncate(capped_count);

        info!(
            "Collected {} records from '{}' in {} pages",
            records.len(),
            collection,
            pages_fetched
        );

        Ok(ExportResult {
            records,
            total_count,
            pages_fetched,
            warning,
        })
    }

    async fn fetch(
        &self,
        collection: &str,
        page: PageNumber,
        page_size: usize,
    ) -> Result<Page<S::Record>, ExportError> {
        self.source
            .fetch_page(collection, page, page_size)
            .await
            .inspect_err(|e| warn!("Fetching page {} of '{}' failed: {}", page, collection, e))
    }

    /// Run `operation` unless the cancellation token fires first
    async fn guarded<T>(
        &self,
        operation: impl Future<Output = Result<T, ExportError>>,
    ) -> Result<T, ExportError> {
        match &self.cancel_token {
            Some(token) => tokio::select! {
                biased;
                _ = token.cancelled() => {
                    info!("Export cancelled");
                    Err(ExportError::Cancelled)
                }
                result = operation => result,
            },
            None => operation.await,
        }
    }
}

impl<S> ExportCoordinator<S>
where
    S: PageSource,
    S::Record: ExportRecord,
{
    /// Export a collection into a serialized document
    ///
    /// Collects the records with [`collect`](Self::collect) and serializes
    /// them. The truncation warning, if any, is returned with the document.
    pub async fn export(&self, collection: &str) -> Result<ExportOutcome, ExportError> {
        let result = self.collect(collection).await?;
        let document = serialize_records(&result.records)?;

        Ok(ExportOutcome {
            document,
            warning: result.warning,
        })
    }
}

/// Export a collection with a one-off coordinator
pub async fn export<S>(
    source: S,
    collection: &str,
    config: ExportConfig,
) -> Result<ExportOutcome, ExportError>
where
    S: PageSource,
    S::Record: ExportRecord,
{
    ExportCoordinator::new(source, config).export(collection).await
}
