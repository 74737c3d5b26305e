//! Core traits for the collaborators an export talks to
//!
//! This module defines the trait abstractions at the edges of the engine:
//! the paged source records are fetched from, and the sink a finished
//! document is handed to. Both are implemented outside the core.

use crate::types::{ExportError, Page, PageNumber};
use async_trait::async_trait;
use std::sync::Arc;

/// Paginated listing endpoint of a remote collection
///
/// Implementations must be idempotent and safe to call concurrently for
/// distinct page numbers. Retry policy, if any, belongs here: the export
/// coordinator never retries a failed fetch.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Record type listed by this source
    type Record: Send;

    /// Fetch one page of a collection
    ///
    /// # Arguments
    ///
    /// * `collection` - Identifier of the collection (e.g. a queue name)
    /// * `page` - One-based page number
    /// * `page_size` - Maximum number of records per page
    ///
    /// # Returns
    ///
    /// * `Ok(Page)` with the page's records and the collection total
    /// * `Err(ExportError)` if the page could not be fetched
    async fn fetch_page(
        &self,
        collection: &str,
        page: PageNumber,
        page_size: usize,
    ) -> Result<Page<Self::Record>, ExportError>;
}

#[async_trait]
impl<S: PageSource + ?Sized> PageSource for Arc<S> {
    type Record = S::Record;

    async fn fetch_page(
        &self,
        collection: &str,
        page: PageNumber,
        page_size: usize,
    ) -> Result<Page<Self::Record>, ExportError> {
        (**self).fetch_page(collection, page, page_size).await
    }
}

/// Destination for a finished export document
///
/// Stands in for whatever save or download mechanism the caller uses. The
/// core never touches platform file APIs directly.
#[async_trait]
pub trait DocumentSink: Send + Sync {
    /// Persist the document bytes under the given filename
    async fn save(&self, bytes: &[u8], filename: &str) -> Result<(), ExportError>;
}
