//! Newest-first paging over an oldest-first source
//!
//! Task archives are stored oldest-first while listings show the newest
//! tasks first. `DescendingSource` re-pages any ascending `PageSource` so
//! that page 1 holds the last `page_size` records, reversed.
//!
//! A descending page can straddle two ascending pages when the total is not
//! a multiple of the page size; only the ascending pages overlapping the
//! requested window are fetched.

use crate::core::traits::PageSource;
use crate::types::{ExportError, Page, PageNumber};
use async_trait::async_trait;
use std::future::Future;
use tracing::debug;

/// List one newest-first page from an oldest-first pager
///
/// For `total` records, returns the ascending index window
/// `[total - page * page_size, total - (page - 1) * page_size)` (clamped at
/// zero) in reverse order. A zero page size, page zero, or a page past the
/// end yields an empty list without calling `fetch_ascending`.
///
/// # Arguments
///
/// * `total` - Number of records in the collection
/// * `page_size` - Records per page, shared by both orderings
/// * `page` - One-based descending page number
/// * `fetch_ascending` - Fetches one one-based ascending page
pub async fn list_page_desc<R, F, Fut>(
    total: usize,
    page_size: usize,
    page: PageNumber,
    mut fetch_ascending: F,
) -> Result<Vec<R>, ExportError>
where
    F: FnMut(PageNumber) -> Fut,
    Fut: Future<Output = Result<Vec<R>, ExportError>>,
{
    if page_size == 0 || page == 0 {
        return Ok(Vec::new());
    }

    let skipped = (page - 1).saturating_mul(page_size);
    if skipped >= total {
        return Ok(Vec::new());
    }

    let end = total - skipped;
    let start = end.saturating_sub(page_size);
    let first_page = start / page_size + 1;
    let last_page = (end - 1) / page_size + 1;

    let mut window = Vec::with_capacity(end - start);
    for ascending_page in first_page..=last_page {
        let page_start = (ascending_page - 1) * page_size;
        let records = fetch_ascending(ascending_page).await?;

        window.extend(
            records
                .into_iter()
                .enumerate()
                .filter(|(offset, _)| (start..end).contains(&(page_start + offset)))
                .map(|(_, record)| record),
        );
    }

    window.reverse();
    Ok(window)
}

/// Page source adapter that lists an ascending source newest-first
///
/// Each fetch first probes the inner source for the collection total, so
/// the descending window tracks the collection as it grows.
#[derive(Debug, Clone)]
pub struct DescendingSource<S> {
    inner: S,
}

impl<S> DescendingSource<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: PageSource> PageSource for DescendingSource<S> {
    type Record = S::Record;

    async fn fetch_page(
        &self,
        collection: &str,
        page: PageNumber,
        page_size: usize,
    ) -> Result<Page<Self::Record>, ExportError> {
        let total = self.inner.fetch_page(collection, 1, 1).await?.total_count;
        debug!(
            "Descending page {} of '{}' over {} records",
            page, collection, total
        );

        let inner = &self.inner;
        let records = list_page_desc(total, page_size, page, move |ascending_page| async move {
            inner
                .fetch_page(collection, ascending_page, page_size)
                .await
                .map(|page| page.records)
        })
        .await?;

        Ok(Page::new(records, total))
    }
}
