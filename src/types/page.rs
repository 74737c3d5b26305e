//! Page type returned by a paged source

/// One bounded slice of a remote collection
///
/// Carries the records of the requested page in source order, plus the
/// number of records the whole collection held when the page was listed.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<R> {
    /// Records on this page, in source order
    pub records: Vec<R>,

    /// Total number of records in the full collection
    pub total_count: usize,
}

impl<R> Page<R> {
    /// Create a page from its records and the collection total
    pub fn new(records: Vec<R>, total_count: usize) -> Self {
        Page {
            records,
            total_count,
        }
    }

    /// Create a page with no records
    pub fn empty(total_count: usize) -> Self {
        Page {
            records: Vec::new(),
            total_count,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
