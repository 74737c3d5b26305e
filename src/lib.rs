//! Archived Task Export Library
//! # Overview
//!
//! This library exports a paginated remote collection of archived tasks into a
//! single comma-delimited document, fetching pages with bounded concurrency.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (TaskRecord, Page, Document, errors)
//! - [`cli`] - CLI arguments parsing
//! - [`core`] - Export logic:
//!   - [`core::coordinator`] - Paginated fetch with capping and batch concurrency
//!   - [`core::descending`] - Newest-first paging over an oldest-first source
//!   - [`core::pipeline`] - Export-then-save orchestration
//! - [`io`] - Document format, file-backed source, document sinks
//!
//! # Export Flow
//!
//! 1. Page 1 is fetched to learn the collection total
//! 2. The total is capped at `max_records`; a [`TruncationWarning`] is raised
//!    when the cap applies
//! 3. Remaining pages are fetched in batches of `max_concurrent_pages`
//! 4. Records are appended in page order and serialized with a fixed header:
//!    `ID,Type,Queue,Payload,Max Retry,Retried,Last Failed,Error Message`
//!
//! Any failed fetch aborts the export; no partial document is produced.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod types;

pub use crate::core::{export, ExportConfig, ExportCoordinator, PageSource};
pub use crate::io::serialize_records;
pub use crate::types::{
    Document, ExportError, ExportOutcome, ExportRecord, Page, TaskRecord, TruncationWarning,
};
