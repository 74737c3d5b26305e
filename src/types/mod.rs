//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `record`: Exported record types and the row layout trait
//! - `page`: Page of records returned by a paged source
//! - `document`: Serialized document, truncation warning and export outcome
//! - `error`: Error types for the export engine

pub mod document;
pub mod error;
pub mod page;
pub mod record;

pub use document::{Document, ExportOutcome, TruncationWarning};
pub use error::ExportError;
pub use page::Page;
pub use record::{ExportRecord, PageNumber, TaskRecord};
