//! Core export logic module
//!
//! This module contains the export engine components:
//! - `traits` - Collaborator abstractions (page source, document sink)
//! - `coordinator` - Bounded-concurrency paginated fetch and capping
//! - `descending` - Newest-first paging over an oldest-first source
//! - `pipeline` - Export-then-save orchestration

pub mod coordinator;
pub mod descending;
pub mod pipeline;
pub mod traits;

pub use coordinator::{export, remaining_pages, ExportConfig, ExportCoordinator, ExportResult};
pub use descending::{list_page_desc, DescendingSource};
pub use pipeline::{run_export, ExportReport};
pub use traits::{DocumentSink, PageSource};
