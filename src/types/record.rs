//! Record-related types for the task export engine
//!
//! This module defines the archived task record as it is listed by the
//! remote source, and the trait that describes how any record is laid out
//! as a row of the exported document.

use serde::Deserialize;

/// One-based page number as understood by a paged source
pub type PageNumber = usize;

/// A record that can be written as one row of an exported document
///
/// `HEADERS` fixes the column order; `fields` must return exactly one value
/// per header, in the same order.
pub trait ExportRecord {
    /// Column names, in output order
    const HEADERS: &'static [&'static str];

    /// Textual field values, in `HEADERS` order
    fn fields(&self) -> Vec<String>;
}

/// Archived task as listed by the task queue
///
/// Represents a task that exhausted its retries and was moved to the
/// archive. Every field is carried through to the export verbatim; the
/// payload is kept in its already-serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskRecord {
    /// Unique task identifier
    pub id: String,

    /// Task type name used to route the task to a handler
    #[serde(rename = "type")]
    pub task_type: String,

    /// Name of the queue the task belongs to
    pub queue: String,

    /// Serialized task payload (usually JSON)
    pub payload: String,

    /// Maximum number of retries allowed for the task
    pub max_retry: u32,

    /// Number of retries already attempted
    pub retried: u32,

    /// Timestamp of the last failure, as reported by the source
    #[serde(default)]
    pub last_failed_at: String,

    /// Error message recorded on the last failure
    #[serde(default)]
    pub error_message: String,
}

impl ExportRecord for TaskRecord {
    const HEADERS: &'static [&'static str] = &[
        "ID",
        "Type",
        "Queue",
        "Payload",
        "Max Retry",
        "Retried",
        "Last Failed",
        "Error Message",
    ];

    fn fields(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.task_type.clone(),
            self.queue.clone(),
            self.payload.clone(),
            self.max_retry.to_string(),
            self.retried.to_string(),
            self.last_failed_at.clone(),
            self.error_message.clone(),
        ]
    }
}
