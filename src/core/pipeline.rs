//! End-to-end export pipeline
//!
//! Runs an export and hands the finished document to a sink under the
//! filename derived from the collection. Nothing is saved unless the whole
//! export succeeded.

use crate::core::coordinator::ExportCoordinator;
use crate::core::traits::{DocumentSink, PageSource};
use crate::io::sink::document_filename;
use crate::types::{ExportError, ExportRecord, TruncationWarning};
use std::time::Instant;
use tracing::info;

/// Summary of a saved export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    /// Filename the document was saved under
    pub filename: String,
    /// Number of records in the document
    pub records_exported: usize,
    /// Document size in bytes
    pub bytes_written: usize,
    /// Time taken for the export, save included
    pub elapsed_ms: u64,
    /// Set when the collection was larger than the cap
    pub warning: Option<TruncationWarning>,
}

/// Export `collection` and save the document through `sink`
///
/// # Returns
///
/// * `Ok(ExportReport)` once the document has been saved
/// * `Err(ExportError)` if the export failed, was cancelled, or could not
///   be saved; in every case no document reaches the sink
pub async fn run_export<S, K>(
    coordinator: &ExportCoordinator<S>,
    sink: &K,
    collection: &str,
) -> Result<ExportReport, ExportError>
where
    S: PageSource,
    S::Record: ExportRecord,
    K: DocumentSink + ?Sized,
{
    let start_time = Instant::now();

    let outcome = coordinator.export(collection).await?;
    let filename = document_filename(collection);
    let records_exported = outcome.document.row_count();
    let bytes_written = outcome.document.byte_len();

    sink.save(outcome.document.as_bytes(), &filename).await?;

    let elapsed_ms = start_time.elapsed().as_millis() as u64;
    info!(
        "Export completed: {} records, {} bytes, {} ms",
        records_exported, bytes_written, elapsed_ms
    );

    Ok(ExportReport {
        filename,
        records_exported,
        bytes_written,
        elapsed_ms,
        warning: outcome.warning,
    })
}
