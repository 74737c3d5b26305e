//! CSV format handling for exported documents
//!
//! This module centralizes the document format, providing:
//! - The writer configuration for the comma-delimited quoting rule
//! - Serialization of an ordered record list into a `Document`
//!
//! All functions are pure (no I/O) for easy testing.

use crate::types::{Document, ExportError, ExportRecord};
use csv::{QuoteStyle, Terminator, Writer, WriterBuilder};

/// Field delimiter
pub const DELIMITER: u8 = b',';

/// Line terminator between rows
pub const LINE_BREAK: u8 = b'\n';

/// In-memory writer for document rows
///
/// A field is wrapped in double quotes, with every embedded quote doubled,
/// if and only if it contains a double quote, the delimiter, or a line break
/// (`\n` or `\r`). Any other field is written unchanged.
fn document_writer() -> Writer<Vec<u8>> {
    WriterBuilder::new()
        .delimiter(DELIMITER)
        .quote_style(QuoteStyle::Necessary)
        .terminator(Terminator::Any(LINE_BREAK))
        .from_writer(Vec::new())
}

/// Serialize records into a complete document
///
/// Writes the header row named by `R::HEADERS` followed by one row per
/// record, in the order given. Rows are joined by a single `\n` and the
/// document does not end with a line break.
///
/// # Arguments
///
/// * `records` - Records to serialize, already in export order
///
/// # Returns
///
/// * `Ok(Document)` with the header and every record row
/// * `Err(ExportError::WriteError)` if the writer rejects a row; an
///   in-memory buffer never does
pub fn serialize_records<R: ExportRecord>(records: &[R]) -> Result<Document, ExportError> {
    let mut writer = document_writer();

    writer.write_record(R::HEADERS)?;
    for record in records {
        writer.write_record(record.fields())?;
    }

    let mut bytes = writer.into_inner().map_err(|e| ExportError::WriteError {
        message: e.error().to_string(),
    })?;

    // Rows are separated, not terminated
    if bytes.last() == Some(&LINE_BREAK) {
        bytes.pop();
    }

    let text = String::from_utf8(bytes).map_err(|e| ExportError::WriteError {
        message: e.to_string(),
    })?;

    Ok(Document::new(text, records.len()))
}
