//! Export output types
//!
//! - `Document`: the serialized comma-delimited text
//! - `TruncationWarning`: non-fatal notice that the cap was applied
//! - `ExportOutcome`: what a completed export hands back to its caller

use std::fmt;

/// Serialized export document
///
/// A header line followed by one line per record, joined by `\n` with no
/// trailing line break. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    text: String,
    rows: usize,
}

impl Document {
    pub(crate) fn new(text: String, rows: usize) -> Self {
        Document { text, rows }
    }

    /// Document text
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Document bytes (UTF-8)
    pub fn as_bytes(&self) -> &[u8] {
        self.text.as_bytes()
    }

    /// Number of record rows, excluding the header
    pub fn row_count(&self) -> usize {
        self.rows
    }

    /// Size of the document in bytes
    pub fn byte_len(&self) -> usize {
        self.text.len()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Notice that the remote collection exceeds the export cap
///
/// Not an error: the export still completes with the first `max_records`
/// records. The caller is expected to present this to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TruncationWarning {
    /// Records in the remote collection
    pub total_count: usize,

    /// Records actually exported
    pub max_records: usize,
}

impl fmt::Display for TruncationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "There are {} archived tasks. Export is limited to the first {} tasks.",
            group_thousands(self.total_count),
            group_thousands(self.max_records)
        )
    }
}

/// Result of a successful export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    /// The serialized document
    pub document: Document,

    /// Set when the collection was larger than the cap
    pub warning: Option<TruncationWarning>,
}

/// Format a count with `,` thousands separators (15000 -> "15,000")
fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
