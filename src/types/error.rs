//! Error types for the task export engine
//!
//! This module defines all error types that can occur during an export.
//! Errors are designed to be descriptive and user-friendly for CLI output.
//!
//! # Error Categories
//!
//! - **Source Errors**: a page fetch failed; fatal to the whole export
//! - **Cancellation**: the caller abandoned the export
//! - **File I/O Errors**: file not found, permission denied, disk full, etc.
//! - **CSV Parsing Errors**: unusable input to a file-backed source
//! - **Write Errors**: the document writer rejected a row
//!
//! A truncated export is not an error; see
//! [`TruncationWarning`](crate::types::TruncationWarning).

use crate::types::PageNumber;
use thiserror::Error;

/// Main error type for the export engine
///
/// Every variant is fatal to the export attempt that produced it: no
/// partial document is returned alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ExportError {
    /// A page fetch failed
    ///
    /// Aborts the whole export. Pages already fetched by the same export
    /// are discarded. The coordinator does not retry.
    #[error("Failed to fetch page {page}: {message}")]
    SourceError {
        /// The page that could not be fetched
        page: PageNumber,
        /// Description of the failure reported by the source
        message: String,
    },

    /// The export was cancelled before it completed
    #[error("Export cancelled")]
    Cancelled,

    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// Raised by file-backed sources. Row-level parse errors are logged and
    /// skipped; this variant only escapes when the input is unusable, such as
    /// a header row missing a required column.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Writing the export document failed
    #[error("Failed to write document: {message}")]
    WriteError {
        /// Description of the write failure
        message: String,
    },
}

// Conversion from io::Error to ExportError
impl From<std::io::Error> for ExportError {
    fn from(error: std::io::Error) -> Self {
        ExportError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv_async::Error to ExportError
impl From<csv_async::Error> for ExportError {
    fn from(error: csv_async::Error) -> Self {
        if let csv_async::ErrorKind::Io(io_error) = error.kind() {
            return ExportError::IoError {
                message: io_error.to_string(),
            };
        }

        // csv-async already folds the position into its message
        ExportError::ParseError {
            line: None,
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error (document writer) to ExportError
impl From<csv::Error> for ExportError {
    fn from(error: csv::Error) -> Self {
        ExportError::WriteError {
            message: error.to_string(),
        }
    }
}

impl ExportError {
    /// Create a SourceError for a failed page fetch
    pub fn source_error(page: PageNumber, message: impl Into<String>) -> Self {
        ExportError::SourceError {
            page,
            message: message.into(),
        }
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        ExportError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Whether this error came from the page source
    pub fn is_source_error(&self) -> bool {
        matches!(self, ExportError::SourceError { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::source_error(
        ExportError::SourceError { page: 2, message: "connection reset".to_string() },
        "Failed to fetch page 2: connection reset"
    )]
    #[case::cancelled(ExportError::Cancelled, "Export cancelled")]
    #[case::file_not_found(
        ExportError::FileNotFound { path: "tasks.csv".to_string() },
        "File not found: tasks.csv"
    )]
    #[case::io_error(
        ExportError::IoError { message: "Permission denied".to_string() },
        "I/O error: Permission denied"
    )]
    #[case::parse_error_with_line(
        ExportError::ParseError { line: Some(42), message: "Invalid field".to_string() },
        "CSV parse error at line 42: Invalid field"
    )]
    #[case::parse_error_without_line(
        ExportError::ParseError { line: None, message: "Invalid field".to_string() },
        "CSV parse error: Invalid field"
    )]
    #[case::write_error(
        ExportError::WriteError { message: "buffer closed".to_string() },
        "Failed to write document: buffer closed"
    )]
    fn test_error_display(#[case] error: ExportError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    #[case::source_error(
        ExportError::source_error(3, "timeout"),
        ExportError::SourceError { page: 3, message: "timeout".to_string() }
    )]
    #[case::file_not_found(
        ExportError::file_not_found("missing.csv"),
        ExportError::FileNotFound { path: "missing.csv".to_string() }
    )]
    fn test_helper_functions(#[case] result: ExportError, #[case] expected: ExportError) {
        assert_eq!(result, expected);
    }

    #[test]
    fn test_is_source_error() {
        assert!(ExportError::source_error(1, "boom").is_source_error());
        assert!(!ExportError::Cancelled.is_source_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "Permission denied");
        let error: ExportError = io_error.into();
        assert!(matches!(error, ExportError::IoError { .. }));
        assert_eq!(error.to_string(), "I/O error: Permission denied");
    }

    #[test]
    fn test_csv_async_io_error_conversion() {
        let io_error = std::io::Error::other("Is a directory");
        let error: ExportError = csv_async::Error::from(io_error).into();
        assert_eq!(
            error,
            ExportError::IoError {
                message: "Is a directory".to_string()
            }
        );
    }
}
