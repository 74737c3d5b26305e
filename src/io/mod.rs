//! I/O module
//!
//! Handles document serialization and the local collaborators around it.
//!
//! # Components
//!
//! - `csv_format` - Document format (quoting rule, record serialization)
//! - `async_reader` - Asynchronous CSV reader with batch reading interface
//! - `file_source` - Page source backed by a local CSV file
//! - `sink` - Document sinks and filename derivation

pub mod async_reader;
pub mod csv_format;
pub mod file_source;
pub mod sink;

pub use async_reader::AsyncReader;
pub use csv_format::serialize_records;
pub use file_source::CsvFileSource;
pub use sink::{document_filename, DirectorySink};
