//! Source file errors.

use std::num::{ParseFloatError, ParseIntError};
use thiserror::Error;

/// Errors that can occur while reading a source file.
///
/// Any of these discards the whole file.
#[derive(Error, Debug)]
pub enum SourceError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV decoding error (including invalid UTF-8).
    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),

    /// A row has fewer fields than required.
    #[error("Line {line}: expected {expected} fields, found {found}")]
    MissingField {
        /// Line number of the row.
        line: u64,
        /// Number of required fields.
        expected: usize,
        /// Number of fields in the row.
        found: usize,
    },

    /// The timestamp field does not match the source format.
    #[error("Line {line}: invalid timestamp '{value}': {source}")]
    Timestamp {
        /// Line number of the row.
        line: u64,
        /// The offending field.
        value: String,
        /// The underlying parse error.
        source: chrono::ParseError,
    },

    /// The price field is not a decimal number.
    #[error("Line {line}: invalid price '{value}': {source}")]
    Price {
        /// Line number of the row.
        line: u64,
        /// The offending field.
        value: String,
        /// The underlying parse error.
        source: ParseFloatError,
    },

    /// The size field is not a non-negative integer.
    #[error("Line {line}: invalid size '{value}': {source}")]
    Size {
        /// Line number of the row.
        line: u64,
        /// The offending field.
        value: String,
        /// The underlying parse error.
        source: ParseIntError,
    },
}
