//! Output format abstraction.

use std::io::Write;
use thiserror::Error;
use tickbars_aggregate::Ohlcv;
use tickbars_types::CleanTick;

use crate::CsvFormatter;
#[cfg(feature = "json")]
use crate::JsonFormatter;

/// Output format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutputFormat {
    /// CSV format.
    #[default]
    Csv,
    /// Tab-separated values.
    Tsv,
    /// JSON array format.
    Json,
    /// Newline-delimited JSON format.
    Ndjson,
}

impl OutputFormat {
    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
            Self::Ndjson => "ndjson",
        }
    }

    /// Returns all available formats.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Csv, Self::Tsv, Self::Json, Self::Ndjson]
    }

    /// Writes cleaned ticks with this format's formatter.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or the format was compiled out.
    pub fn write_ticks<W: Write + Send>(
        &self,
        ticks: &[CleanTick],
        writer: W,
    ) -> Result<(), FormatError> {
        match self {
            Self::Csv => CsvFormatter::new().write_ticks(ticks, writer),
            Self::Tsv => CsvFormatter::tsv().write_ticks(ticks, writer),
            #[cfg(feature = "json")]
            Self::Json => JsonFormatter::new().write_ticks(ticks, writer),
            #[cfg(feature = "json")]
            Self::Ndjson => JsonFormatter::ndjson().write_ticks(ticks, writer),
            #[cfg(not(feature = "json"))]
            Self::Json | Self::Ndjson => Err(FormatError::Unsupported(*self)),
        }
    }

    /// Writes OHLCV bars with this format's formatter.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails or the format was compiled out.
    pub fn write_ohlcv<W: Write + Send>(
        &self,
        bars: &[Ohlcv],
        writer: W,
    ) -> Result<(), FormatError> {
        match self {
            Self::Csv => CsvFormatter::new().write_ohlcv(bars, writer),
            Self::Tsv => CsvFormatter::tsv().write_ohlcv(bars, writer),
            #[cfg(feature = "json")]
            Self::Json => JsonFormatter::new().write_ohlcv(bars, writer),
            #[cfg(feature = "json")]
            Self::Ndjson => JsonFormatter::ndjson().write_ohlcv(bars, writer),
            #[cfg(not(feature = "json"))]
            Self::Json | Self::Ndjson => Err(FormatError::Unsupported(*self)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "json" => Ok(Self::Json),
            "ndjson" | "jsonl" => Ok(Self::Ndjson),
            _ => Err(FormatError::UnknownFormat(s.to_string())),
        }
    }
}

/// Errors that can occur during formatting.
#[derive(Error, Debug)]
pub enum FormatError {
    /// Unknown output format.
    #[error("Unknown format: {0}")]
    UnknownFormat(String),

    /// The format was compiled out.
    #[error("Format not compiled in: {0}")]
    Unsupported(OutputFormat),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV decoding error.
    #[error("CSV error: {0}")]
    Csv(#[from] csv_async::Error),

    /// A bar row could not be parsed.
    #[error("Line {line}: {message}")]
    Parse {
        /// Line number of the row.
        line: u64,
        /// What was wrong with the row.
        message: String,
    },
}

/// Trait for output formatters.
pub trait Formatter: Send + Sync {
    /// Writes cleaned tick data to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_ticks<W: Write + Send>(
        &self,
        ticks: &[CleanTick],
        writer: W,
    ) -> Result<(), FormatError>;

    /// Writes OHLCV data to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_ohlcv<W: Write + Send>(&self, bars: &[Ohlcv], writer: W) -> Result<(), FormatError>;

    /// Returns the file extension for this format.
    fn extension(&self) -> &str;
}
