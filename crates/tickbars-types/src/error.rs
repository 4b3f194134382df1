//! Error types for tickbars configuration values.

use chrono::NaiveDateTime;
use thiserror::Error;

/// Errors for bucket intervals that cannot drive aggregation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntervalError {
    /// The interval parsed to zero seconds.
    #[error("Interval must be greater than zero seconds")]
    Zero,

    /// The interval does not fit in a time delta.
    #[error("Interval of {seconds} seconds is too large")]
    TooLarge {
        /// The parsed interval length.
        seconds: u64,
    },
}

/// Error for invalid aggregation time ranges.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeRangeError {
    /// Start time is after end time.
    #[error("Invalid time range: {start} > {end}")]
    InvalidRange {
        /// The start time.
        start: NaiveDateTime,
        /// The end time.
        end: NaiveDateTime,
    },
}
