//! OHLCV (candlestick) data structure.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// OHLCV bar (candlestick) data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ohlcv {
    /// Bucket start time.
    pub timestamp: NaiveDateTime,
    /// Opening price (first tick in the bucket).
    pub open: f64,
    /// Highest price during the bucket.
    pub high: f64,
    /// Lowest price during the bucket.
    pub low: f64,
    /// Closing price (last tick in the bucket).
    pub close: f64,
    /// Total traded size.
    pub volume: u64,
}

impl Ohlcv {
    /// Creates a new OHLCV bar.
    #[must_use]
    pub const fn new(
        timestamp: NaiveDateTime,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: u64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }
}
