//! Trade tick representation.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A single trade record as loaded from a source file.
///
/// The price is missing when the source field was empty; a missing size is
/// loaded as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    /// Trade time (naive local clock time).
    pub timestamp: NaiveDateTime,
    /// Trade price, if present.
    pub price: Option<f64>,
    /// Trade size.
    pub size: u64,
}

impl Tick {
    /// Creates a new tick.
    #[must_use]
    pub const fn new(timestamp: NaiveDateTime, price: Option<f64>, size: u64) -> Self {
        Self {
            timestamp,
            price,
            size,
        }
    }

    /// Returns the tick as a [`CleanTick`] if it carries a price.
    ///
    /// This only checks price presence; the range and session rules are
    /// applied by the cleaner.
    #[must_use]
    pub fn priced(&self) -> Option<CleanTick> {
        self.price
            .map(|price| CleanTick::new(self.timestamp, price, self.size))
    }
}

/// A trade record that survived cleaning.
///
/// Unlike [`Tick`], the price is always present.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CleanTick {
    /// Trade time (naive local clock time).
    pub timestamp: NaiveDateTime,
    /// Trade price.
    pub price: f64,
    /// Trade size.
    pub size: u64,
}

impl CleanTick {
    /// Creates a new clean tick.
    #[must_use]
    pub const fn new(timestamp: NaiveDateTime, price: f64, size: u64) -> Self {
        Self {
            timestamp,
            price,
            size,
        }
    }
}
