//! Aggregation time range and bucket iteration.

use chrono::{NaiveDateTime, TimeDelta};

use crate::TimeRangeError;

/// Time window that bucket starts are drawn from.
///
/// Buckets start at `start + k * width` for every `k >= 0` whose start is
/// before `end`. The last bucket may extend past `end`.
///
/// The default range is empty and yields no buckets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeRange {
    /// First bucket start (inclusive).
    pub start: NaiveDateTime,
    /// Bucket starts must be strictly before this instant.
    pub end: NaiveDateTime,
}

impl TimeRange {
    /// Creates a new time range, validating that start <= end.
    ///
    /// # Errors
    ///
    /// Returns an error if start > end.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, TimeRangeError> {
        if start > end {
            return Err(TimeRangeError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Returns an iterator over bucket starts of the given width.
    ///
    /// The width must be positive; a zero or negative width yields at most
    /// the first bucket start.
    #[must_use]
    pub fn buckets(&self, width: TimeDelta) -> Buckets {
        Buckets::new(self.start, self.end, width)
    }

    /// Returns the number of bucket starts [`Self::buckets`] yields for a
    /// width, without walking them.
    ///
    /// Saturates at `usize::MAX`.
    #[must_use]
    pub fn bucket_count(&self, width: TimeDelta) -> usize {
        if self.start >= self.end {
            return 0;
        }
        if width <= TimeDelta::zero() {
            return 1;
        }

        let span = total_nanos(self.duration());
        let width = total_nanos(width);
        usize::try_from(span.div_ceil(width)).unwrap_or(usize::MAX)
    }

    /// Returns the range length.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }
}

impl std::fmt::Display for TimeRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

/// Exact length of a non-negative delta in nanoseconds.
fn total_nanos(delta: TimeDelta) -> u128 {
    let seconds = u128::try_from(delta.num_seconds()).unwrap_or(0);
    seconds * 1_000_000_000 + u128::from(delta.subsec_nanos().unsigned_abs())
}

/// Iterator over bucket starts in a time range.
#[derive(Debug, Clone)]
pub struct Buckets {
    current: Option<NaiveDateTime>,
    end: NaiveDateTime,
    width: TimeDelta,
}

impl Buckets {
    const fn new(start: NaiveDateTime, end: NaiveDateTime, width: TimeDelta) -> Self {
        Self {
            current: Some(start),
            end,
            width,
        }
    }
}

impl Iterator for Buckets {
    type Item = NaiveDateTime;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.current.filter(|current| *current < self.end)?;

        self.current = if self.width > TimeDelta::zero() {
            current.checked_add_signed(self.width)
        } else {
            None
        };
        Some(current)
    }
}
