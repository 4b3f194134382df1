//! Bucket interval parsing.
//!
//! Intervals are written as runs of digits followed by a unit letter:
//! `d` (days), `h` (hours), `m` (minutes) and `s` (seconds). Runs are summed,
//! so `1d2h30m15s` is 95 415 seconds and `1h1h` is two hours. A trailing run
//! without a unit counts as seconds. Any other character is skipped.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::IntervalError;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_DAY: u64 = 86_400;

/// Width of an aggregation bucket, in whole seconds.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Interval {
    seconds: u64,
}

/// Scanner state while reading an interval string.
#[derive(Debug, Clone, Copy)]
enum Scan {
    /// No digits pending.
    Idle,
    /// Inside a digit run with the accumulated value.
    Number(u64),
}

impl Interval {
    /// Creates an interval from a number of seconds.
    #[must_use]
    pub const fn from_seconds(seconds: u64) -> Self {
        Self { seconds }
    }

    /// Parses an interval string.
    ///
    /// Parsing never fails. Unrecognized characters are ignored and a string
    /// without digits yields a zero interval, which [`Self::to_time_delta`]
    /// rejects. Sums saturate at `u64::MAX` seconds.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut total: u64 = 0;
        let mut scan = Scan::Idle;

        for c in text.chars() {
            scan = match (scan, c.to_digit(10), unit_seconds(c)) {
                (Scan::Idle, Some(digit), _) => Scan::Number(u64::from(digit)),
                (Scan::Number(n), Some(digit), _) => {
                    Scan::Number(n.saturating_mul(10).saturating_add(u64::from(digit)))
                }
                (Scan::Number(n), None, Some(unit)) => {
                    total = total.saturating_add(n.saturating_mul(unit));
                    Scan::Idle
                }
                (state, _, _) => state,
            };
        }

        // Bare trailing digits are seconds
        if let Scan::Number(n) = scan {
            total = total.saturating_add(n);
        }

        Self::from_seconds(total)
    }

    /// Returns the interval length in seconds.
    #[must_use]
    pub const fn seconds(&self) -> u64 {
        self.seconds
    }

    /// Returns true if the interval is zero seconds long.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.seconds == 0
    }

    /// Converts the interval into a bucket width.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is zero or too large for a
    /// [`TimeDelta`].
    pub fn to_time_delta(&self) -> Result<TimeDelta, IntervalError> {
        if self.is_zero() {
            return Err(IntervalError::Zero);
        }
        i64::try_from(self.seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or(IntervalError::TooLarge {
                seconds: self.seconds,
            })
    }
}

/// Returns the number of seconds for a unit letter.
const fn unit_seconds(c: char) -> Option<u64> {
    match c {
        'd' => Some(SECONDS_PER_DAY),
        'h' => Some(SECONDS_PER_HOUR),
        'm' => Some(SECONDS_PER_MINUTE),
        's' => Some(1),
        _ => None,
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_zero() {
            return write!(f, "0s");
        }

        let mut rest = self.seconds;
        for (unit, letter) in [
            (SECONDS_PER_DAY, 'd'),
            (SECONDS_PER_HOUR, 'h'),
            (SECONDS_PER_MINUTE, 'm'),
            (1, 's'),
        ] {
            let count = rest / unit;
            if count > 0 {
                write!(f, "{count}{letter}")?;
            }
            rest %= unit;
        }
        Ok(())
    }
}

impl FromStr for Interval {
    type Err = IntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let interval = Self::parse(s);
        if interval.is_zero() {
            return Err(IntervalError::Zero);
        }
        Ok(interval)
    }
}
