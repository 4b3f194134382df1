//! Fixed-width bucket aggregation.

use chrono::{NaiveDateTime, TimeDelta};
use thiserror::Error;
use tickbars_types::{Buckets, CleanTick, Interval, IntervalError, TimeRange};

use crate::Ohlcv;

/// Errors that prevent aggregation from starting.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AggregateError {
    /// The bucket interval is unusable.
    #[error(transparent)]
    Interval(#[from] IntervalError),
}

/// Bucket aggregator over a fixed time range.
///
/// Buckets are `[start + k * width, start + (k + 1) * width)` for every
/// `k >= 0` whose start lies before the range end. The last bucket is not
/// clipped to the range end, so it also collects ticks past it. Ticks before
/// the range start belong to no bucket, and empty buckets produce no bar.
#[derive(Debug, Clone, Copy)]
pub struct BucketAggregator {
    range: TimeRange,
    width: TimeDelta,
}

impl BucketAggregator {
    /// Creates a new aggregator.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is zero or too large.
    pub fn new(range: TimeRange, interval: Interval) -> Result<Self, AggregateError> {
        let width = interval.to_time_delta()?;
        Ok(Self { range, width })
    }

    /// Returns the time range buckets are drawn from.
    #[must_use]
    pub const fn range(&self) -> TimeRange {
        self.range
    }

    /// Returns the bucket width.
    #[must_use]
    pub const fn width(&self) -> TimeDelta {
        self.width
    }

    /// Returns an iterator over every bucket start, empty or not.
    #[must_use]
    pub fn buckets(&self) -> Buckets {
        self.range.buckets(self.width)
    }

    /// Returns the number of buckets in the range, empty ones included.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.range.bucket_count(self.width)
    }

    /// Aggregates ticks into bars, one per non-empty bucket, in time order.
    ///
    /// Ticks are stably sorted by timestamp first, so ticks sharing a
    /// timestamp keep their input order when picking open and close.
    #[must_use]
    pub fn aggregate(&self, ticks: &[CleanTick]) -> Vec<Ohlcv> {
        let mut sorted = ticks.to_vec();
        sorted.sort_by_key(|tick| tick.timestamp);
        self.aggregate_sorted(&sorted)
    }

    /// Aggregates ticks that are already sorted by timestamp.
    ///
    /// Walks the ticks once, jumping straight to the bucket of the next
    /// tick instead of visiting empty buckets.
    #[must_use]
    pub fn aggregate_sorted(&self, ticks: &[CleanTick]) -> Vec<Ohlcv> {
        let mut bars = Vec::new();
        let first = ticks.partition_point(|tick| tick.timestamp < self.range.start);
        let mut rest = &ticks[first..];

        while let Some(next) = rest.first() {
            let Some(bucket_start) = self.bucket_start_for(next.timestamp) else {
                break;
            };
            if bucket_start >= self.range.end {
                break;
            }
            // Past the representable time range nothing more can be bucketed
            let Some(bucket_end) = bucket_start.checked_add_signed(self.width) else {
                break;
            };

            let len = rest.partition_point(|tick| tick.timestamp < bucket_end);
            let (members, tail) = rest.split_at(len);
            if let Some(bar) = build_bar(bucket_start, members) {
                bars.push(bar);
            }
            rest = tail;
        }

        bars
    }

    /// Returns the start of the bucket holding a timestamp at or after the
    /// range start.
    fn bucket_start_for(&self, timestamp: NaiveDateTime) -> Option<NaiveDateTime> {
        let offset = timestamp.signed_duration_since(self.range.start).num_seconds();
        let width = self.width.num_seconds();
        let index = offset / width;
        TimeDelta::try_seconds(index.checked_mul(width)?)
            .and_then(|delta| self.range.start.checked_add_signed(delta))
    }
}

/// Aggregates cleaned ticks over a time range with the given interval.
///
/// # Errors
///
/// Returns an error if the interval is zero or too large. A zero interval
/// would never advance past the first bucket.
pub fn aggregate(
    ticks: &[CleanTick],
    range: TimeRange,
    interval: Interval,
) -> Result<Vec<Ohlcv>, AggregateError> {
    Ok(BucketAggregator::new(range, interval)?.aggregate(ticks))
}

/// Builds the bar for a bucket, or `None` if the bucket is empty.
fn build_bar(bucket_start: NaiveDateTime, members: &[CleanTick]) -> Option<Ohlcv> {
    let (first, rest) = members.split_first()?;
    let mut builder = OhlcvBuilder::new(bucket_start, first);
    for tick in rest {
        builder.update(tick);
    }
    Some(builder.finish())
}

/// Builder for OHLCV bars.
#[derive(Debug)]
struct OhlcvBuilder {
    timestamp: NaiveDateTime,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl OhlcvBuilder {
    /// Creates a new builder from the first tick.
    const fn new(timestamp: NaiveDateTime, tick: &CleanTick) -> Self {
        Self {
            timestamp,
            open: tick.price,
            high: tick.price,
            low: tick.price,
            close: tick.price,
            volume: tick.size,
        }
    }

    /// Updates the builder with a new tick.
    fn update(&mut self, tick: &CleanTick) {
        self.high = self.high.max(tick.price);
        self.low = self.low.min(tick.price);
        self.close = tick.price;
        self.volume = self.volume.saturating_add(tick.size);
    }

    /// Finishes building and returns the OHLCV bar.
    const fn finish(self) -> Ohlcv {
        Ohlcv::new(
            self.timestamp,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32, second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 9, 16)
            .unwrap()
            .and_hms_opt(hour, minute, second)
            .unwrap()
    }

    fn make_tick(hour: u32, minute: u32, second: u32, price: f64, size: u64) -> CleanTick {
        CleanTick::new(at(hour, minute, second), price, size)
    }

    fn range(start: NaiveDateTime, end: NaiveDateTime) -> TimeRange {
        TimeRange::new(start, end).unwrap()
    }

    /// Per-bucket scan over every tick, as a reference for the single pass.
    fn aggregate_naive(
        ticks: &[CleanTick],
        range: TimeRange,
        width: TimeDelta,
    ) -> Vec<Ohlcv> {
        let mut sorted = ticks.to_vec();
        sorted.sort_by_key(|tick| tick.timestamp);
        range
            .buckets(width)
            .filter_map(|start| {
                let members: Vec<_> = sorted
                    .iter()
                    .copied()
                    .filter(|tick| tick.timestamp >= start && tick.timestamp < start + width)
                    .collect();
                build_bar(start, &members)
            })
            .collect()
    }

    #[test]
    fn test_hour_buckets_anchor_at_start() {
        let ticks = vec![
            make_tick(9, 30, 0, 500.0, 10),
            make_tick(9, 45, 0, 510.0, 20),
            make_tick(10, 15, 0, 490.0, 5),
        ];

        let bars = aggregate(&ticks, range(at(9, 30, 0), at(11, 0, 0)), Interval::parse("1h"))
            .unwrap();

        // Buckets are [09:30, 10:30) and [10:30, 11:30); every tick is in the first
        assert_eq!(bars.len(), 1);
        let bar = bars[0];
        assert_eq!(bar.timestamp, at(9, 30, 0));
        assert_relative_eq!(bar.open, 500.0);
        assert_relative_eq!(bar.high, 510.0);
        assert_relative_eq!(bar.low, 490.0);
        assert_relative_eq!(bar.close, 490.0);
        assert_eq!(bar.volume, 35);
    }

    #[test]
    fn test_last_bucket_extends_past_end() {
        let ticks = vec![
            make_tick(9, 30, 0, 500.0, 10),
            make_tick(10, 45, 0, 505.0, 1),
            make_tick(11, 15, 0, 520.0, 2),
            make_tick(11, 30, 0, 530.0, 4),
        ];

        let bars = aggregate(&ticks, range(at(9, 30, 0), at(11, 0, 0)), Interval::parse("1h"))
            .unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[1].timestamp, at(10, 30, 0));
        assert_relative_eq!(bars[1].open, 505.0);
        assert_relative_eq!(bars[1].close, 520.0);
        assert_eq!(bars[1].volume, 3);
    }

    #[test]
    fn test_bucket_starting_at_end_excluded() {
        let ticks = vec![make_tick(11, 0, 0, 500.0, 10)];

        let bars = aggregate(&ticks, range(at(10, 0, 0), at(11, 0, 0)), Interval::parse("1h"))
            .unwrap();

        assert!(bars.is_empty());
    }

    #[test]
    fn test_ticks_before_start_ignored() {
        let ticks = vec![
            make_tick(9, 0, 0, 450.0, 100),
            make_tick(9, 30, 0, 500.0, 10),
        ];

        let bars = aggregate(&ticks, range(at(9, 30, 0), at(10, 0, 0)), Interval::parse("30m"))
            .unwrap();

        assert_eq!(bars.len(), 1);
        assert_relative_eq!(bars[0].open, 500.0);
        assert_eq!(bars[0].volume, 10);
    }

    #[test]
    fn test_empty_buckets_skipped() {
        let ticks = vec![
            make_tick(9, 31, 0, 500.0, 1),
            make_tick(12, 5, 0, 510.0, 2),
        ];

        let aggregator =
            BucketAggregator::new(range(at(9, 30, 0), at(16, 0, 0)), Interval::parse("15m"))
                .unwrap();
        let bars = aggregator.aggregate(&ticks);

        assert_eq!(aggregator.buckets().count(), 26);
        assert_eq!(aggregator.bucket_count(), 26);
        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].timestamp, at(9, 30, 0));
        assert_eq!(bars[1].timestamp, at(12, 0, 0));
    }

    #[test]
    fn test_unsorted_input_is_stably_sorted() {
        let ticks = vec![
            make_tick(9, 50, 0, 520.0, 1),
            make_tick(9, 40, 0, 500.0, 1),
            make_tick(9, 40, 0, 505.0, 1),
        ];

        let bars = aggregate(&ticks, range(at(9, 30, 0), at(10, 0, 0)), Interval::parse("30m"))
            .unwrap();

        assert_eq!(bars.len(), 1);
        assert_relative_eq!(bars[0].open, 500.0);
        assert_relative_eq!(bars[0].close, 520.0);
        assert_relative_eq!(bars[0].high, 520.0);
        assert_relative_eq!(bars[0].low, 500.0);
    }

    #[test]
    fn test_tied_timestamps_keep_input_order() {
        let ticks = vec![
            make_tick(9, 40, 0, 505.0, 1),
            make_tick(9, 40, 0, 500.0, 1),
        ];

        let bars = aggregate(&ticks, range(at(9, 30, 0), at(10, 0, 0)), Interval::parse("30m"))
            .unwrap();

        assert_relative_eq!(bars[0].open, 505.0);
        assert_relative_eq!(bars[0].close, 500.0);
    }

    #[test]
    fn test_zero_interval_rejected() {
        let result = aggregate(&[], range(at(9, 30, 0), at(16, 0, 0)), Interval::parse("abc"));
        assert_eq!(result, Err(AggregateError::Interval(IntervalError::Zero)));
    }

    #[test]
    fn test_empty_inputs() {
        let full_day = range(at(9, 30, 0), at(16, 0, 0));
        let empty_range = range(at(9, 30, 0), at(9, 30, 0));
        let ticks = vec![make_tick(9, 40, 0, 500.0, 1)];

        assert!(aggregate(&[], full_day, Interval::parse("1m")).unwrap().is_empty());
        assert!(aggregate(&ticks, empty_range, Interval::parse("1m")).unwrap().is_empty());
    }

    #[test]
    fn test_matches_per_bucket_scan() {
        let mut ticks = Vec::new();
        for i in 0..500u32 {
            let second = (i * 7919) % 30_000;
            let timestamp = at(8, 0, 0) + TimeDelta::seconds(i64::from(second));
            let price = 400.0 + f64::from((i * 31) % 97);
            ticks.push(CleanTick::new(timestamp, price, u64::from(i % 13)));
        }

        let day = range(at(9, 30, 0), at(16, 0, 0));
        for text in ["1s", "45s", "1m", "7m30s", "1h", "2h15m", "1d"] {
            let interval = Interval::parse(text);
            let fast = aggregate(&ticks, day, interval).unwrap();
            let naive = aggregate_naive(&ticks, day, interval.to_time_delta().unwrap());
            assert_eq!(fast, naive, "interval {text}");
        }
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let ticks = vec![
            make_tick(9, 31, 0, 500.0, 1),
            make_tick(10, 5, 0, 510.0, 2),
            make_tick(10, 6, 0, 495.5, 3),
        ];
        let aggregator =
            BucketAggregator::new(range(at(9, 30, 0), at(16, 0, 0)), Interval::parse("5m"))
                .unwrap();

        assert_eq!(aggregator.aggregate(&ticks), aggregator.aggregate(&ticks));
    }

    #[test]
    fn test_fractional_timestamps_on_bucket_edge() {
        let edge = at(9, 35, 0);
        let before = CleanTick::new(edge - TimeDelta::microseconds(1), 500.0, 1);
        let on_edge = CleanTick::new(edge, 600.0, 1);

        let bars = aggregate(
            &[before, on_edge],
            range(at(9, 30, 0), at(9, 40, 0)),
            Interval::parse("5m"),
        )
        .unwrap();

        assert_eq!(bars.len(), 2);
        assert_relative_eq!(bars[0].close, 500.0);
        assert_eq!(bars[1].timestamp, edge);
        assert_relative_eq!(bars[1].open, 600.0);
    }
}
