//! Tick validity rules.

use chrono::NaiveTime;
use tickbars_types::{CleanTick, Tick};

/// Default minimum accepted price.
pub const DEFAULT_MIN_PRICE: f64 = 400.0;

/// Default maximum accepted trade size.
pub const DEFAULT_MAX_SIZE: u64 = 995;

/// Reason a tick was dropped. Rules are checked in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    /// The price field was empty.
    MissingPrice,
    /// The price is below the minimum (or NaN).
    PriceBelowMinimum,
    /// The size is above the maximum.
    SizeAboveMaximum,
    /// The time of day is outside the trading session.
    OutsideSession,
}

/// Tick validity rules.
///
/// A tick passes when its price is present and at least `min_price`, its size
/// is at most `max_size`, and its time of day lies in
/// `[session_open, session_close]`, both ends inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CleanFilter {
    /// Minimum accepted price (inclusive).
    pub min_price: f64,
    /// Maximum accepted size (inclusive).
    pub max_size: u64,
    /// Session start time of day (inclusive).
    pub session_open: NaiveTime,
    /// Session end time of day (inclusive).
    pub session_close: NaiveTime,
}

impl Default for CleanFilter {
    fn default() -> Self {
        Self {
            min_price: DEFAULT_MIN_PRICE,
            max_size: DEFAULT_MAX_SIZE,
            session_open: NaiveTime::from_hms_opt(9, 30, 0).expect("valid session open"),
            session_close: NaiveTime::from_hms_opt(16, 0, 0).expect("valid session close"),
        }
    }
}

impl CleanFilter {
    /// Creates a filter with the default rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the minimum accepted price.
    #[must_use]
    pub const fn with_min_price(mut self, min_price: f64) -> Self {
        self.min_price = min_price;
        self
    }

    /// Sets the maximum accepted size.
    #[must_use]
    pub const fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    /// Sets the trading session window.
    ///
    /// An open time after the close time rejects every tick.
    #[must_use]
    pub const fn with_session(mut self, open: NaiveTime, close: NaiveTime) -> Self {
        self.session_open = open;
        self.session_close = close;
        self
    }

    /// Returns the first rule the tick fails, or `None` if it passes.
    #[must_use]
    pub fn rejection(&self, tick: &Tick) -> Option<Rejection> {
        let Some(price) = tick.price else {
            return Some(Rejection::MissingPrice);
        };
        if price.is_nan() || price < self.min_price {
            return Some(Rejection::PriceBelowMinimum);
        }
        if tick.size > self.max_size {
            return Some(Rejection::SizeAboveMaximum);
        }

        // Sub-second precision counts: 16:00:00.000001 is past the close
        let time = tick.timestamp.time();
        if time < self.session_open || time > self.session_close {
            return Some(Rejection::OutsideSession);
        }
        None
    }

    /// Returns the tick as a [`CleanTick`] if it passes every rule.
    #[must_use]
    pub fn accept(&self, tick: &Tick) -> Option<CleanTick> {
        match self.rejection(tick) {
            Some(_) => None,
            None => tick.priced(),
        }
    }

    /// Filters ticks, preserving their order.
    #[must_use]
    pub fn clean(&self, ticks: &[Tick]) -> Vec<CleanTick> {
        ticks.iter().filter_map(|tick| self.accept(tick)).collect()
    }

    /// Filters ticks, preserving their order, and counts drops per rule.
    #[must_use]
    pub fn clean_with_stats(&self, ticks: &[Tick]) -> (Vec<CleanTick>, CleanStats) {
        let mut stats = CleanStats::default();
        let mut kept = Vec::with_capacity(ticks.len());

        for tick in ticks {
            match self.rejection(tick) {
                Some(reason) => stats.record(reason),
                None => {
                    if let Some(clean) = tick.priced() {
                        kept.push(clean);
                    }
                }
            }
        }

        stats.kept = kept.len();
        (kept, stats)
    }
}

/// Filters ticks with the default rules, preserving their order.
#[must_use]
pub fn clean(ticks: &[Tick]) -> Vec<CleanTick> {
    CleanFilter::default().clean(ticks)
}

/// Tick counts from a cleaning pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CleanStats {
    /// Ticks that passed.
    pub kept: usize,
    /// Ticks without a price.
    pub missing_price: usize,
    /// Ticks priced below the minimum.
    pub price_below_minimum: usize,
    /// Ticks sized above the maximum.
    pub size_above_maximum: usize,
    /// Ticks outside the trading session.
    pub outside_session: usize,
}

impl CleanStats {
    fn record(&mut self, reason: Rejection) {
        match reason {
            Rejection::MissingPrice => self.missing_price += 1,
            Rejection::PriceBelowMinimum => self.price_below_minimum += 1,
            Rejection::SizeAboveMaximum => self.size_above_maximum += 1,
            Rejection::OutsideSession => self.outside_session += 1,
        }
    }

    /// Returns the number of dropped ticks.
    #[must_use]
    pub const fn dropped(&self) -> usize {
        self.missing_price
            + self.price_below_minimum
            + self.size_above_maximum
            + self.outside_session
    }
}
