//! Core types for the tickbars OHLCV aggregator.
//!
//! This crate provides the fundamental data structures used throughout tickbars:
//!
//! - [`Tick`] - A raw trade record with timestamp, optional price and size
//! - [`CleanTick`] - A trade record that passed cleaning and always has a price
//! - [`Interval`] - Bucket width parsed from the `1d2h30m15s` mini-language
//! - [`TimeRange`] - Aggregation window and its bucket iterator

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod interval;
mod tick;
mod time_range;
mod timestamp;

pub use error::{IntervalError, TimeRangeError};
pub use interval::Interval;
pub use tick::{CleanTick, Tick};
pub use time_range::{Buckets, TimeRange};
pub use timestamp::{TIMESTAMP_FORMAT, format_timestamp, parse_timestamp, parse_timestamp_arg};
