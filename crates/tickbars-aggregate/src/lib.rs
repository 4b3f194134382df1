//! Fixed-width OHLCV bucketing for tickbars.
//!
//! This crate provides tick-to-OHLCV (candlestick) aggregation:
//!
//! - [`Ohlcv`] - OHLCV bar data structure
//! - [`BucketAggregator`] - Buckets a cleaned tick series over a time range
//! - [`aggregate`] - One-shot aggregation helper

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod aggregator;
mod ohlcv;

pub use aggregator::{AggregateError, BucketAggregator, aggregate};
pub use ohlcv::Ohlcv;
