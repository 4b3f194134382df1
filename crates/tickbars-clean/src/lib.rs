//! Tick sanity and trading-hours filtering for tickbars.
//!
//! - [`CleanFilter`] - Configurable validity rules
//! - [`clean`] - Filters ticks with the default rules
//! - [`CleanStats`] - Per-rule drop counts

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod filter;

pub use filter::{CleanFilter, CleanStats, DEFAULT_MAX_SIZE, DEFAULT_MIN_PRICE, Rejection, clean};
