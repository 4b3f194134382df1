//! Output formatters for the tickbars OHLCV aggregator.
//!
//! This crate provides formatters for writing cleaned tick and OHLCV data
//! to various output formats:
//!
//! - [`CsvFormatter`] - CSV (or TSV) format
//! - [`JsonFormatter`] - JSON array or NDJSON format
//! - [`read_ohlcv`] - Reads bars back from CSV output

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod csv;
mod formatter;
mod reader;

#[cfg(feature = "json")]
mod json;

pub use crate::csv::CsvFormatter;
pub use formatter::{FormatError, Formatter, OutputFormat};
pub use reader::read_ohlcv;

#[cfg(feature = "json")]
pub use json::{JsonFormatter, JsonStyle};
