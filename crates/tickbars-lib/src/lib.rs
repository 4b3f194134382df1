//! Tick cleaning and OHLCV bar aggregation from CSV trade files.
//!
//! This is a facade crate that re-exports functionality from the tickbars
//! workspace crates and adds the [`Pipeline`] that runs them end to end.
//!
//! # Quick Start
//!
//! ```ignore
//! use tickbars_lib::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let range = TimeRange::new(
//!         parse_timestamp_arg("2024-09-16 09:30")?,
//!         parse_timestamp_arg("2024-09-16 16:00")?,
//!     )?;
//!     let config = RunConfig::new("data", "ohlcv_output.csv", range, Interval::parse("1h"));
//!
//!     let summary = Pipeline::new(config).run().await?;
//!     println!("Wrote {} bars", summary.rows_written);
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/tickbars/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod pipeline;

pub use pipeline::{Pipeline, PipelineError, RunConfig, RunSummary};

// Re-export core types
pub use tickbars_types::*;

// Re-export cleaning
pub use tickbars_clean::{
    CleanFilter, CleanStats, DEFAULT_MAX_SIZE, DEFAULT_MIN_PRICE, Rejection, clean,
};

// Re-export aggregation
pub use tickbars_aggregate::{AggregateError, BucketAggregator, Ohlcv, aggregate};

// Re-export source loading
pub use tickbars_source::{
    SourceBatch, SourceError, discover_csv_files, load_files, read_ticks, source_stream,
};

// Re-export formatters
pub use tickbars_format::{CsvFormatter, FormatError, Formatter, OutputFormat, read_ohlcv};

#[cfg(feature = "json")]
pub use tickbars_format::{JsonFormatter, JsonStyle};

/// Prelude module for convenient imports.
///
/// ```
/// use tickbars_lib::prelude::*;
/// ```
pub mod prelude {
    pub use tickbars_types::{
        CleanTick, Interval, IntervalError, Tick, TimeRange, TimeRangeError, parse_timestamp_arg,
    };

    pub use tickbars_clean::CleanFilter;

    pub use tickbars_aggregate::{BucketAggregator, Ohlcv};

    pub use tickbars_format::{CsvFormatter, Formatter, OutputFormat};

    pub use crate::{Pipeline, PipelineError, RunConfig, RunSummary};
}
