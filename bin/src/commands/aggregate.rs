//! Aggregate command implementation.
//!
//! Loads every tick file in a directory, cleans the ticks and writes OHLCV
//! bars covering the requested window.

use crate::display::{FilterArgs, Format, file_progress, parse_time, print_summary};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tickbars_lib::prelude::*;

/// Aggregate the ticks under `input` into bars written to `output`.
#[allow(clippy::too_many_arguments)]
pub(crate) async fn aggregate(
    input: PathBuf,
    output: PathBuf,
    start_str: &str,
    end_str: &str,
    interval: Interval,
    format: Format,
    filter: &FilterArgs,
    quiet: bool,
) -> Result<()> {
    let start = parse_time("start", start_str)?;
    let end = parse_time("end", end_str)?;
    let range = TimeRange::new(start, end)?;

    let config = RunConfig::new(input, output, range, interval)
        .with_filter(filter.to_filter())
        .with_format(format.into());
    let pipeline = Pipeline::new(config).with_progress(file_progress(quiet)?);

    let summary = pipeline
        .run()
        .await
        .with_context(|| format!("Aggregation with interval {interval} failed"))?;

    if !quiet {
        print_summary(&summary, &pipeline.config().output, "bars");
    }

    Ok(())
}
