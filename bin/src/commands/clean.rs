//! Clean command implementation.

use crate::display::{FilterArgs, Format, file_progress, print_summary};
use anyhow::{Context, Result};
use std::path::PathBuf;
use tickbars_lib::prelude::*;

/// Write the ticks under `input` that pass the filter to `output`.
pub(crate) async fn clean(
    input: PathBuf,
    output: PathBuf,
    format: Format,
    filter: &FilterArgs,
    quiet: bool,
) -> Result<()> {
    // Range and interval are not consulted when only cleaning
    let config = RunConfig::new(input, output, TimeRange::default(), Interval::default())
        .with_filter(filter.to_filter())
        .with_format(format.into());
    let pipeline = Pipeline::new(config).with_progress(file_progress(quiet)?);

    let summary = pipeline.clean_only().await.context("Cleaning failed")?;

    if !quiet {
        print_summary(&summary, &pipeline.config().output, "ticks");
    }

    Ok(())
}
