//! Display utilities and argument conversion for the tickbars CLI.

use anyhow::{Context, Result};
use chrono::{NaiveDateTime, NaiveTime};
use clap::{Args, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use tickbars_lib::prelude::*;

/// Output format for written data.
#[derive(Clone, Copy, ValueEnum)]
pub(crate) enum Format {
    Csv,
    Tsv,
    Json,
    Ndjson,
}

impl From<Format> for OutputFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Csv => Self::Csv,
            Format::Tsv => Self::Tsv,
            Format::Json => Self::Json,
            Format::Ndjson => Self::Ndjson,
        }
    }
}

/// Tick cleaning rules shared by the subcommands.
#[derive(Args)]
pub(crate) struct FilterArgs {
    /// Drop ticks priced below this
    #[arg(long, default_value_t = tickbars_lib::DEFAULT_MIN_PRICE)]
    min_price: f64,

    /// Drop ticks larger than this
    #[arg(long, default_value_t = tickbars_lib::DEFAULT_MAX_SIZE)]
    max_size: u64,

    /// Session open time of day (HH:MM:SS), inclusive
    #[arg(long, default_value = "09:30:00")]
    session_open: NaiveTime,

    /// Session close time of day (HH:MM:SS), inclusive
    #[arg(long, default_value = "16:00:00")]
    session_close: NaiveTime,
}

impl FilterArgs {
    /// Builds the filter these flags describe.
    pub(crate) fn to_filter(&self) -> CleanFilter {
        CleanFilter::new()
            .with_min_price(self.min_price)
            .with_max_size(self.max_size)
            .with_session(self.session_open, self.session_close)
    }
}

/// Parse a command-line timestamp.
pub(crate) fn parse_time(flag: &str, text: &str) -> Result<NaiveDateTime> {
    parse_timestamp_arg(text).with_context(|| format!("Invalid {flag} time: {text}"))
}

/// Create the file-loading progress bar, hidden in quiet mode.
pub(crate) fn file_progress(quiet: bool) -> Result<ProgressBar> {
    if quiet {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::no_length();
    pb.set_style(
        ProgressStyle::default_bar()
            .template(concat!(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] ",
                "{pos}/{len} files ({percent}%) {msg}",
            ))
            .context("Invalid progress template")?
            .progress_chars("=>-"),
    );
    Ok(pb)
}

/// Print what a run did.
pub(crate) fn print_summary(summary: &RunSummary, output: &std::path::Path, rows: &str) {
    println!(
        "Loaded {} ticks from {} files, kept {}",
        summary.raw_ticks, summary.files_loaded, summary.clean_ticks
    );
    if summary.files_skipped > 0 {
        println!("Skipped {} files due to errors", summary.files_skipped);
    }
    println!("Wrote {} {rows} to: {}", summary.rows_written, output.display());
}
