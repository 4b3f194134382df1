//! End-to-end run: discover, load, clean, aggregate, write.

use std::{fs::File, io::BufWriter, path::PathBuf, pin::pin};

use futures::StreamExt;
use indicatif::ProgressBar;
use thiserror::Error;
use tickbars_aggregate::{AggregateError, BucketAggregator};
use tickbars_clean::CleanFilter;
use tickbars_format::{FormatError, OutputFormat};
use tickbars_source::{discover_csv_files, source_stream};
use tickbars_types::{CleanTick, Interval, Tick, TimeRange};
use tracing::{debug, info, warn};

/// Settings for one pipeline run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory scanned for `.csv` tick files.
    pub input_dir: PathBuf,
    /// File the output is written to, replacing any existing content.
    pub output: PathBuf,
    /// Half-open window the bars cover.
    pub range: TimeRange,
    /// Bar width.
    pub interval: Interval,
    /// Tick sanity and trading-hours rules.
    pub filter: CleanFilter,
    /// Output file format.
    pub format: OutputFormat,
}

impl RunConfig {
    /// Creates a config with the default filter and CSV output.
    #[must_use]
    pub fn new(
        input_dir: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
        range: TimeRange,
        interval: Interval,
    ) -> Self {
        Self {
            input_dir: input_dir.into(),
            output: output.into(),
            range,
            interval,
            filter: CleanFilter::default(),
            format: OutputFormat::default(),
        }
    }

    /// Sets the tick filter.
    #[must_use]
    pub fn with_filter(mut self, filter: CleanFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Counts gathered during a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Files read successfully.
    pub files_loaded: usize,
    /// Files that failed to load and contributed nothing.
    pub files_skipped: usize,
    /// Ticks loaded before cleaning.
    pub raw_ticks: usize,
    /// Ticks that survived cleaning.
    pub clean_ticks: usize,
    /// Buckets in the time range, empty ones included.
    pub buckets: usize,
    /// Rows written to the output file.
    pub rows_written: usize,
}

/// Errors that abort a run.
///
/// A single unreadable source file is not one of them: it is logged and
/// counted in [`RunSummary::files_skipped`].
#[derive(Error, Debug)]
pub enum PipelineError {
    /// The input directory could not be listed.
    #[error("Failed to list input directory '{}': {source}", path.display())]
    ListDir {
        /// The input directory.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The bar width is unusable.
    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// The output file could not be created.
    #[error("Failed to create output file '{}': {source}", path.display())]
    CreateOutput {
        /// The output file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Writing the output failed.
    #[error("Failed to write output file '{}': {source}", path.display())]
    Write {
        /// The output file.
        path: PathBuf,
        /// Underlying format error.
        source: FormatError,
    },
}

/// Runs the load, clean, aggregate and write stages for one config.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: RunConfig,
    progress: ProgressBar,
}

impl Pipeline {
    /// Creates a pipeline with no progress display.
    #[must_use]
    pub fn new(config: RunConfig) -> Self {
        Self {
            config,
            progress: ProgressBar::hidden(),
        }
    }

    /// Reports file loading on `progress`, one step per source file.
    #[must_use]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    /// Returns the run settings.
    #[must_use]
    pub const fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Aggregates every source file into bars and writes them out.
    ///
    /// The output always gets a header, even when no bar has data.
    ///
    /// # Errors
    ///
    /// Returns an error if the interval is zero or too large, the input
    /// directory cannot be listed, or the output cannot be written. The
    /// interval is checked before anything is read or written.
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let aggregator = BucketAggregator::new(self.config.range, self.config.interval)?;

        let (ticks, mut summary) = self.load().await?;
        let clean = self.clean(&ticks, &mut summary);
        drop(ticks);

        let bars = aggregator.aggregate(&clean);
        summary.buckets = aggregator.bucket_count();
        info!(
            bars = bars.len(),
            buckets = summary.buckets,
            start = %self.config.range.start,
            end = %self.config.range.end,
            interval = %self.config.interval,
            "Aggregated bars"
        );

        self.write(|format, writer| format.write_ohlcv(&bars, writer))?;
        summary.rows_written = bars.len();
        Ok(summary)
    }

    /// Writes the cleaned ticks without aggregating them.
    ///
    /// Ticks are written in load order; the time range and interval are not
    /// consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the input directory cannot be listed or the
    /// output cannot be written.
    pub async fn clean_only(&self) -> Result<RunSummary, PipelineError> {
        let (ticks, mut summary) = self.load().await?;
        let clean = self.clean(&ticks, &mut summary);

        self.write(|format, writer| format.write_ticks(&clean, writer))?;
        summary.rows_written = clean.len();
        Ok(summary)
    }

    async fn load(&self) -> Result<(Vec<Tick>, RunSummary), PipelineError> {
        let dir = &self.config.input_dir;
        let files = discover_csv_files(dir)
            .await
            .map_err(|source| PipelineError::ListDir {
                path: dir.clone(),
                source,
            })?;

        if files.is_empty() {
            warn!(dir = %dir.display(), "No CSV files found");
        } else {
            info!(dir = %dir.display(), files = files.len(), "Loading tick files");
        }
        self.progress.set_length(files.len() as u64);

        let mut summary = RunSummary::default();
        let mut ticks = Vec::new();
        let mut batches = pin!(source_stream(files));
        while let Some(mut batch) = batches.next().await {
            if batch.had_error() {
                summary.files_skipped += 1;
            } else {
                summary.files_loaded += 1;
                ticks.append(&mut batch.ticks);
            }
            self.progress.inc(1);
        }
        self.progress.finish_and_clear();

        summary.raw_ticks = ticks.len();
        info!(
            files = summary.files_loaded,
            skipped = summary.files_skipped,
            ticks = summary.raw_ticks,
            "Loaded ticks"
        );
        Ok((ticks, summary))
    }

    fn clean(&self, ticks: &[Tick], summary: &mut RunSummary) -> Vec<CleanTick> {
        let (clean, stats) = self.config.filter.clean_with_stats(ticks);
        debug!(
            missing_price = stats.missing_price,
            price_below_minimum = stats.price_below_minimum,
            size_above_maximum = stats.size_above_maximum,
            outside_session = stats.outside_session,
            "Dropped ticks by rule"
        );
        info!(kept = stats.kept, dropped = stats.dropped(), "Cleaned ticks");
        summary.clean_ticks = clean.len();
        clean
    }

    fn write<F>(&self, write: F) -> Result<(), PipelineError>
    where
        F: FnOnce(OutputFormat, BufWriter<File>) -> Result<(), FormatError>,
    {
        let path = &self.config.output;
        let file = File::create(path).map_err(|source| PipelineError::CreateOutput {
            path: path.clone(),
            source,
        })?;

        write(self.config.format, BufWriter::new(file)).map_err(|source| {
            PipelineError::Write {
                path: path.clone(),
                source,
            }
        })?;

        info!(path = %path.display(), format = %self.config.format, "Wrote output");
        Ok(())
    }
}
