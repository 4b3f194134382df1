//! JSON and NDJSON output.
//!
//! Timestamps are written as [`TIMESTAMP_FORMAT`] strings, the same text the
//! CSV output carries, so a bar reads identically in every format.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use tickbars_aggregate::Ohlcv;
use tickbars_types::{CleanTick, TIMESTAMP_FORMAT, format_timestamp, parse_timestamp};

use crate::{FormatError, Formatter};

/// JSON output style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonStyle {
    /// A single JSON array.
    #[default]
    Array,
    /// One object per line.
    Ndjson,
}

/// One bar as it appears in JSON.
#[derive(Debug, Serialize, Deserialize)]
struct BarRecord {
    timestamp: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: u64,
}

impl From<&Ohlcv> for BarRecord {
    fn from(bar: &Ohlcv) -> Self {
        Self {
            timestamp: format_timestamp(&bar.timestamp).to_string(),
            open: bar.open,
            high: bar.high,
            low: bar.low,
            close: bar.close,
            volume: bar.volume,
        }
    }
}

impl BarRecord {
    /// Converts back into a bar; `record` is the 1-based position in the input.
    fn into_bar(self, record: u64) -> Result<Ohlcv, FormatError> {
        let timestamp = parse_timestamp(&self.timestamp).map_err(|e| FormatError::Parse {
            line: record,
            message: format!(
                "invalid timestamp '{}', expected {TIMESTAMP_FORMAT}: {e}",
                self.timestamp
            ),
        })?;
        Ok(Ohlcv::new(
            timestamp,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        ))
    }
}

/// One cleaned tick as it appears in JSON.
#[derive(Debug, Serialize)]
struct TickRecord {
    timestamp: String,
    price: f64,
    size: u64,
}

impl From<&CleanTick> for TickRecord {
    fn from(tick: &CleanTick) -> Self {
        Self {
            timestamp: format_timestamp(&tick.timestamp).to_string(),
            price: tick.price,
            size: tick.size,
        }
    }
}

/// JSON formatter.
#[derive(Debug, Clone, Default)]
pub struct JsonFormatter {
    style: JsonStyle,
}

impl JsonFormatter {
    /// Creates a formatter that writes one JSON array.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            style: JsonStyle::Array,
        }
    }

    /// Creates a formatter that writes one object per line.
    #[must_use]
    pub const fn ndjson() -> Self {
        Self {
            style: JsonStyle::Ndjson,
        }
    }

    /// Returns the output style.
    #[must_use]
    pub const fn style(&self) -> JsonStyle {
        self.style
    }

    /// Reads bars written by this formatter.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is not valid JSON of this style or a
    /// timestamp does not match [`TIMESTAMP_FORMAT`]. Parse errors report the
    /// 1-based record number.
    pub fn read_ohlcv<R: Read>(&self, reader: R) -> Result<Vec<Ohlcv>, FormatError> {
        let records: Vec<BarRecord> = match self.style {
            JsonStyle::Array => serde_json::from_reader(reader)?,
            JsonStyle::Ndjson => serde_json::Deserializer::from_reader(reader)
                .into_iter::<BarRecord>()
                .collect::<Result<_, _>>()?,
        };

        records
            .into_iter()
            .zip(1..)
            .map(|(record, position)| record.into_bar(position))
            .collect()
    }

    fn write_records<T, W>(&self, records: &[T], mut writer: W) -> Result<(), FormatError>
    where
        T: Serialize,
        W: Write,
    {
        match self.style {
            JsonStyle::Array => {
                serde_json::to_writer(&mut writer, records)?;
                writeln!(writer)?;
            }
            JsonStyle::Ndjson => {
                for record in records {
                    serde_json::to_writer(&mut writer, record)?;
                    writeln!(writer)?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }
}

impl Formatter for JsonFormatter {
    fn write_ticks<W: Write + Send>(
        &self,
        ticks: &[CleanTick],
        writer: W,
    ) -> Result<(), FormatError> {
        let records: Vec<TickRecord> = ticks.iter().map(TickRecord::from).collect();
        self.write_records(&records, writer)
    }

    fn write_ohlcv<W: Write + Send>(&self, bars: &[Ohlcv], writer: W) -> Result<(), FormatError> {
        let records: Vec<BarRecord> = bars.iter().map(BarRecord::from).collect();
        self.write_records(&records, writer)
    }

    fn extension(&self) -> &str {
        match self.style {
            JsonStyle::Array => "json",
            JsonStyle::Ndjson => "ndjson",
        }
    }
}
