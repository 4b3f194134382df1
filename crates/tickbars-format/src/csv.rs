//! CSV output format.

use std::io::Write;
use tickbars_aggregate::Ohlcv;
use tickbars_types::{CleanTick, format_timestamp};

use crate::{FormatError, Formatter};

/// Column names of the OHLCV output.
const OHLCV_COLUMNS: [&str; 6] = ["Timestamp", "Open", "High", "Low", "Close", "Volume"];

/// Column names of the cleaned tick output.
const TICK_COLUMNS: [&str; 3] = ["Timestamp", "Price", "Size"];

/// CSV formatter.
///
/// Prices are written in the shortest form that parses back to the same
/// value; timestamps carry a fractional part only when it is non-zero.
#[derive(Debug, Clone)]
pub struct CsvFormatter {
    /// Field delimiter (default: comma).
    delimiter: char,
}

impl Default for CsvFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl CsvFormatter {
    /// Creates a new CSV formatter with default settings.
    #[must_use]
    pub const fn new() -> Self {
        Self { delimiter: ',' }
    }

    /// Creates a tab-separated values (TSV) formatter.
    #[must_use]
    pub const fn tsv() -> Self {
        Self { delimiter: '\t' }
    }

    /// Returns the field delimiter.
    #[must_use]
    pub const fn delimiter(&self) -> char {
        self.delimiter
    }

    fn write_header<W: Write>(&self, writer: &mut W, columns: &[&str]) -> std::io::Result<()> {
        let mut delimiter = [0u8; 4];
        let delimiter = self.delimiter.encode_utf8(&mut delimiter);
        writeln!(writer, "{}", columns.join(&*delimiter))
    }
}

impl Formatter for CsvFormatter {
    fn write_ticks<W: Write + Send>(
        &self,
        ticks: &[CleanTick],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;
        self.write_header(&mut writer, &TICK_COLUMNS)?;

        for tick in ticks {
            writeln!(
                writer,
                "{}{d}{}{d}{}",
                format_timestamp(&tick.timestamp),
                tick.price,
                tick.size
            )?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_ohlcv<W: Write + Send>(
        &self,
        bars: &[Ohlcv],
        mut writer: W,
    ) -> Result<(), FormatError> {
        let d = self.delimiter;
        self.write_header(&mut writer, &OHLCV_COLUMNS)?;

        for bar in bars {
            writeln!(
                writer,
                "{}{d}{}{d}{}{d}{}{d}{}{d}{}",
                format_timestamp(&bar.timestamp),
                bar.open,
                bar.high,
                bar.low,
                bar.close,
                bar.volume
            )?;
        }

        writer.flush()?;
        Ok(())
    }

    fn extension(&self) -> &str {
        if self.delimiter == '\t' { "tsv" } else { "csv" }
    }
}
