//! Reading OHLCV bars back from CSV output.

use csv_async::{AsyncReaderBuilder, StringRecord};
use futures::StreamExt;
use tickbars_aggregate::Ohlcv;
use tickbars_types::parse_timestamp;
use tokio::io::AsyncRead;

use crate::{CsvFormatter, FormatError};

/// Reads bars written by [`CsvFormatter`] with the same settings.
///
/// The header row is skipped.
///
/// # Errors
///
/// Returns an error if the input is not valid CSV or a row does not hold a
/// bar.
pub async fn read_ohlcv<R>(reader: R, formatter: &CsvFormatter) -> Result<Vec<Ohlcv>, FormatError>
where
    R: AsyncRead + Unpin + Send,
{
    let mut reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .delimiter(formatter.delimiter() as u8)
        .create_reader(reader);

    let mut bars = Vec::new();
    let mut records = reader.records();
    while let Some(record) = records.next().await {
        bars.push(parse_bar(&record?)?);
    }

    Ok(bars)
}

fn parse_bar(record: &StringRecord) -> Result<Ohlcv, FormatError> {
    let line = record.position().map_or(0, |position| position.line());

    let timestamp_field = field(record, line, 0)?;
    let timestamp = parse_timestamp(timestamp_field).map_err(|e| FormatError::Parse {
        line,
        message: format!("invalid timestamp '{timestamp_field}': {e}"),
    })?;
    let volume_field = field(record, line, 5)?;
    let volume = volume_field
        .parse::<u64>()
        .map_err(|e| FormatError::Parse {
            line,
            message: format!("invalid volume '{volume_field}': {e}"),
        })?;

    Ok(Ohlcv::new(
        timestamp,
        price(record, line, 1)?,
        price(record, line, 2)?,
        price(record, line, 3)?,
        price(record, line, 4)?,
        volume,
    ))
}

fn field(record: &StringRecord, line: u64, index: usize) -> Result<&str, FormatError> {
    record.get(index).ok_or_else(|| FormatError::Parse {
        line,
        message: format!("missing field {index}"),
    })
}

fn price(record: &StringRecord, line: u64, index: usize) -> Result<f64, FormatError> {
    let value = field(record, line, index)?;
    value.parse::<f64>().map_err(|e| FormatError::Parse {
        line,
        message: format!("invalid price '{value}': {e}"),
    })
}
