//! CSV tick file parsing.

use std::path::Path;

use csv_async::{AsyncReaderBuilder, StringRecord};
use futures::StreamExt;
use tickbars_types::{Tick, parse_timestamp};

use crate::SourceError;

/// Number of leading fields used from each row.
const FIELD_COUNT: usize = 3;

/// Reads every tick from a source file.
///
/// The first row is a header and is skipped without validation. Blank rows
/// are skipped. Extra fields after `timestamp,price,size` are ignored.
///
/// # Errors
///
/// Returns the first error encountered. Ticks parsed before the error are
/// discarded along with the rest of the file.
pub async fn read_ticks(path: &Path) -> Result<Vec<Tick>, SourceError> {
    let file = tokio::fs::File::open(path).await?;
    let mut reader = AsyncReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .create_reader(file);

    let mut ticks = Vec::new();
    let mut records = reader.records();
    while let Some(record) = records.next().await {
        if let Some(tick) = parse_record(&record?)? {
            ticks.push(tick);
        }
    }

    Ok(ticks)
}

/// Parses one row into a tick, or `None` for a row without fields.
fn parse_record(record: &StringRecord) -> Result<Option<Tick>, SourceError> {
    if record.is_empty() {
        return Ok(None);
    }

    let line = record.position().map_or(0, |position| position.line());
    if record.len() < FIELD_COUNT {
        return Err(SourceError::MissingField {
            line,
            expected: FIELD_COUNT,
            found: record.len(),
        });
    }

    let timestamp_field = &record[0];
    let timestamp =
        parse_timestamp(timestamp_field).map_err(|source| SourceError::Timestamp {
            line,
            value: timestamp_field.to_string(),
            source,
        })?;

    let price_field = record[1].trim();
    let price = if price_field.is_empty() {
        None
    } else {
        Some(
            price_field
                .parse::<f64>()
                .map_err(|source| SourceError::Price {
                    line,
                    value: price_field.to_string(),
                    source,
                })?,
        )
    };

    let size_field = record[2].trim();
    let size = if size_field.is_empty() {
        0
    } else {
        size_field
            .parse::<u64>()
            .map_err(|source| SourceError::Size {
                line,
                value: size_field.to_string(),
                source,
            })?
    };

    Ok(Some(Tick::new(timestamp, price, size)))
}
