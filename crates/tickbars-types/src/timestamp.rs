//! Naive timestamp parsing and formatting.

use chrono::NaiveDateTime;
use chrono::format::{DelayedFormat, StrftimeItems};

/// Timestamp format of source rows and output bars.
///
/// The fractional part is optional when parsing and omitted when formatting
/// a whole-second value.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Formats accepted for timestamps given on the command line.
const ARG_FORMATS: &[&str] = &[
    TIMESTAMP_FORMAT,
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

/// Parses a source row timestamp (`YYYY-MM-DD HH:MM:SS.ffffff`).
///
/// # Errors
///
/// Returns an error if the text does not match [`TIMESTAMP_FORMAT`].
pub fn parse_timestamp(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT)
}

/// Parses a user-supplied timestamp.
///
/// Accepts [`TIMESTAMP_FORMAT`], the same with a `T` separator, and both
/// forms without seconds.
///
/// # Errors
///
/// Returns the error of the last attempted format if none match.
pub fn parse_timestamp_arg(text: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let text = text.trim();
    ARG_FORMATS
        .iter()
        .skip(1)
        .fold(parse_timestamp(text), |parsed, format| {
            parsed.or_else(|_| NaiveDateTime::parse_from_str(text, format))
        })
}

/// Formats a timestamp with [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn format_timestamp(timestamp: &NaiveDateTime) -> DelayedFormat<StrftimeItems<'static>> {
    timestamp.format(TIMESTAMP_FORMAT)
}
