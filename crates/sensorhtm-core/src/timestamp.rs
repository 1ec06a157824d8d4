//! Timestamp normalization for stored points.
//!
//! The store returns RFC 3339-ish strings with either a fractional-seconds
//! part or a trailing `Z`. The model wants a plain `YYYY-MM-DDTHH:MM:SS`.

use chrono::NaiveDateTime;

use crate::config::defaults::DATE_FORMAT;
use crate::error::{Error, Result};

/// Strip the fractional-seconds or UTC suffix from a point timestamp.
///
/// Everything from the first `.` is dropped if one is present, otherwise
/// everything from the first `Z`.
pub fn strip_suffix(input: &str) -> &str {
    let marker = if input.contains('.') { '.' } else { 'Z' };
    input.split(marker).next().unwrap_or(input)
}

/// Parse a point timestamp into the instant handed to the model.
pub fn normalize_timestamp(input: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(strip_suffix(input), DATE_FORMAT).map_err(|source| {
        Error::TimestampParse {
            input: input.to_string(),
            source,
        }
    })
}
