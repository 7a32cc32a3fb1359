//! Field extraction utilities for fixed-width bulletin lines
//!
//! This module slices lines at column ranges and coerces the slices into
//! typed values. Strict coercion is reserved for columns whose shape the line
//! classifier already guarantees; everything else degrades to
//! [`FieldValue::Raw`] or absence instead of failing.

use std::ops::Range;
use std::str::FromStr;

use super::Line;
use crate::error::{RebError, Result};
use crate::models::FieldValue;

/// Return the trimmed text between two columns
///
/// Right-truncated lines yield whatever part of the range exists, possibly an
/// empty string. Lines with non-ASCII text are sliced by character position.
pub fn column<'a>(text: &'a str, range: Range<usize>) -> &'a str {
    if text.is_ascii() {
        let end = range.end.min(text.len());
        if range.start >= end {
            return "";
        }
        return text[range.start..end].trim();
    }

    let mut indices = text.char_indices().map(|(index, _)| index).chain([text.len()]);
    let start = indices.nth(range.start);
    let end = match range.end.checked_sub(range.start + 1) {
        Some(remaining) => indices.nth(remaining).unwrap_or(text.len()),
        None => return "",
    };

    match start {
        Some(start) if start < end => text[start..end].trim(),
        _ => "",
    }
}

/// Parse a column that must hold a well-formed value
pub fn parse_required<T>(line: &Line<'_>, range: Range<usize>, field: &'static str) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let value = column(line.text, range);
    value.parse::<T>().map_err(|e| {
        RebError::malformed_field(line.number, field, value, line.text, e)
    })
}

/// Parse a volatile column without failing
pub fn parse_volatile<T: FromStr>(line: &Line<'_>, range: Range<usize>) -> FieldValue<T> {
    FieldValue::from_column(column(line.text, range))
}

/// Get an optional text column, treating blanks as absent
pub fn optional_text(line: &Line<'_>, range: Range<usize>) -> Option<String> {
    let value = column(line.text, range);
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Turn a fractional-second string into microseconds by right padding
///
/// `"47"` with padding `"0000"` becomes 470000 and `"144"` with `"000"`
/// becomes 144000, matching the precision of the printed columns.
pub fn fraction_to_micros(line: &Line<'_>, fraction: &str, padding: &str) -> Result<u32> {
    let padded = format!("{fraction}{padding}");
    let micros = padded.parse::<u32>().map_err(|e| {
        RebError::malformed_field(line.number, "fractional_seconds", fraction, line.text, e)
    })?;

    if micros >= 1_000_000 {
        return Err(RebError::malformed_field(
            line.number,
            "fractional_seconds",
            fraction,
            line.text,
            "more than six digits of precision",
        ));
    }

    Ok(micros)
}
