//! Line classifiers for bulletin sections
//!
//! Header lines are recognized by their verbatim captions; data lines by
//! regular expressions anchored at the start of the line. The patterns are
//! compiled once per process.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{
    ARRIVAL_DATA_PATTERN, ARRIVAL_HEADER_CAPTION, EVENT_HEADER_MARKER, MAGNITUDE_DATA_PATTERN,
    MAGNITUDE_HEADER_CAPTION, ORIGIN_DATA_PATTERN, ORIGIN_HEADER_CAPTION,
};

static ORIGIN_DATA: Lazy<Regex> =
    Lazy::new(|| Regex::new(ORIGIN_DATA_PATTERN).expect("origin data regex to compile"));

static MAGNITUDE_DATA: Lazy<Regex> =
    Lazy::new(|| Regex::new(MAGNITUDE_DATA_PATTERN).expect("magnitude data regex to compile"));

static ARRIVAL_DATA: Lazy<Regex> =
    Lazy::new(|| Regex::new(ARRIVAL_DATA_PATTERN).expect("arrival data regex to compile"));

pub fn is_event_header(line: &str) -> bool {
    line.contains(EVENT_HEADER_MARKER)
}

pub fn is_origin_header(line: &str) -> bool {
    line.contains(ORIGIN_HEADER_CAPTION)
}

/// Date-anchored origin row, e.g. `2016/12/07 02:11:31.47   0.33 ...`
pub fn is_origin_data(line: &str) -> bool {
    ORIGIN_DATA.is_match(line)
}

pub fn is_magnitude_header(line: &str) -> bool {
    line.contains(MAGNITUDE_HEADER_CAPTION)
}

/// Magnitude row, e.g. `ml   2.5  0.25     8 dbevproc        13`
pub fn is_magnitude_data(line: &str) -> bool {
    MAGNITUDE_DATA.is_match(line)
}

pub fn is_arrival_header(line: &str) -> bool {
    line.contains(ARRIVAL_HEADER_CAPTION)
}

/// Station phase row, e.g. `PDG     0.64 110.0 P        02:11:43.144  -0.6 ...`
pub fn is_arrival_data(line: &str) -> bool {
    ARRIVAL_DATA.is_match(line)
}
