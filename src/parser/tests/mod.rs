//! Test utilities and fixtures for REB bulletin parser testing
//!
//! Column positions in the fixture lines are significant; edit them with a
//! fixed-width editor or not at all.

use std::io::Write;
use tempfile::NamedTempFile;

use super::Line;
use crate::constants::{ARRIVAL_HEADER_CAPTION, MAGNITUDE_HEADER_CAPTION, ORIGIN_HEADER_CAPTION};

mod stats_tests;

pub const EVENT_HEADER_LINE: &str = "Antelope Linux_a2  REB - Event       12  Transilvania, judetul Alba                                      Op: Daniel Paulescu";

pub const ORIGIN_LINE: &str = "2016/12/07 02:11:31.47   0.33  0.60  42.6517   18.4457   3.4   2.3 110   5.0f  0.0   21   11 156   0.64   5.50 m i ke NIEP:rt m       13";

pub const MAGNITUDE_LINE: &str = "ml   2.5  0.25     8 dbevproc        13";

/// Magnitude with a blank error column
pub const SECOND_MAGNITUDE_LINE: &str = "mb   3.1           5 IDC           13";

pub const P_ARRIVAL_LINE: &str = "PDG     0.64 110.0 P        02:11:43.144  -0.6                           T__             0.3       mc_ ml      2.4       11";

pub const S_ARRIVAL_LINE: &str = "VOIR    1.52 45.30 S        02:11:58.020  -0.6                           T__             0.3       mc_ ml      2.4       12";

/// Regional phase, consumed but not kept
pub const PN_ARRIVAL_LINE: &str = "BZS     0.64 110.0 Pn       02:11:43.144  -0.6                           T__             0.3       mc_ ml      2.4       11";

/// Complete single-event bulletin with blank separator lines
pub fn sample_bulletin() -> String {
    [
        EVENT_HEADER_LINE,
        "",
        ORIGIN_HEADER_CAPTION,
        ORIGIN_LINE,
        "",
        MAGNITUDE_HEADER_CAPTION,
        MAGNITUDE_LINE,
        SECOND_MAGNITUDE_LINE,
        "",
        ARRIVAL_HEADER_CAPTION,
        P_ARRIVAL_LINE,
        PN_ARRIVAL_LINE,
        S_ARRIVAL_LINE,
        "",
    ]
    .join("\n")
}

/// Bulletin assembled from the given lines, one per row
pub fn bulletin_from(lines: &[&str]) -> String {
    lines.join("\n")
}

/// Wrap fixture text as the first line of a buffer
pub fn line(text: &str) -> Line<'_> {
    Line::new(1, text)
}

/// Helper to create a temporary bulletin file with given content
pub fn create_temp_bulletin(content: &str) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    write!(temp_file, "{}", content).unwrap();
    temp_file
}

/// UTC instant built from calendar parts, for comparing parsed times
pub fn utc(
    (year, month, day): (i32, u32, u32),
    (hour, minute, second, micros): (u32, u32, u32, u32),
) -> chrono::DateTime<chrono::Utc> {
    chrono::NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_micro_opt(hour, minute, second, micros))
        .unwrap()
        .and_utc()
}
