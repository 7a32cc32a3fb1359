//! Format constants for REB bulletins
//!
//! The bulletin layout is fixed-width by contract with the producing system.
//! Captions, data patterns and column ranges below are the de facto wire
//! format and change together with [`REB_FORMAT_VERSION`].

use std::ops::Range;

/// Version of the column layout encoded in this module
pub const REB_FORMAT_VERSION: &str = "reb-1";

// =============================================================================
// Section Captions
// =============================================================================

/// Marker identifying the event header line
pub const EVENT_HEADER_MARKER: &str = "REB - Event";

/// Separator between the id/region block and the operator name
pub const OPERATOR_MARKER: &str = "Op: ";

/// Column caption line introducing the origin table
pub const ORIGIN_HEADER_CAPTION: &str = "Date          Time        Err   RMS Latitude Longitude  Smaj  Smin  Az Depth   Err Ndef Nsta Gap  mdist  Mdist Qual   Author      OrigID";

/// Column caption line introducing the magnitude table
pub const MAGNITUDE_HEADER_CAPTION: &str = "Magnitude   Err Nsta Author      OrigID";

/// Column caption line introducing the arrival table
pub const ARRIVAL_HEADER_CAPTION: &str = "Sta     Dist  EvAz Phase        Time      TRes  Azim AzRes   Slow   SRes Def   SNR       Amp   Per Qual Magnitude    ArrID";

// =============================================================================
// Data Line Patterns
// =============================================================================

/// `YYYY/MM/DD HH:MM:SS.CC` followed by whitespace
pub const ORIGIN_DATA_PATTERN: &str = r"^\d{4}/\d{2}/\d{2} \d{2}:\d{2}:\d{2}\.\d{2}\s+";

/// Magnitude type, value, optional error, station count, remainder
pub const MAGNITUDE_DATA_PATTERN: &str = r"^[a-z]{2}\s+([\d\.]+)\s+([\d\.]+\s+)?[0-9]+\s+.*";

/// Station, distance, azimuth, phase family token and `HH:MM:SS.mmm`
pub const ARRIVAL_DATA_PATTERN: &str =
    r"^[A-Z\d]+\s+([\d\.]+)\s+([\d\.]+)\s+[PS\{\}nmb]+\s+\d{2}:\d{2}:\d{2}\.\d{3}.*";

// =============================================================================
// Time Reconstruction
// =============================================================================

/// Right padding turning origin hundredths of a second into microseconds
pub const ORIGIN_FRACTION_PADDING: &str = "0000";

/// Right padding turning arrival milliseconds into microseconds
pub const ARRIVAL_FRACTION_PADDING: &str = "000";

/// Phase codes whose arrivals are timed and kept
pub const TIMED_PHASES: &[&str] = &["P", "S"];

/// Origin gap value used until a data line overwrites it
pub const DEFAULT_GAP: u32 = 98;

// =============================================================================
// Column Ranges
// =============================================================================

/// Column ranges of the origin data line
pub mod origin_columns {
    use super::Range;

    pub const DATE_TIME: Range<usize> = 0..22;
    pub const YEAR: Range<usize> = 0..4;
    pub const MONTH: Range<usize> = 5..7;
    pub const DAY: Range<usize> = 8..10;
    pub const HOUR: Range<usize> = 11..13;
    pub const MINUTE: Range<usize> = 14..16;
    pub const SECOND: Range<usize> = 17..19;
    pub const HUNDREDTHS: Range<usize> = 20..22;
    pub const TIME_ERROR: Range<usize> = 22..30;
    pub const RMS: Range<usize> = 30..36;
    pub const LATITUDE: Range<usize> = 36..44;
    pub const LONGITUDE: Range<usize> = 44..54;
    pub const SEMI_MAJOR_AXIS: Range<usize> = 54..61;
    pub const SEMI_MINOR_AXIS: Range<usize> = 61..66;
    pub const AZIMUTH: Range<usize> = 66..70;
    pub const DEPTH: Range<usize> = 70..76;
    /// Also carries the fixed-depth flag printed right after the depth
    pub const DEPTH_ERROR: Range<usize> = 76..82;
    pub const NUM_DEFINING_PHASES: Range<usize> = 82..87;
    pub const NUM_STATIONS: Range<usize> = 87..92;
    pub const GAP: Range<usize> = 92..96;
    /// Lowercase `mdist` column
    pub const MIN_DISTANCE_RAW: Range<usize> = 96..103;
    /// Capitalised `Mdist` column
    pub const MIN_DISTANCE: Range<usize> = 103..110;
    pub const QUALITY: Range<usize> = 110..117;
    pub const AUTHOR: Range<usize> = 117..129;
    pub const ORIGIN_ID: Range<usize> = 129..usize::MAX;
}

/// Column ranges of the magnitude data line
pub mod magnitude_columns {
    use super::Range;

    pub const TYPE: Range<usize> = 0..2;
    pub const VALUE: Range<usize> = 2..10;
    pub const ERROR: Range<usize> = 10..16;
    pub const NUM_STATIONS: Range<usize> = 16..20;
    pub const AUTHOR: Range<usize> = 20..31;
    pub const ORIGIN_ID: Range<usize> = 31..usize::MAX;
}

/// Column ranges of the arrival data line
pub mod arrival_columns {
    use super::Range;

    pub const STATION: Range<usize> = 0..5;
    pub const DISTANCE: Range<usize> = 5..12;
    pub const EVENT_AZIMUTH: Range<usize> = 12..18;
    pub const PHASE: Range<usize> = 19..28;
    pub const TIME: Range<usize> = 28..40;
    pub const TIME_RESIDUAL: Range<usize> = 40..46;
    pub const AZIMUTH: Range<usize> = 46..52;
    pub const AZIMUTH_RESIDUAL: Range<usize> = 52..58;
    pub const SLOWNESS: Range<usize> = 58..65;
    pub const SLOWNESS_RESIDUAL: Range<usize> = 65..72;
    pub const DEFINING: Range<usize> = 72..76;
    pub const SIGNAL_TO_NOISE: Range<usize> = 76..82;
    pub const AMPLITUDE: Range<usize> = 82..92;
    pub const PERIOD: Range<usize> = 92..98;
    pub const QUALITY: Range<usize> = 98..102;
    pub const MAGNITUDE_TYPE: Range<usize> = 102..106;
    pub const MAGNITUDE_VALUE: Range<usize> = 106..115;
    pub const ARRIVAL_ID: Range<usize> = 115..usize::MAX;
}

// =============================================================================
// Batch Processing Defaults
// =============================================================================

/// Extension of the JSON documents written per bulletin
pub const OUTPUT_EXTENSION: &str = "json";

/// Upper bound on concurrently parsed files
pub const MAX_WORKERS: usize = 256;

/// Default number of parallel workers
pub fn default_workers() -> usize {
    num_cpus::get().clamp(1, MAX_WORKERS)
}
