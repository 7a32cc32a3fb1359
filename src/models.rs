//! Bulletin data model
//!
//! The record tree produced by the parser: one [`Event`] owning exactly one
//! [`Origin`], which owns its [`Magnitude`] estimates and [`Arrival`] readings
//! in file order.

use crate::constants::DEFAULT_GAP;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Volatile Column Values
// =============================================================================

/// Value of a column whose printed format is not reliable enough to coerce
///
/// Blank slices become [`FieldValue::Absent`], slices that parse as `T` become
/// [`FieldValue::Parsed`], anything else (trailing flag characters, stray
/// punctuation) is kept verbatim as [`FieldValue::Raw`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue<T> {
    Parsed(T),
    Raw(String),
    Absent,
}

impl<T: FromStr> FieldValue<T> {
    /// Classify a trimmed column slice
    pub fn from_column(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::Absent;
        }

        match text.parse::<T>() {
            Ok(value) => Self::Parsed(value),
            Err(_) => Self::Raw(text.to_string()),
        }
    }
}

impl<T> FieldValue<T> {
    /// The parsed value, if the column held a well-formed number
    #[cfg(test)]
    pub fn parsed(&self) -> Option<&T> {
        match self {
            Self::Parsed(value) => Some(value),
            _ => None,
        }
    }

    #[cfg(test)]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl<T> Default for FieldValue<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T: fmt::Display> fmt::Display for FieldValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parsed(value) => write!(f, "{value}"),
            Self::Raw(text) => f.write_str(text),
            Self::Absent => Ok(()),
        }
    }
}

// =============================================================================
// Event
// =============================================================================

/// One parsed bulletin
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Name of the system that produced the bulletin, when the caller knows it
    pub created_by: Option<String>,

    /// Path the bulletin was read from
    pub source_path: Option<String>,

    /// Analyst name printed after `Op:` in the event header
    pub operator: Option<String>,

    /// Identifier printed after `REB - Event`
    pub event_id: Option<String>,

    /// Original bulletin text
    #[serde(default)]
    pub raw_text: String,

    pub origin: Origin,
}

impl Event {
    /// Create an empty event around the original text
    pub fn new(raw_text: impl Into<String>) -> Self {
        Self {
            raw_text: raw_text.into(),
            ..Self::default()
        }
    }

    /// Number of timed arrivals attached to the origin
    pub fn arrival_count(&self) -> usize {
        self.origin.arrivals.len()
    }
}

// =============================================================================
// Origin
// =============================================================================

/// Location, time and quality estimate of an event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Origin {
    /// OrigID column of the origin data line
    pub origin_id: Option<String>,

    pub time: Option<DateTime<Utc>>,

    /// Date and time exactly as printed
    pub time_raw: Option<String>,

    pub time_error: FieldValue<f64>,
    pub rms: FieldValue<f64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,

    /// Free text region taken from the event header
    pub region: Option<String>,

    pub semi_major_axis: FieldValue<f64>,
    pub semi_minor_axis: FieldValue<f64>,
    pub azimuth: FieldValue<f64>,
    pub depth: Option<f64>,
    pub depth_error: FieldValue<f64>,
    pub num_defining_phases: FieldValue<u32>,
    pub num_stations: FieldValue<u32>,

    /// Azimuthal gap; [`DEFAULT_GAP`] until a data line is read
    pub gap: FieldValue<u32>,

    /// `mdist` column as printed
    pub min_distance_raw: Option<String>,

    /// `Mdist` column as printed
    pub min_distance: Option<String>,

    pub quality: Option<String>,
    pub author: Option<String>,

    pub magnitudes: Vec<Magnitude>,
    pub arrivals: Vec<Arrival>,
}

impl Default for Origin {
    fn default() -> Self {
        Self {
            origin_id: None,
            time: None,
            time_raw: None,
            time_error: FieldValue::Absent,
            rms: FieldValue::Absent,
            latitude: None,
            longitude: None,
            region: None,
            semi_major_axis: FieldValue::Absent,
            semi_minor_axis: FieldValue::Absent,
            azimuth: FieldValue::Absent,
            depth: None,
            depth_error: FieldValue::Absent,
            num_defining_phases: FieldValue::Absent,
            num_stations: FieldValue::Absent,
            gap: FieldValue::Parsed(DEFAULT_GAP),
            min_distance_raw: None,
            min_distance: None,
            quality: None,
            author: None,
            magnitudes: Vec::new(),
            arrivals: Vec::new(),
        }
    }
}

impl Origin {
    /// Fresh origin carrying only the region from an event header
    pub fn with_region(region: Option<String>) -> Self {
        Self {
            region,
            ..Self::default()
        }
    }

    /// Whether the origin data line has already been read
    pub fn has_time(&self) -> bool {
        self.time.is_some()
    }

    /// Preferred magnitude, i.e. the first one printed
    pub fn preferred_magnitude(&self) -> Option<&Magnitude> {
        self.magnitudes.first()
    }
}

// =============================================================================
// Magnitude
// =============================================================================

/// Magnitude estimate for an origin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Magnitude {
    /// Two letter code such as `ml` or `mb`
    #[serde(rename = "type")]
    pub magnitude_type: String,
    pub value: f64,
    pub error: FieldValue<f64>,
    pub num_stations: u32,
    pub author: Option<String>,
    pub origin_id: Option<String>,
}

// =============================================================================
// Arrival
// =============================================================================

/// One station's reading of a seismic phase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrival {
    pub station: String,
    pub distance: f64,
    pub event_azimuth: f64,
    pub phase: String,

    /// Origin date combined with the arrival's time of day
    pub time: Option<DateTime<Utc>>,

    pub time_residual: FieldValue<f64>,
    pub azimuth: FieldValue<f64>,
    pub azimuth_residual: FieldValue<f64>,
    pub slowness: FieldValue<f64>,
    pub slowness_residual: FieldValue<f64>,

    /// Defining flags as printed, e.g. `T__`
    pub is_defining: Option<String>,

    pub signal_to_noise: FieldValue<f64>,
    pub amplitude: FieldValue<f64>,
    pub period: FieldValue<f64>,
    pub quality: Option<String>,
    pub magnitude_type: Option<String>,
    pub magnitude_value: FieldValue<f64>,
    pub arrival_id: Option<String>,
}

impl Arrival {
    /// Whether the phase is one whose arrival gets timed and kept
    pub fn is_timed_phase(&self) -> bool {
        crate::constants::TIMED_PHASES.contains(&self.phase.as_str())
    }
}
