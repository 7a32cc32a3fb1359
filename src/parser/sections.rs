//! Section parsers for the individual bulletin tables
//!
//! Every section parser has the same shape: it receives the parse context and
//! the current line, returns `Ok(false)` when the line does not belong to its
//! section, `Ok(true)` when it consumed the line, and an error only when a
//! recognized line carries a field that cannot be coerced.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::debug;

use super::Line;
use super::classifiers::{
    is_arrival_data, is_arrival_header, is_event_header, is_magnitude_data, is_magnitude_header,
    is_origin_data, is_origin_header,
};
use super::field_parsers::{
    column, fraction_to_micros, optional_text, parse_required, parse_volatile,
};
use crate::constants::{
    ARRIVAL_FRACTION_PADDING, EVENT_HEADER_MARKER, OPERATOR_MARKER, ORIGIN_FRACTION_PADDING,
    arrival_columns, magnitude_columns, origin_columns,
};
use crate::error::{RebError, Result};
use crate::models::{Arrival, Magnitude, Origin};

/// Mutable state shared by the section parsers during one parse
#[derive(Debug, Default)]
pub struct ParseContext {
    pub event_id: Option<String>,
    pub operator: Option<String>,
    pub origin: Origin,

    /// Arrivals read for phases other than P and S
    pub skipped_arrivals: usize,
}

/// Signature shared by all section parsers
pub type SectionParser = fn(&mut ParseContext, &Line<'_>) -> Result<bool>;

// =============================================================================
// Event Header
// =============================================================================

/// `Antelope Linux_a2  REB - Event  12  Transilvania, judetul Alba   Op: Daniel Paulescu`
pub fn parse_event_header(context: &mut ParseContext, line: &Line<'_>) -> Result<bool> {
    if !is_event_header(line.text) {
        return Ok(false);
    }

    let remainder = line
        .text
        .split_once(EVENT_HEADER_MARKER)
        .map(|(_, rest)| rest)
        .unwrap_or_default();

    // Some bulletins have no operator
    let (id_region, operator) = match remainder.split_once(OPERATOR_MARKER) {
        Some((id_region, operator)) => (id_region, non_empty(operator)),
        None => (remainder, None),
    };

    let mut tokens = id_region.split_whitespace();
    let event_id = tokens.next().map(str::to_string);
    let region = non_empty(&tokens.collect::<Vec<_>>().join(" "));

    debug!(
        "Event header at line {}: id={:?}, region={:?}, operator={:?}",
        line.number, event_id, region, operator
    );

    context.event_id = event_id;
    context.operator = operator;
    context.origin = Origin::with_region(region);
    Ok(true)
}

// =============================================================================
// Origin Table
// =============================================================================

pub fn parse_origin_header(_context: &mut ParseContext, line: &Line<'_>) -> Result<bool> {
    Ok(is_origin_header(line.text))
}

/// `2016/12/07 02:11:31.47   0.33  0.60  42.6517   18.4457   3.4 ...`
pub fn parse_origin_data(context: &mut ParseContext, line: &Line<'_>) -> Result<bool> {
    if !is_origin_data(line.text) {
        return Ok(false);
    }

    if context.origin.has_time() {
        debug!(
            "Ignoring second origin line {} for an origin that already has a time",
            line.number
        );
        return Ok(false);
    }

    use origin_columns as cols;

    let year: i32 = parse_required(line, cols::YEAR, "year")?;
    let month: u32 = parse_required(line, cols::MONTH, "month")?;
    let day: u32 = parse_required(line, cols::DAY, "day")?;
    let hour: u32 = parse_required(line, cols::HOUR, "hour")?;
    let minute: u32 = parse_required(line, cols::MINUTE, "minute")?;
    let second: u32 = parse_required(line, cols::SECOND, "second")?;
    let micros = fraction_to_micros(
        line,
        column(line.text, cols::HUNDREDTHS),
        ORIGIN_FRACTION_PADDING,
    )?;

    let time_raw = column(line.text, cols::DATE_TIME);
    let date = NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| invalid_timestamp(line, time_raw))?;
    let time = utc_instant(line, date, (hour, minute, second, micros), time_raw)?;

    let latitude: f64 = parse_required(line, cols::LATITUDE, "latitude")?;
    let longitude: f64 = parse_required(line, cols::LONGITUDE, "longitude")?;
    let depth: f64 = parse_required(line, cols::DEPTH, "depth")?;

    let origin = &mut context.origin;
    origin.time = Some(time);
    origin.time_raw = Some(time_raw.to_string());
    origin.latitude = Some(latitude);
    origin.longitude = Some(longitude);
    origin.depth = Some(depth);
    origin.time_error = parse_volatile(line, cols::TIME_ERROR);
    origin.rms = parse_volatile(line, cols::RMS);
    origin.semi_major_axis = parse_volatile(line, cols::SEMI_MAJOR_AXIS);
    origin.semi_minor_axis = parse_volatile(line, cols::SEMI_MINOR_AXIS);
    origin.azimuth = parse_volatile(line, cols::AZIMUTH);
    origin.depth_error = parse_volatile(line, cols::DEPTH_ERROR);
    origin.num_defining_phases = parse_volatile(line, cols::NUM_DEFINING_PHASES);
    origin.num_stations = parse_volatile(line, cols::NUM_STATIONS);
    origin.gap = parse_volatile(line, cols::GAP);
    origin.min_distance_raw = optional_text(line, cols::MIN_DISTANCE_RAW);
    origin.min_distance = optional_text(line, cols::MIN_DISTANCE);
    origin.quality = optional_text(line, cols::QUALITY);
    origin.author = optional_text(line, cols::AUTHOR);
    origin.origin_id = optional_text(line, cols::ORIGIN_ID);

    debug!("Origin time {} from line {}", time, line.number);
    Ok(true)
}

// =============================================================================
// Magnitude Table
// =============================================================================

pub fn parse_magnitude_header(_context: &mut ParseContext, line: &Line<'_>) -> Result<bool> {
    Ok(is_magnitude_header(line.text))
}

/// `ml   2.5  0.25     8 dbevproc        13`
pub fn parse_magnitude_data(context: &mut ParseContext, line: &Line<'_>) -> Result<bool> {
    if !is_magnitude_data(line.text) {
        return Ok(false);
    }

    use magnitude_columns as cols;

    let magnitude = Magnitude {
        magnitude_type: column(line.text, cols::TYPE).to_string(),
        value: parse_required(line, cols::VALUE, "magnitude_value")?,
        error: parse_volatile(line, cols::ERROR),
        num_stations: parse_required(line, cols::NUM_STATIONS, "magnitude_num_stations")?,
        author: optional_text(line, cols::AUTHOR),
        origin_id: optional_text(line, cols::ORIGIN_ID),
    };

    context.origin.magnitudes.push(magnitude);
    Ok(true)
}

// =============================================================================
// Arrival Table
// =============================================================================

pub fn parse_arrival_header(_context: &mut ParseContext, line: &Line<'_>) -> Result<bool> {
    Ok(is_arrival_header(line.text))
}

/// `PDG     0.64 110.0 P        02:11:43.144  -0.6 ...`
///
/// Arrivals for phases other than P and S are consumed but not kept.
pub fn parse_arrival_data(context: &mut ParseContext, line: &Line<'_>) -> Result<bool> {
    if !is_arrival_data(line.text) {
        return Ok(false);
    }

    use arrival_columns as cols;

    let mut arrival = Arrival {
        station: column(line.text, cols::STATION).to_string(),
        distance: parse_required(line, cols::DISTANCE, "distance")?,
        event_azimuth: parse_required(line, cols::EVENT_AZIMUTH, "event_azimuth")?,
        phase: column(line.text, cols::PHASE).to_string(),
        time: None,
        time_residual: parse_volatile(line, cols::TIME_RESIDUAL),
        azimuth: parse_volatile(line, cols::AZIMUTH),
        azimuth_residual: parse_volatile(line, cols::AZIMUTH_RESIDUAL),
        slowness: parse_volatile(line, cols::SLOWNESS),
        slowness_residual: parse_volatile(line, cols::SLOWNESS_RESIDUAL),
        is_defining: optional_text(line, cols::DEFINING),
        signal_to_noise: parse_volatile(line, cols::SIGNAL_TO_NOISE),
        amplitude: parse_volatile(line, cols::AMPLITUDE),
        period: parse_volatile(line, cols::PERIOD),
        quality: optional_text(line, cols::QUALITY),
        magnitude_type: optional_text(line, cols::MAGNITUDE_TYPE),
        magnitude_value: parse_volatile(line, cols::MAGNITUDE_VALUE),
        arrival_id: optional_text(line, cols::ARRIVAL_ID),
    };

    if !arrival.is_timed_phase() {
        debug!(
            "Skipping {} arrival of {} at line {}",
            arrival.phase, arrival.station, line.number
        );
        context.skipped_arrivals += 1;
        return Ok(true);
    }

    let origin_time = context
        .origin
        .time
        .ok_or_else(|| RebError::ArrivalBeforeOrigin {
            line_number: line.number,
            line: line.text.to_string(),
        })?;

    let time_of_day = column(line.text, cols::TIME);
    let parts: Vec<&str> = time_of_day.split([':', '.']).collect();
    let &[hour, minute, second, fraction] = parts.as_slice() else {
        return Err(RebError::malformed_field(
            line.number,
            "arrival_time",
            time_of_day,
            line.text,
            "expected HH:MM:SS.mmm",
        ));
    };

    let hour = parse_time_part(line, hour, time_of_day)?;
    let minute = parse_time_part(line, minute, time_of_day)?;
    let second = parse_time_part(line, second, time_of_day)?;
    let micros = fraction_to_micros(line, fraction, ARRIVAL_FRACTION_PADDING)?;

    arrival.time = Some(utc_instant(
        line,
        origin_time.date_naive(),
        (hour, minute, second, micros),
        time_of_day,
    )?);

    context.origin.arrivals.push(arrival);
    Ok(true)
}

// =============================================================================
// Helpers
// =============================================================================

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn parse_time_part(line: &Line<'_>, part: &str, time_of_day: &str) -> Result<u32> {
    part.parse::<u32>().map_err(|e| {
        RebError::malformed_field(line.number, "arrival_time", time_of_day, line.text, e)
    })
}

fn invalid_timestamp(line: &Line<'_>, value: &str) -> RebError {
    RebError::InvalidTimestamp {
        line_number: line.number,
        value: value.to_string(),
        line: line.text.to_string(),
    }
}

/// Combine a calendar date with a time of day in UTC
fn utc_instant(
    line: &Line<'_>,
    date: NaiveDate,
    (hour, minute, second, micros): (u32, u32, u32, u32),
    printed: &str,
) -> Result<DateTime<Utc>> {
    date.and_hms_micro_opt(hour, minute, second, micros)
        .map(|naive| naive.and_utc())
        .ok_or_else(|| invalid_timestamp(line, printed))
}
