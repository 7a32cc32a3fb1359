//! REB Processor Library
//!
//! A Rust library for converting fixed-column REB seismic bulletins into a
//! structured event record: one origin with its magnitude estimates and the
//! station arrivals that located it.
//!
//! This library provides tools for:
//! - Parsing REB bulletins with a resynchronizing stage machine
//! - Reconstructing origin and arrival times as UTC instants
//! - Keeping unreliable columns verbatim instead of failing on them
//! - Converting directories of bulletins to JSON concurrently

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod parser;
pub mod processor;

// Re-export commonly used types
pub use config::RebConfig;
pub use error::{RebError, Result};
pub use models::{Arrival, Event, FieldValue, Magnitude, Origin};
pub use parser::{ParseResult, ParseStats, RebParser, parse_bulletin};
