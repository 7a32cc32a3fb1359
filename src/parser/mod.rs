//! REB bulletin parser
//!
//! This module turns the text of a fixed-column seismic bulletin into an
//! [`Event`](crate::models::Event). The bulletin is walked line by line; each
//! line is offered to a fixed sequence of stages, and lines no stage accepts
//! are dropped so the parser can resynchronize on the next recognizable row.
//!
//! ## Architecture
//!
//! - [`field_parsers`] - Column slicing and typed coercion
//! - [`classifiers`] - Caption and regex predicates per section
//! - [`sections`] - One parser per bulletin section, sharing a parse context
//! - [`state`] - Stage order and transition table
//! - [`driver`] - The pass loop, file reading and result assembly
//! - [`stats`] - Line accounting returned next to the event
//!
//! ## Usage
//!
//! ```rust
//! use reb_processor::parser::RebParser;
//!
//! let text = "\
//! Antelope Linux_a2  REB - Event       12  Transilvania, judetul Alba   Op: Daniel Paulescu
//! 2016/12/07 02:11:31.47   0.33  0.60  42.6517   18.4457   3.4   2.3 110   5.0f  0.0   21   11 156   0.64   5.50 m i ke NIEP:rt m       13
//! ";
//!
//! let result = RebParser::new().parse_str(text)?;
//! assert_eq!(result.event.event_id.as_deref(), Some("12"));
//! assert_eq!(result.stats.discarded_lines, 0);
//! # Ok::<(), reb_processor::RebError>(())
//! ```

pub mod classifiers;
pub mod driver;
pub mod field_parsers;
pub mod sections;
pub mod state;
pub mod stats;

#[cfg(test)]
pub mod tests;

pub use driver::{RebParser, parse_bulletin};
pub use sections::ParseContext;
pub use state::Stage;
pub use stats::{ParseResult, ParseStats};

/// A trimmed, non-blank bulletin line with its 1-based position in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn new(number: usize, text: &'a str) -> Self {
        Self { number, text }
    }
}

/// Split a buffer on `\n`, trim every line and drop the blank ones
pub fn bulletin_lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    text.split('\n')
        .enumerate()
        .map(|(index, line)| Line::new(index + 1, line.trim()))
        .filter(|line| !line.text.is_empty())
}
