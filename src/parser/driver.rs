//! Core REB parser implementation
//!
//! This module drives the stage machine over the queue of bulletin lines,
//! handles file reading and assembles the final [`Event`].

use std::collections::VecDeque;
use std::path::Path;
use tracing::{debug, info, trace, warn};

use super::sections::ParseContext;
use super::state::Stage;
use super::stats::{ParseResult, ParseStats};
use super::{Line, bulletin_lines};
use crate::error::Result;
use crate::models::Event;

/// Parser for single-event REB bulletins
///
/// One parser may be reused for any number of buffers; every call builds its
/// own [`ParseContext`], so no state leaks between bulletins.
#[derive(Debug, Clone, Default)]
pub struct RebParser {
    source_path: Option<String>,
    created_by: Option<String>,
}

impl RebParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record where the bulletin came from
    pub fn with_source_path(mut self, source_path: impl Into<String>) -> Self {
        self.source_path = Some(source_path.into());
        self
    }

    /// Record the system that produced the bulletin
    pub fn with_created_by(mut self, created_by: impl Into<String>) -> Self {
        self.created_by = Some(created_by.into());
        self
    }

    /// Read and parse a bulletin file
    pub fn parse_file(&self, file_path: &Path) -> Result<ParseResult> {
        info!("Parsing REB bulletin: {}", file_path.display());

        let bytes = std::fs::read(file_path)?;
        self.clone()
            .with_source_path(file_path.display().to_string())
            .parse_bytes(&bytes)
    }

    /// Parse a raw buffer, replacing invalid UTF-8 sequences
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<ParseResult> {
        self.parse_str(&String::from_utf8_lossy(bytes))
    }

    /// Parse a bulletin held in memory
    pub fn parse_str(&self, text: &str) -> Result<ParseResult> {
        let mut queue: VecDeque<Line<'_>> = bulletin_lines(text).collect();
        let mut stats = ParseStats::new(queue.len());
        let mut context = ParseContext::default();

        while !queue.is_empty() {
            stats.passes += 1;

            if !run_pass(&mut context, &mut queue, &mut stats)? {
                if let Some(line) = queue.pop_front() {
                    debug!("No stage matched line {}, discarding: {}", line.number, line.text);
                    stats.record_discard();
                }
            }
        }

        let ParseContext {
            event_id,
            operator,
            origin,
            skipped_arrivals,
        } = context;
        stats.skipped_arrivals = skipped_arrivals;

        if !origin.has_time() {
            warn!("Bulletin has no origin data line");
        }

        let event = Event {
            created_by: self.created_by.clone(),
            source_path: self.source_path.clone(),
            operator,
            event_id,
            origin,
            ..Event::new(text)
        };

        debug!(
            "Bulletin parsing complete: {} consumed ({:.1}%), {} discarded in {} passes",
            stats.consumed_lines,
            stats.consumption_rate(),
            stats.discarded_lines,
            stats.passes
        );
        info!(
            "Parsed event {} with {} magnitudes and {} arrivals",
            event.event_id.as_deref().unwrap_or("<unknown>"),
            event.origin.magnitudes.len(),
            event.arrival_count()
        );

        Ok(ParseResult { event, stats })
    }
}

/// Walk all stages once; returns whether any line was consumed
fn run_pass(
    context: &mut ParseContext,
    queue: &mut VecDeque<Line<'_>>,
    stats: &mut ParseStats,
) -> Result<bool> {
    let mut progressed = false;
    let mut stage = Some(Stage::FIRST);

    while let Some(current) = stage {
        let Some(&line) = queue.front() else {
            break;
        };

        trace!("[{:>16}] line {}: {}", current, line.number, line.text);

        if (current.parser())(context, &line)? {
            queue.pop_front();
            stats.record_match(current);
            progressed = true;
        } else {
            stage = current.next();
        }
    }

    Ok(progressed)
}

/// Parse a bulletin and return only the event
pub fn parse_bulletin(text: &str) -> Result<Event> {
    RebParser::new().parse_str(text).map(|result| result.event)
}
