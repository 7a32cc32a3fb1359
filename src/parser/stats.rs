//! Parsing statistics and result structures for bulletin parsing
//!
//! Every non-blank input line is either consumed by a stage or discarded
//! during resynchronization; the counters here make that accounting visible.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::state::Stage;
use crate::models::Event;

/// Parsed bulletin with its statistics
#[derive(Debug, Clone, PartialEq)]
pub struct ParseResult {
    pub event: Event,
    pub stats: ParseStats,
}

/// Line accounting for one parse
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Non-blank lines handed to the driver
    pub total_lines: usize,

    /// Lines accepted by some stage
    pub consumed_lines: usize,

    /// Lines dropped because no stage accepted them
    pub discarded_lines: usize,

    /// Number of passes over the stage list
    pub passes: usize,

    /// Arrivals consumed but not kept because their phase is not P or S
    pub skipped_arrivals: usize,

    /// Lines consumed per stage
    pub stage_matches: BTreeMap<Stage, usize>,
}

impl ParseStats {
    pub fn new(total_lines: usize) -> Self {
        Self {
            total_lines,
            ..Self::default()
        }
    }

    pub fn record_match(&mut self, stage: Stage) {
        self.consumed_lines += 1;
        *self.stage_matches.entry(stage).or_insert(0) += 1;
    }

    pub fn record_discard(&mut self) {
        self.discarded_lines += 1;
    }

    /// Lines consumed by one stage
    pub fn matches_for(&self, stage: Stage) -> usize {
        self.stage_matches.get(&stage).copied().unwrap_or(0)
    }

    /// Whether every line was either consumed or discarded
    pub fn is_balanced(&self) -> bool {
        self.consumed_lines + self.discarded_lines == self.total_lines
    }

    /// Consumed lines as a percentage of all lines
    pub fn consumption_rate(&self) -> f64 {
        if self.total_lines == 0 {
            0.0
        } else {
            (self.consumed_lines as f64 / self.total_lines as f64) * 100.0
        }
    }
}
