//! Parser stages and their transition table
//!
//! A pass over the line queue walks the stages in priority order. A stage
//! that accepts the front line keeps the cursor; a stage that declines hands
//! over to [`Stage::next`]. The last stage has no successor and ends the pass.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::sections::{
    SectionParser, parse_arrival_data, parse_arrival_header, parse_event_header,
    parse_magnitude_data, parse_magnitude_header, parse_origin_data, parse_origin_header,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Stage {
    ExpectEventHeader,
    ExpectOriginHeader,
    ExpectOriginData,
    ExpectMagnitudeHeader,
    ExpectMagnitudeData,
    ExpectArrivalHeader,
    ExpectArrivalData,
}

impl Stage {
    /// Stage every pass starts from
    pub const FIRST: Stage = Stage::ExpectEventHeader;

    /// All stages in priority order
    #[cfg(test)]
    pub const ALL: [Stage; 7] = [
        Stage::ExpectEventHeader,
        Stage::ExpectOriginHeader,
        Stage::ExpectOriginData,
        Stage::ExpectMagnitudeHeader,
        Stage::ExpectMagnitudeData,
        Stage::ExpectArrivalHeader,
        Stage::ExpectArrivalData,
    ];

    /// Stage tried after this one declines the front line
    pub fn next(self) -> Option<Stage> {
        match self {
            Stage::ExpectEventHeader => Some(Stage::ExpectOriginHeader),
            Stage::ExpectOriginHeader => Some(Stage::ExpectOriginData),
            Stage::ExpectOriginData => Some(Stage::ExpectMagnitudeHeader),
            Stage::ExpectMagnitudeHeader => Some(Stage::ExpectMagnitudeData),
            Stage::ExpectMagnitudeData => Some(Stage::ExpectArrivalHeader),
            Stage::ExpectArrivalHeader => Some(Stage::ExpectArrivalData),
            Stage::ExpectArrivalData => None,
        }
    }

    /// Section parser run in this stage
    pub fn parser(self) -> SectionParser {
        match self {
            Stage::ExpectEventHeader => parse_event_header,
            Stage::ExpectOriginHeader => parse_origin_header,
            Stage::ExpectOriginData => parse_origin_data,
            Stage::ExpectMagnitudeHeader => parse_magnitude_header,
            Stage::ExpectMagnitudeData => parse_magnitude_data,
            Stage::ExpectArrivalHeader => parse_arrival_header,
            Stage::ExpectArrivalData => parse_arrival_data,
        }
    }

    /// Whether the stage only gates on a caption line
    #[cfg(test)]
    pub fn is_header(self) -> bool {
        matches!(
            self,
            Stage::ExpectEventHeader
                | Stage::ExpectOriginHeader
                | Stage::ExpectMagnitudeHeader
                | Stage::ExpectArrivalHeader
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Stage::ExpectEventHeader => "event_header",
            Stage::ExpectOriginHeader => "origin_header",
            Stage::ExpectOriginData => "origin_data",
            Stage::ExpectMagnitudeHeader => "magnitude_header",
            Stage::ExpectMagnitudeData => "magnitude_data",
            Stage::ExpectArrivalHeader => "arrival_header",
            Stage::ExpectArrivalData => "arrival_data",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}
