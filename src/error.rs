//! Error handling for REB bulletin processing.
//!
//! Unrecognized lines are not errors; only defects inside a line that a
//! classifier already accepted, or failures of the surrounding file and
//! batch machinery, surface here.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RebError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed field '{field}' at line {line_number}: '{value}' ({reason}) in: {line}")]
    MalformedField {
        line_number: usize,
        field: &'static str,
        value: String,
        line: String,
        reason: String,
    },

    #[error("Invalid timestamp '{value}' at line {line_number}: {line}")]
    InvalidTimestamp {
        line_number: usize,
        value: String,
        line: String,
    },

    #[error("Arrival at line {line_number} precedes the origin time: {line}")]
    ArrivalBeforeOrigin { line_number: usize, line: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Directory traversal error: {0}")]
    DirectoryTraversal(#[from] walkdir::Error),

    #[error("Processing failed for file: {path} - {reason}")]
    ProcessingFailed { path: PathBuf, reason: String },
}

impl RebError {
    /// Create a malformed field error for a recognized line
    pub fn malformed_field(
        line_number: usize,
        field: &'static str,
        value: impl Into<String>,
        line: impl Into<String>,
        reason: impl ToString,
    ) -> Self {
        Self::MalformedField {
            line_number,
            field,
            value: value.into(),
            line: line.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a processing failure tied to one input file
    pub fn processing_failed(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ProcessingFailed {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error comes from the content of a bulletin rather than I/O
    pub fn is_content_error(&self) -> bool {
        matches!(
            self,
            Self::MalformedField { .. }
                | Self::InvalidTimestamp { .. }
                | Self::ArrivalBeforeOrigin { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, RebError>;
