//! Configuration management and validation.
//!
//! Provides the configuration for batch conversion of bulletin files:
//! where JSON goes, how it is rendered, which files are picked up and how
//! many are parsed at once.

use crate::constants::{MAX_WORKERS, default_workers};
use crate::error::{RebError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Output rendering settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving one JSON document per bulletin; stdout when unset
    pub directory: Option<PathBuf>,

    /// Pretty-print JSON documents
    pub pretty: bool,

    /// Keep the original bulletin text in the output
    pub include_raw_text: bool,

    /// Overwrite JSON documents that already exist
    pub overwrite: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: None,
            pretty: false,
            include_raw_text: false,
            overwrite: true,
        }
    }
}

/// Main configuration for bulletin processing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebConfig {
    /// Number of bulletins parsed concurrently
    pub workers: usize,

    /// File extensions accepted while walking directories (empty = any file)
    pub extensions: Vec<String>,

    /// Abort the whole run on the first bulletin that fails to parse
    pub fail_fast: bool,

    /// Show a progress bar for multi-file runs
    pub show_progress: bool,

    pub output: OutputConfig,
}

impl Default for RebConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            extensions: Vec::new(),
            fail_fast: false,
            show_progress: true,
            output: OutputConfig::default(),
        }
    }
}

impl RebConfig {
    /// Create configuration with custom worker count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    /// Restrict directory discovery to the given extensions
    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.into().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    /// Write JSON documents into a directory instead of stdout
    pub fn with_output_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.output.directory = Some(directory.into());
        self
    }

    pub fn with_pretty_output(mut self) -> Self {
        self.output.pretty = true;
        self
    }

    pub fn with_raw_text(mut self) -> Self {
        self.output.include_raw_text = true;
        self
    }

    /// Keep existing JSON documents untouched
    pub fn without_overwrite(mut self) -> Self {
        self.output.overwrite = false;
        self
    }

    pub fn with_fail_fast(mut self) -> Self {
        self.fail_fast = true;
        self
    }

    pub fn without_progress(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Check the configuration for values the processor cannot honour
    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(RebError::configuration("Worker count must be at least 1"));
        }

        if self.workers > MAX_WORKERS {
            return Err(RebError::configuration(format!(
                "Worker count {} exceeds the maximum of {}",
                self.workers, MAX_WORKERS
            )));
        }

        if let Some(ext) = self.extensions.iter().find(|ext| ext.is_empty() || ext.contains('/')) {
            return Err(RebError::configuration(format!(
                "Invalid file extension filter: '{}'",
                ext
            )));
        }

        if let Some(directory) = &self.output.directory {
            if directory.is_file() {
                return Err(RebError::configuration(format!(
                    "Output path {} is a file, expected a directory",
                    directory.display()
                )));
            }
        }

        Ok(())
    }

    /// Whether a path passes the extension filter
    pub fn accepts_extension(&self, path: &std::path::Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }

        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| self.extensions.iter().any(|allowed| allowed.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}
