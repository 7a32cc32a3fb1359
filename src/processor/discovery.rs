//! File discovery for bulletin inputs
//!
//! Inputs may name files, directories or glob patterns. Files named
//! explicitly are always taken; files found by walking a directory or
//! expanding a pattern must pass the configured extension filter.

use crate::config::RebConfig;
use crate::error::{RebError, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// File discovery component for bulletin inputs
#[derive(Debug)]
pub struct FileDiscovery<'a> {
    config: &'a RebConfig,
    seen: HashSet<PathBuf>,
    files: Vec<PathBuf>,
}

impl<'a> FileDiscovery<'a> {
    pub fn new(config: &'a RebConfig) -> Self {
        Self {
            config,
            seen: HashSet::new(),
            files: Vec::new(),
        }
    }

    /// Resolve all inputs into a de-duplicated list of bulletin files
    ///
    /// Files keep the order of the inputs; directory contents are sorted by
    /// file name so repeated runs see the same order.
    pub fn discover<S: AsRef<str>>(mut self, inputs: &[S]) -> Result<Vec<PathBuf>> {
        for input in inputs {
            let input = input.as_ref();
            let path = Path::new(input);

            if path.is_file() {
                self.push(path.to_path_buf());
            } else if path.is_dir() {
                self.walk_directory(path)?;
            } else if is_glob_pattern(input) {
                self.expand_pattern(input)?;
            } else {
                return Err(RebError::configuration(format!(
                    "Input path does not exist: {}",
                    input
                )));
            }
        }

        debug!("Discovered {} bulletin files", self.files.len());
        Ok(self.files)
    }

    fn walk_directory(&mut self, directory: &Path) -> Result<()> {
        debug!("Searching for bulletins in: {}", directory.display());

        for entry in WalkDir::new(directory).sort_by_file_name() {
            let entry = entry?;
            let path = entry.path();

            if entry.file_type().is_file() && !is_hidden(path) && self.config.accepts_extension(path)
            {
                self.push(path.to_path_buf());
            }
        }

        Ok(())
    }

    fn expand_pattern(&mut self, pattern: &str) -> Result<()> {
        let paths = glob::glob(pattern).map_err(|e| {
            RebError::configuration(format!("Invalid glob pattern '{}': {}", pattern, e))
        })?;

        let mut matched = 0usize;
        for path in paths {
            let path = path.map_err(|e| RebError::Io(e.into()))?;
            if path.is_file() && self.config.accepts_extension(&path) {
                matched += 1;
                self.push(path);
            }
        }

        debug!("Pattern '{}' matched {} files", pattern, matched);
        Ok(())
    }

    fn push(&mut self, path: PathBuf) {
        if self.seen.insert(path.clone()) {
            self.files.push(path);
        }
    }
}

/// Discover bulletin files for a set of inputs
pub fn discover_bulletins<S: AsRef<str>>(inputs: &[S], config: &RebConfig) -> Result<Vec<PathBuf>> {
    FileDiscovery::new(config).discover(inputs)
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains(['*', '?', '['])
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}
