//! Integration tests for the processor module
//!
//! Tests the batch pipeline against temporary bulletin directories.

pub mod basic_processing;

use crate::config::RebConfig;
use crate::constants::ARRIVAL_HEADER_CAPTION;
use crate::parser::tests::{EVENT_HEADER_LINE, P_ARRIVAL_LINE, bulletin_from, sample_bulletin};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Write a bulletin file into a directory and return its path
pub fn write_bulletin(directory: &Path, name: &str, content: &str) -> PathBuf {
    let path = directory.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}

/// Bulletin whose P arrival comes before any origin line
pub fn broken_bulletin() -> String {
    bulletin_from(&[EVENT_HEADER_LINE, ARRIVAL_HEADER_CAPTION, P_ARRIVAL_LINE])
}

/// Directory holding two valid `.reb` bulletins and one unrelated file
pub fn create_bulletin_directory(temp_dir: &TempDir) -> PathBuf {
    let input = temp_dir.path().join("bulletins");
    write_bulletin(&input, "event_12.reb", &sample_bulletin());
    write_bulletin(&input, "2016/event_13.reb", &sample_bulletin());
    write_bulletin(&input, "notes.txt", "not a bulletin");
    input
}

/// Quiet configuration writing into `output`
pub fn test_config(output: &Path) -> RebConfig {
    RebConfig::default()
        .with_workers(2)
        .with_extensions(["reb"])
        .with_output_directory(output)
        .without_progress()
}

pub fn path_string(path: &Path) -> String {
    path.display().to_string()
}
