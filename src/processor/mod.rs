//! Batch conversion of bulletin files to JSON.
//!
//! Orchestrates discovery, concurrent parsing and JSON writing. Every file
//! gets its own parser invocation on the blocking pool; at most
//! `workers` files are in flight at once. Results are collected in
//! discovery order, so JSON lines on stdout follow the input order.

pub mod discovery;
pub mod writer;

#[cfg(test)]
pub mod tests;

use self::discovery::discover_bulletins;
use self::writer::{JsonWriter, WriteOutcome};

use crate::config::RebConfig;
use crate::constants::REB_FORMAT_VERSION;
use crate::error::{RebError, Result};
use crate::parser::RebParser;

use colored::*;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::task;
use tracing::{debug, error, info, warn};

/// Result of converting one bulletin file
#[derive(Debug, Clone, PartialEq)]
pub struct FileReport {
    pub source: PathBuf,
    pub event_id: Option<String>,
    pub magnitudes: usize,
    pub arrivals: usize,
    pub discarded_lines: usize,
    pub outcome: WriteOutcome,
}

/// Summary of a batch run
#[derive(Debug, Clone, Default)]
pub struct ProcessingStats {
    pub files_discovered: usize,
    pub files_processed: usize,
    pub files_failed: usize,

    /// Files whose JSON document already existed
    pub files_skipped: usize,

    pub arrivals_total: usize,
    pub lines_discarded: usize,

    /// Path and message of every failed file
    pub failures: Vec<(PathBuf, String)>,

    pub output_directory: Option<PathBuf>,
    pub processing_time_ms: u128,
}

impl ProcessingStats {
    /// Whether every discovered file was converted
    pub fn is_successful(&self) -> bool {
        self.files_failed == 0
    }

    fn record(&mut self, report: &FileReport) {
        self.files_processed += 1;
        self.arrivals_total += report.arrivals;
        self.lines_discarded += report.discarded_lines;
        if matches!(report.outcome, WriteOutcome::Skipped(_)) {
            self.files_skipped += 1;
        }
    }

    /// Print a colored run summary to stderr
    pub fn print_summary(&self) {
        eprintln!("\n{}", "Processing Summary".bright_green().bold());
        eprintln!(
            "  {} {}ms",
            "Time elapsed:".bright_cyan(),
            self.processing_time_ms.to_string().bright_white()
        );
        eprintln!(
            "  {} {}",
            "Files processed:".bright_cyan(),
            self.files_processed.to_string().bright_white()
        );
        if self.files_skipped > 0 {
            eprintln!(
                "  {} {}",
                "Files skipped:".bright_yellow(),
                self.files_skipped.to_string().bright_yellow()
            );
        }
        if self.files_failed > 0 {
            eprintln!(
                "  {} {}",
                "Files failed:".bright_red(),
                self.files_failed.to_string().bright_red().bold()
            );
            for (path, message) in &self.failures {
                eprintln!("    {} {}", path.display().to_string().red(), message);
            }
        }
        eprintln!(
            "  {} {}",
            "Arrivals:".bright_cyan(),
            self.arrivals_total.to_string().bright_white().bold()
        );
        if self.lines_discarded > 0 {
            eprintln!(
                "  {} {}",
                "Unrecognized lines:".bright_cyan(),
                self.lines_discarded.to_string().bright_white()
            );
        }
        if let Some(directory) = &self.output_directory {
            eprintln!("  {} {}", "Output:".bright_cyan(), directory.display());
        }
    }
}

/// Main processor for bulletin conversion
#[derive(Debug)]
pub struct BulletinProcessor {
    inputs: Vec<String>,
    config: RebConfig,
    parser: RebParser,
    writer: JsonWriter,
}

impl BulletinProcessor {
    /// Create a processor for a set of files, directories or glob patterns
    pub fn new(inputs: Vec<String>, config: RebConfig) -> Result<Self> {
        config.validate()?;

        if inputs.is_empty() {
            return Err(RebError::configuration("No input files given"));
        }

        Ok(Self {
            inputs,
            writer: JsonWriter::new(config.output.clone()),
            parser: RebParser::new(),
            config,
        })
    }

    /// Use a preconfigured parser, e.g. one carrying a `created_by` tag
    pub fn with_parser(mut self, parser: RebParser) -> Self {
        self.parser = parser;
        self
    }

    /// Main processing entry point
    pub async fn process(&self) -> Result<ProcessingStats> {
        let start_time = Instant::now();

        let files = discover_bulletins(&self.inputs, &self.config)?;
        let mut stats = ProcessingStats {
            files_discovered: files.len(),
            output_directory: self.config.output.directory.clone(),
            ..ProcessingStats::default()
        };

        if files.is_empty() {
            warn!("No bulletin files found");
            return Ok(stats);
        }

        self.check_output_targets(&files)?;

        if let Some(directory) = &self.config.output.directory {
            tokio::fs::create_dir_all(directory).await?;
        }

        info!(
            "Processing {} bulletin files ({} layout) with {} workers",
            files.len(),
            REB_FORMAT_VERSION,
            self.config.workers
        );

        let pb = self.progress_bar(files.len());

        let mut results = stream::iter(files)
            .map(|path| {
                let parser = self.parser.clone();
                let writer = self.writer.clone();
                async move {
                    let task_path = path.clone();
                    let result = task::spawn_blocking(move || {
                        convert_file(&parser, &writer, &task_path)
                    })
                    .await
                    .unwrap_or_else(|e| {
                        Err(RebError::processing_failed(
                            path.clone(),
                            format!("worker task failed: {}", e),
                        ))
                    });
                    (path, result)
                }
            })
            .buffered(self.config.workers);

        while let Some((path, result)) = results.next().await {
            pb.inc(1);

            match result {
                Ok(report) => {
                    debug!("Successfully processed: {}", path.display());
                    if let WriteOutcome::Rendered(json) = &report.outcome {
                        pb.suspend(|| println!("{}", json));
                    }
                    stats.record(&report);
                }
                Err(e) if self.config.fail_fast => {
                    pb.abandon();
                    return Err(RebError::processing_failed(path, e.to_string()));
                }
                Err(e) => {
                    if e.is_content_error() {
                        warn!("Skipping malformed bulletin {}: {}", path.display(), e);
                    } else {
                        error!("Failed to process {}: {}", path.display(), e);
                    }
                    stats.files_failed += 1;
                    stats.failures.push((path, e.to_string()));
                }
            }
        }

        pb.finish_and_clear();
        stats.processing_time_ms = start_time.elapsed().as_millis();

        info!(
            "Converted {} of {} bulletins in {}ms",
            stats.files_processed, stats.files_discovered, stats.processing_time_ms
        );

        Ok(stats)
    }

    /// Reject batches where two bulletins would write the same document
    fn check_output_targets(&self, files: &[PathBuf]) -> Result<()> {
        let mut targets: HashMap<PathBuf, &Path> = HashMap::new();

        for file in files {
            let Some(target) = self.writer.output_path(file) else {
                return Ok(());
            };
            if let Some(previous) = targets.insert(target.clone(), file) {
                return Err(RebError::configuration(format!(
                    "{} and {} would both be written to {}",
                    previous.display(),
                    file.display(),
                    target.display()
                )));
            }
        }

        Ok(())
    }

    fn progress_bar(&self, total: usize) -> ProgressBar {
        if !self.config.show_progress || total < 2 {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_message("Parsing bulletins");
        pb
    }
}

/// Parse one bulletin file and hand the event to the writer
pub fn convert_file(parser: &RebParser, writer: &JsonWriter, path: &Path) -> Result<FileReport> {
    let result = parser.parse_file(path)?;
    let outcome = writer.write_event(&result.event, path)?;

    Ok(FileReport {
        source: path.to_path_buf(),
        event_id: result.event.event_id.clone(),
        magnitudes: result.event.origin.magnitudes.len(),
        arrivals: result.event.arrival_count(),
        discarded_lines: result.stats.discarded_lines,
        outcome,
    })
}
