//! Command-line interface components.

use crate::config::RebConfig;
use crate::error::{RebError, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing::debug;

/// CLI arguments for the REB bulletin processor
///
/// Converts fixed-column REB seismic bulletins into JSON documents, one per
/// bulletin.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "reb-processor",
    version,
    about = "Convert fixed-column REB seismic bulletins to JSON",
    long_about = "Parses REB seismic bulletins (event header, origin, magnitudes and \
                  station arrivals) into structured events. Inputs may be files, \
                  directories or glob patterns; each bulletin becomes one JSON document \
                  in the output directory, or one JSON line on stdout."
)]
pub struct Args {
    /// Bulletin files, directories or glob patterns
    #[arg(value_name = "INPUTS", required = true)]
    pub inputs: Vec<String>,

    /// Directory for JSON documents (stdout when omitted)
    #[arg(short = 'o', long = "output", value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON documents
    #[arg(long)]
    pub pretty: bool,

    /// Keep the original bulletin text in the output
    #[arg(long = "include-raw")]
    pub include_raw: bool,

    /// Leave existing JSON documents untouched
    #[arg(long = "no-overwrite")]
    pub no_overwrite: bool,

    /// Only pick up files with these extensions when walking directories
    #[arg(
        short = 'e',
        long = "extension",
        value_name = "EXT",
        value_delimiter = ','
    )]
    pub extensions: Vec<String>,

    /// Number of bulletins parsed concurrently
    #[arg(short = 'j', long = "workers", value_name = "COUNT")]
    pub workers: Option<usize>,

    /// Stop at the first bulletin that fails to parse
    #[arg(long = "fail-fast")]
    pub fail_fast: bool,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Only show errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Args {
    /// Build the processing configuration from the arguments
    pub fn to_config(&self) -> RebConfig {
        let mut config = RebConfig::default().with_extensions(self.extensions.iter().cloned());

        if let Some(workers) = self.workers {
            config = config.with_workers(workers);
        }
        if let Some(output) = &self.output {
            config = config.with_output_directory(output);
        }
        if self.pretty {
            config = config.with_pretty_output();
        }
        if self.include_raw {
            config = config.with_raw_text();
        }
        if self.no_overwrite {
            config = config.without_overwrite();
        }
        if self.fail_fast {
            config = config.with_fail_fast();
        }
        if !self.show_progress() {
            config = config.without_progress();
        }

        config
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        }
    }

    /// Check if we should show progress bars (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("reb_processor={}", log_level)));

    let result = if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
    };

    result.map_err(|e| RebError::configuration(format!("Failed to initialize logging: {}", e)))?;

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}
