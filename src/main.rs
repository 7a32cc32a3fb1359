use anyhow::Context;
use clap::Parser;
use reb_processor::cli::{Args, setup_logging};
use reb_processor::processor::{BulletinProcessor, ProcessingStats};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    if let Err(error) = setup_logging(&args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }

    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        let shutdown_signal = async {
            // Without a signal handler we simply never resolve
            if tokio::signal::ctrl_c().await.is_err() {
                std::future::pending::<()>().await;
            }
        };

        tokio::select! {
            result = run(args) => result,
            _ = shutdown_signal => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(anyhow::anyhow!("Processing interrupted by user"))
            }
        }
    });

    match result {
        Ok(stats) if stats.is_successful() => process::exit(0),
        Ok(_) => process::exit(2),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

async fn run(args: Args) -> anyhow::Result<ProcessingStats> {
    let config = args.to_config();
    config.validate().context("Invalid configuration")?;

    let processor = BulletinProcessor::new(args.inputs.clone(), config)
        .context("Failed to set up bulletin processor")?;
    let stats = processor
        .process()
        .await
        .context("Bulletin processing failed")?;

    if !args.quiet {
        stats.print_summary();
    }

    Ok(stats)
}
