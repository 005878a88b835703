// jekin - flight check-in window tracker

mod cli;
mod clock;
mod config;
mod countdown;
mod error;
mod itinerary;
mod models;
mod pdb;
mod report;
mod status;
mod timestamp;
mod watch;
mod window;

use clap::Parser;
use std::fs::OpenOptions;
use tracing_subscriber::fmt::writer::MakeWriterExt;

#[tokio::main]
async fn main() {
    // Parse CLI arguments first to get verbose flag
    let args = cli::Cli::parse();

    let log_level = if args.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    let filter = || {
        tracing_subscriber::EnvFilter::from_default_env().add_directive(log_level.into())
    };

    // watch redraws the screen, so its logs go to a file instead of stderr
    let log_file = if args.is_watch() {
        let log_dir = dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("jekin");
        let _ = std::fs::create_dir_all(&log_dir);

        OpenOptions::new()
            .create(true)
            .append(true)
            .open(log_dir.join("jekin.log"))
            .ok()
    } else {
        None
    };

    match log_file {
        Some(file) => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(file.with_max_level(tracing::Level::TRACE))
            .with_ansi(false)
            .init(),
        None => tracing_subscriber::fmt()
            .with_env_filter(filter())
            .with_writer(std::io::stderr)
            .init(),
    }

    if let Err(e) = cli::execute(args).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
