//! Mod Fetcher CLI application
//!
//! Command-line interface for browsing the Modrinth mod catalog and
//! batch-downloading compatible mod jars with polite request pacing.

use std::process;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use mod_fetcher::cli::{
    handle_categories, handle_download, handle_search, handle_versions, Cli, Commands,
};
use mod_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Initialize logging based on verbosity
    init_logging(&cli);

    info!("Mod Fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    // Execute the appropriate command
    match cli.command {
        Commands::Versions => {
            info!("Executing versions command");
            handle_versions(&cli.global).await
        }
        Commands::Categories => {
            info!("Executing categories command");
            handle_categories(&cli.global).await
        }
        Commands::Search(args) => {
            info!("Executing search command");
            handle_search(args, &cli.global).await
        }
        Commands::Download(args) => {
            info!("Executing download command");
            handle_download(args, &cli.global).await
        }
    }
}

/// Initialize logging based on CLI verbosity settings
fn init_logging(cli: &Cli) {
    let log_level = cli.log_level();

    // Create environment filter
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("mod_fetcher={}", log_level).parse().unwrap());

    // Initialize subscriber
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(cli.global.very_verbose)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
