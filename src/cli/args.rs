//! Command-line argument parsing for Mod Fetcher
//!
//! This module defines the CLI structure using clap derive macros,
//! providing a user-friendly interface for browsing the catalog and
//! batch-downloading mods.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::{Loader, SortOrder};

/// Mod Fetcher - browse and download Minecraft mods from Modrinth
#[derive(Parser, Debug)]
#[command(
    name = "mod_fetcher",
    version,
    about = "Browse the Modrinth mod catalog and batch-download compatible jars",
    long_about = "A tool for browsing the Modrinth mod catalog with version, loader, and
category filters, and downloading the selected mods' jar files sequentially
with polite pacing."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all subcommands
#[derive(Args, Debug)]
pub struct GlobalArgs {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Very verbose logging (debug level)
    #[arg(long, global = true)]
    pub very_verbose: bool,

    /// Quiet mode - suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List supported game versions, most recent first
    Versions,

    /// List mod categories available for filtering
    Categories,

    /// Search the mod catalog
    Search(SearchArgs),

    /// Download selected mods' jar files
    Download(DownloadArgs),
}

/// Catalog filter arguments shared by search and download
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// Target game version (defaults to the most recent stable)
    #[arg(short = 'g', long, value_name = "VERSION")]
    pub game_version: Option<String>,

    /// Target mod loader
    #[arg(short, long, default_value = "fabric")]
    pub loader: Loader,

    /// Category filter; repeat for OR across several categories
    #[arg(short, long = "category", value_name = "CATEGORY")]
    pub categories: Vec<String>,

    /// Free-text query
    #[arg(short = 'Q', long)]
    pub query: Option<String>,

    /// Sort order for results
    #[arg(short, long, default_value = "relevance")]
    pub sort: SortOrder,
}

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Maximum number of results to print
    #[arg(long, value_name = "N")]
    pub limit: Option<usize>,
}

/// Arguments for the download command
#[derive(Args, Debug)]
pub struct DownloadArgs {
    #[command(flatten)]
    pub filters: FilterArgs,

    /// Slugs of the mods to download
    #[arg(value_name = "SLUG")]
    pub mods: Vec<String>,

    /// Download every mod the current filters match
    #[arg(long)]
    pub all: bool,

    /// Output directory (defaults to the configured download directory)
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Force re-download of existing files
    #[arg(short, long)]
    pub force: bool,

    /// Dry run - show what would be downloaded without downloading
    #[arg(long)]
    pub dry_run: bool,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Get the logging level based on global arguments
    pub fn log_level(&self) -> tracing::Level {
        if self.global.quiet {
            tracing::Level::ERROR
        } else if self.global.very_verbose {
            tracing::Level::DEBUG
        } else if self.global.verbose {
            tracing::Level::INFO
        } else {
            tracing::Level::WARN
        }
    }
}

impl DownloadArgs {
    /// Check that the selection arguments make sense together
    pub fn validate(&self) -> Result<(), String> {
        if self.mods.is_empty() && !self.all {
            return Err("Specify mod slugs to download, or --all for every match".to_string());
        }

        if !self.mods.is_empty() && self.all {
            return Err("Cannot combine explicit mod slugs with --all".to_string());
        }

        Ok(())
    }
}
