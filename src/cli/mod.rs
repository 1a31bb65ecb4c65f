//! Command-line interface components
//!
//! This module contains CLI-specific code for the Mod Fetcher application:
//! argument parsing, command handlers, and progress display. The CLI plays
//! the rendering-collaborator role for the catalog core — it paints the
//! shown sequence with selection membership and translates user actions
//! into session events.

pub mod args;
pub mod commands;
pub mod progress;

pub use args::{Cli, Commands, DownloadArgs, FilterArgs, GlobalArgs, SearchArgs};
pub use commands::{handle_categories, handle_download, handle_search, handle_versions};
pub use progress::{loading_spinner, AcquireProgress};
