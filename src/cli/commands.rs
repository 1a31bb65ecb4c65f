//! Command handlers for the Mod Fetcher CLI
//!
//! This module implements the handlers that coordinate between CLI
//! arguments and the core catalog session: vocabulary listings, catalog
//! search, and batch download. The CLI is the rendering collaborator —
//! it paints the shown sequence and feeds selection events into the
//! session.

use tracing::info;

use crate::app::{
    categories, platform_versions, AcquireOptions, CatalogSession, FilterState, ModrinthClient,
};
use crate::cli::args::{DownloadArgs, FilterArgs, GlobalArgs, SearchArgs};
use crate::cli::progress::{loading_spinner, AcquireProgress};
use crate::config::AppConfig;
use crate::errors::{AppError, Result};

/// Handle the versions command
pub async fn handle_versions(global: &GlobalArgs) -> Result<()> {
    let config = AppConfig::load(global.config.as_deref())?;
    let client = build_client(&config)?;

    let listing = platform_versions(&client).await;
    if listing.degraded {
        println!("(version listing unavailable, showing fallback versions)");
    }
    for version in &listing.versions {
        println!("{version}");
    }
    Ok(())
}

/// Handle the categories command
pub async fn handle_categories(global: &GlobalArgs) -> Result<()> {
    let config = AppConfig::load(global.config.as_deref())?;
    let client = build_client(&config)?;

    let listing = categories(&client).await;
    if listing.degraded {
        println!("(category listing unavailable, only unfiltered search is offered)");
        return Ok(());
    }
    for category in &listing.categories {
        println!("{category}");
    }
    Ok(())
}

/// Handle the search command
///
/// Loads the catalog for the given filters and prints the shown sequence.
pub async fn handle_search(args: SearchArgs, global: &GlobalArgs) -> Result<()> {
    let config = AppConfig::load(global.config.as_deref())?;
    let client = build_client(&config)?;

    let session = load_session(client, &args.filters, global).await?;
    let shown_total = session.view().shown_len();
    let limit = args.limit.unwrap_or(shown_total);

    for entry in session.view().shown().take(limit) {
        let downloads = entry
            .download_count
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        println!("{:<32} {:>12}  {}", entry.id, downloads, entry.title);
    }
    if limit < shown_total {
        println!("... and {} more (use --limit to see them)", shown_total - limit);
    }
    println!(
        "{} of {} loaded mods shown for {} / {}",
        shown_total,
        session.view().all_len(),
        session.filters().platform_version,
        session.filters().loader
    );

    Ok(())
}

/// Handle the download command
///
/// Loads the catalog, applies the requested selection, and acquires every
/// selected mod sequentially.
pub async fn handle_download(args: DownloadArgs, global: &GlobalArgs) -> Result<()> {
    args.validate().map_err(AppError::generic)?;

    let config = AppConfig::load(global.config.as_deref())?;
    let client = build_client(&config)?;

    let mut session = load_session(client, &args.filters, global).await?;

    if args.all {
        session.select_all();
    } else {
        for slug in &args.mods {
            if session.view().all().iter().any(|e| e.id == *slug) {
                session.toggle_select(slug);
            } else {
                println!("not in current results, skipping: {slug}");
            }
        }
    }

    let selected = session.selected_entries();
    if selected.is_empty() {
        println!("Nothing to download.");
        return Ok(());
    }

    let dest_dir = args.output.clone().unwrap_or_else(|| config.download_dir());

    if args.dry_run {
        println!("Dry run - would download {} mods to {}:", selected.len(), dest_dir.display());
        for entry in &selected {
            println!("  {} ({})", entry.title, entry.id);
        }
        return Ok(());
    }

    info!(count = selected.len(), dest = %dest_dir.display(), "starting download batch");

    let options = AcquireOptions {
        dest_dir: dest_dir.clone(),
        force: args.force,
        delay: config.download.transfer_delay,
    };
    let mut progress = AcquireProgress::new(selected.len());
    let report = session.acquire_selected(&options, &mut progress).await;
    progress.finish();

    println!(
        "Done: {} downloaded, {} failed, saved to {}",
        report.success_count,
        report.failure_count,
        dest_dir.display()
    );
    for reason in report.failure_reasons() {
        println!("  {reason}");
    }
    Ok(())
}

/// Build the HTTP client from the effective configuration
fn build_client(config: &AppConfig) -> Result<ModrinthClient> {
    let client_config = config.client_config();
    let client = match &config.network.api_base {
        Some(base) => ModrinthClient::with_base_url(base.clone(), client_config),
        None => ModrinthClient::with_config(client_config),
    }?;
    Ok(client)
}

/// Resolve the target version, build the session, and run the first fetch
async fn load_session(
    client: ModrinthClient,
    filters: &FilterArgs,
    global: &GlobalArgs,
) -> Result<CatalogSession<ModrinthClient>> {
    let platform_version = match &filters.game_version {
        Some(version) => version.clone(),
        None => {
            let listing = platform_versions(&client).await;
            if listing.degraded && !global.quiet {
                println!("(version listing unavailable, using fallback versions)");
            }
            listing
                .default_version()
                .map(str::to_string)
                .ok_or_else(|| AppError::generic("no game versions available"))?
        }
    };

    let mut session = CatalogSession::new(client, filter_state(filters, platform_version));

    let spinner = loading_spinner("Loading mods...");
    let status = session.reload().await;
    spinner.finish_and_clear();

    match &status {
        crate::app::FetchStatus::Failed { .. } => Err(AppError::generic(status.to_string())),
        other => {
            if !global.quiet {
                println!("{other}");
            }
            Ok(session)
        }
    }
}

/// Translate CLI filter arguments into the session's filter state
fn filter_state(filters: &FilterArgs, platform_version: String) -> FilterState {
    FilterState {
        platform_version,
        loader: filters.loader,
        categories: filters.categories.clone(),
        free_text: filters.query.clone().unwrap_or_default(),
        sort: filters.sort,
        page_cursor: 0,
    }
}
