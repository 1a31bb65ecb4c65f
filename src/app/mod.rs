//! Core application logic for Mod Fetcher
//!
//! This module contains the catalog core: the HTTP client, data models,
//! query construction, paginated fetching, the filterable view with its
//! selection set, and the batch acquisition orchestrator — all tied
//! together by the per-session [`CatalogSession`].
//!
//! # Examples
//!
//! ```rust,no_run
//! use mod_fetcher::app::{CatalogSession, FilterState, Loader, ModrinthClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ModrinthClient::new()?;
//! let filters = FilterState::new("1.20.1", Loader::Fabric);
//! let mut session = CatalogSession::new(client, filters);
//!
//! let status = session.reload().await;
//! println!("{status}");
//! for entry in session.view().shown() {
//!     println!("{} — {}", entry.id, entry.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod acquire;
pub mod client;
pub mod directory;
pub mod fetcher;
pub mod models;
pub mod query;
pub mod selection;
pub mod session;
pub mod source;
pub mod view;

// Re-export main public API
pub use acquire::{AcquireObserver, AcquireOptions, BatchReport, ItemOutcome, ItemReport};
pub use client::{ClientConfig, ModrinthClient};
pub use directory::{categories, platform_versions, CategoryListing, VersionListing};
pub use fetcher::{fetch_from, FetchOutcome};
pub use models::{
    CatalogEntry, CategoryTag, FilterState, GameVersionTag, Loader, Release, ReleaseFile,
    SearchHit, SearchPage, SortOrder,
};
pub use query::{build_search_query, SearchQuery};
pub use selection::SelectionSet;
pub use session::{CatalogSession, FetchMode, FetchStatus, FetchTicket};
pub use source::CatalogSource;
pub use view::{CatalogView, Debouncer};
