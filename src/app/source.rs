//! The catalog service seam
//!
//! Everything the core needs from the remote catalog service is expressed
//! through the [`CatalogSource`] trait: one search page at a time, the two
//! reference vocabularies, per-entry release listings, and artifact
//! transfer. The production implementation is
//! [`ModrinthClient`](crate::app::client::ModrinthClient); tests substitute
//! a simulated catalog.

use std::path::{Path, PathBuf};

use crate::app::models::{CategoryTag, GameVersionTag, Loader, Release, ReleaseFile, SearchPage};
use crate::app::query::SearchQuery;
use crate::errors::{DirectoryResult, FetchResult, TransferResult};

/// Remote catalog service operations
///
/// Implementations are consumed through generics only; all methods suspend
/// at the transport boundary.
#[allow(async_fn_in_trait)]
pub trait CatalogSource {
    /// Fetch a single page of search results for the given descriptor
    async fn search_page(&self, query: &SearchQuery) -> FetchResult<SearchPage>;

    /// Fetch the supported platform version vocabulary
    async fn game_versions(&self) -> DirectoryResult<Vec<GameVersionTag>>;

    /// Fetch the supported category vocabulary
    async fn categories(&self) -> DirectoryResult<Vec<CategoryTag>>;

    /// List releases of an entry compatible with the version/loader pair,
    /// most relevant first
    async fn releases(
        &self,
        entry_id: &str,
        platform_version: &str,
        loader: Loader,
    ) -> FetchResult<Vec<Release>>;

    /// Transfer a release file into `dest_dir` under its declared filename
    ///
    /// Returns the path the artifact was written to.
    async fn transfer(
        &self,
        file: &ReleaseFile,
        dest_dir: &Path,
        force: bool,
    ) -> TransferResult<PathBuf>;
}
