//! Shared simulated catalog service for integration tests
//!
//! The simulated source serves a configurable number of generated entries
//! through the same paged search interface the real service exposes, and
//! records every page request and transfer so tests can assert on request
//! counts, processing order, and partial-failure behavior.

#![allow(dead_code)] // Each test root compiles its own copy of these helpers

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use mod_fetcher::app::{
    CatalogSource, CategoryTag, GameVersionTag, Loader, Release, ReleaseFile, SearchHit,
    SearchPage, SearchQuery,
};
use mod_fetcher::errors::{
    DirectoryResult, FetchError, FetchResult, TransferError, TransferResult,
};

/// Configurable in-memory catalog service
pub struct SimulatedCatalog {
    total_hits: AtomicUsize,
    label: Mutex<String>,
    fail_search: AtomicBool,
    /// Number of search pages served so far
    pub page_requests: AtomicUsize,
    no_release: Mutex<HashSet<String>>,
    no_artifact: Mutex<HashSet<String>>,
    fail_transfer: Mutex<HashSet<String>>,
    transfers: Mutex<Vec<String>>,
}

impl SimulatedCatalog {
    /// A catalog matching `total_hits` entries labelled `mod-<n>`
    pub fn new(total_hits: usize) -> Self {
        Self {
            total_hits: AtomicUsize::new(total_hits),
            label: Mutex::new("mod".to_string()),
            fail_search: AtomicBool::new(false),
            page_requests: AtomicUsize::new(0),
            no_release: Mutex::new(HashSet::new()),
            no_artifact: Mutex::new(HashSet::new()),
            fail_transfer: Mutex::new(HashSet::new()),
            transfers: Mutex::new(Vec::new()),
        }
    }

    /// Change the size of the simulated result set
    pub fn set_total(&self, total_hits: usize) {
        self.total_hits.store(total_hits, Ordering::SeqCst);
    }

    /// Change the id prefix of generated entries
    pub fn set_label(&self, label: &str) {
        *self.label.lock().unwrap() = label.to_string();
    }

    /// Make every subsequent search page fail at the transport layer
    pub fn set_fail_search(&self, fail: bool) {
        self.fail_search.store(fail, Ordering::SeqCst);
    }

    /// Serve an empty release listing for this slug
    pub fn mark_no_release(&self, slug: &str) {
        self.no_release.lock().unwrap().insert(slug.to_string());
    }

    /// Serve a release without any recognizable binary artifact
    pub fn mark_no_artifact(&self, slug: &str) {
        self.no_artifact.lock().unwrap().insert(slug.to_string());
    }

    /// Fail the transfer of this slug's artifact
    pub fn mark_fail_transfer(&self, slug: &str) {
        self.fail_transfer.lock().unwrap().insert(slug.to_string());
    }

    /// Filenames transferred so far, in order
    pub fn transfers(&self) -> Vec<String> {
        self.transfers.lock().unwrap().clone()
    }

    /// Number of search pages served so far
    pub fn pages_served(&self) -> usize {
        self.page_requests.load(Ordering::SeqCst)
    }

    fn hit(&self, index: usize) -> SearchHit {
        let label = self.label.lock().unwrap().clone();
        SearchHit {
            slug: format!("{label}-{index}"),
            title: format!("Mod {index}"),
            description: format!("Description for mod {index}"),
            categories: vec!["utility".to_string()],
            downloads: Some(index as u64),
            icon_url: None,
            date_modified: None,
        }
    }
}

impl CatalogSource for SimulatedCatalog {
    async fn search_page(&self, query: &SearchQuery) -> FetchResult<SearchPage> {
        if self.fail_search.load(Ordering::SeqCst) {
            return Err(FetchError::ServerError { status: 500 });
        }
        self.page_requests.fetch_add(1, Ordering::SeqCst);

        let total = self.total_hits.load(Ordering::SeqCst);
        let start = query.offset.min(total);
        let end = (query.offset + query.limit).min(total);
        let hits = (start..end).map(|i| self.hit(i)).collect();

        Ok(SearchPage {
            hits,
            total_hits: total,
        })
    }

    async fn game_versions(&self) -> DirectoryResult<Vec<GameVersionTag>> {
        Ok(vec![])
    }

    async fn categories(&self) -> DirectoryResult<Vec<CategoryTag>> {
        Ok(vec![])
    }

    async fn releases(
        &self,
        entry_id: &str,
        _platform_version: &str,
        _loader: Loader,
    ) -> FetchResult<Vec<Release>> {
        if self.no_release.lock().unwrap().contains(entry_id) {
            return Ok(vec![]);
        }
        if self.no_artifact.lock().unwrap().contains(entry_id) {
            return Ok(vec![Release {
                name: format!("{entry_id} sources"),
                version_number: "1.0.0".to_string(),
                files: vec![ReleaseFile {
                    url: format!("https://cdn.test/{entry_id}.zip"),
                    filename: format!("{entry_id}.zip"),
                    primary: false,
                }],
            }]);
        }
        Ok(vec![Release {
            name: entry_id.to_string(),
            version_number: "1.0.0".to_string(),
            files: vec![ReleaseFile {
                url: format!("https://cdn.test/{entry_id}.jar"),
                filename: format!("{entry_id}.jar"),
                primary: true,
            }],
        }])
    }

    async fn transfer(
        &self,
        file: &ReleaseFile,
        dest_dir: &Path,
        _force: bool,
    ) -> TransferResult<PathBuf> {
        let slug = file.filename.trim_end_matches(".jar");
        if self.fail_transfer.lock().unwrap().contains(slug) {
            return Err(TransferError::ServerError { status: 500 });
        }
        self.transfers.lock().unwrap().push(file.filename.clone());
        Ok(dest_dir.join(&file.filename))
    }
}
