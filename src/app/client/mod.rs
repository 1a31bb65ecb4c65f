//! HTTP client implementation for the Modrinth catalog service
//!
//! This module provides the production [`CatalogSource`] implementation:
//! a rate-limited, retrying HTTP client over the service's search, tag,
//! release-listing, and CDN endpoints.
//!
//! The module is organized into specialized components:
//! - `config`: HTTP client configuration and building
//! - `http`: Core HTTP operations with resilience patterns
//! - `download`: Artifact transfer with atomic writes

use std::path::{Path, PathBuf};

use url::Url;

use crate::app::models::{CategoryTag, GameVersionTag, Loader, Release, ReleaseFile, SearchPage};
use crate::app::query::SearchQuery;
use crate::app::source::CatalogSource;
use crate::constants::api;
use crate::errors::{DirectoryResult, FetchError, FetchResult, TransferResult};

// Module declarations
pub mod config;
pub mod download;
pub mod http;

// Re-export public types for convenience
pub use config::ClientConfig;

use download::TransferHandler;
use http::HttpHandler;

/// HTTP client for the Modrinth catalog service
///
/// Handles rate limiting, retries, and artifact transfers with proper
/// error handling.
#[derive(Debug)]
pub struct ModrinthClient {
    http_handler: HttpHandler,
    base_url: String,
}

impl ModrinthClient {
    /// Creates a client against the public API with default configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if HTTP client creation fails
    pub fn new() -> FetchResult<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client against the public API with custom configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if HTTP client creation fails
    pub fn with_config(config: ClientConfig) -> FetchResult<Self> {
        Self::with_base_url(api::BASE_URL, config)
    }

    /// Creates a client against an alternative API root
    ///
    /// Used when the configuration file points at a mirror.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` if HTTP client creation fails
    pub fn with_base_url(base_url: impl Into<String>, config: ClientConfig) -> FetchResult<Self> {
        let client = config.build_http_client()?;
        let http_handler = HttpHandler::new(client, config.rate_limit_rps)?;

        tracing::debug!("Created Modrinth client");

        Ok(Self {
            http_handler,
            base_url: base_url.into(),
        })
    }

    /// The API root this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> FetchResult<Url> {
        let raw = format!("{}{}", self.base_url.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|_| FetchError::InvalidUrl { url: raw })
    }

    fn search_url(&self, query: &SearchQuery) -> FetchResult<Url> {
        let mut url = self.endpoint(api::SEARCH_PATH)?;
        url.query_pairs_mut().extend_pairs(query.to_query_pairs());
        Ok(url)
    }

    fn releases_url(
        &self,
        entry_id: &str,
        platform_version: &str,
        loader: Loader,
    ) -> FetchResult<Url> {
        let mut url = self.endpoint(&format!("/project/{entry_id}/version"))?;
        // The endpoint expects JSON-encoded string arrays for both filters
        let versions = serde_json::to_string(&[platform_version])
            .expect("version strings always serialize");
        let loaders =
            serde_json::to_string(&[loader.as_str()]).expect("loader strings always serialize");
        url.query_pairs_mut()
            .append_pair("game_versions", &versions)
            .append_pair("loaders", &loaders);
        Ok(url)
    }
}

impl CatalogSource for ModrinthClient {
    async fn search_page(&self, query: &SearchQuery) -> FetchResult<SearchPage> {
        let url = self.search_url(query)?;
        self.http_handler.get_json(&url).await
    }

    async fn game_versions(&self) -> DirectoryResult<Vec<GameVersionTag>> {
        let url = self.endpoint(api::GAME_VERSION_TAG_PATH)?;
        Ok(self.http_handler.get_json(&url).await?)
    }

    async fn categories(&self) -> DirectoryResult<Vec<CategoryTag>> {
        let url = self.endpoint(api::CATEGORY_TAG_PATH)?;
        Ok(self.http_handler.get_json(&url).await?)
    }

    async fn releases(
        &self,
        entry_id: &str,
        platform_version: &str,
        loader: Loader,
    ) -> FetchResult<Vec<Release>> {
        let url = self.releases_url(entry_id, platform_version, loader)?;
        self.http_handler.get_json(&url).await
    }

    async fn transfer(
        &self,
        file: &ReleaseFile,
        dest_dir: &Path,
        force: bool,
    ) -> TransferResult<PathBuf> {
        let transfer_handler = TransferHandler::new(&self.http_handler);
        transfer_handler.transfer(file, dest_dir, force).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::FilterState;
    use crate::app::query::build_search_query;

    fn client() -> ModrinthClient {
        ModrinthClient::new().unwrap()
    }

    #[test]
    fn test_client_creation() {
        let client = client();
        assert_eq!(client.base_url(), api::BASE_URL);
    }

    #[test]
    fn test_search_url_carries_window_and_facets() {
        let client = client();
        let query = build_search_query(&FilterState::new("1.20.1", Loader::Fabric));

        let url = client.search_url(&query).unwrap();
        let rendered = url.as_str();

        assert!(rendered.starts_with("https://api.modrinth.com/v2/search?"));
        assert!(rendered.contains("limit=100"));
        assert!(rendered.contains("offset=0"));
        assert!(rendered.contains("index=relevance"));
        assert!(rendered.contains("facets="));
    }

    #[test]
    fn test_releases_url_encodes_json_arrays() {
        let client = client();
        let url = client
            .releases_url("sodium", "1.20.1", Loader::Fabric)
            .unwrap();
        let rendered = url.as_str();

        assert!(rendered.contains("/project/sodium/version?"));
        // ["1.20.1"] and ["fabric"], percent-encoded
        assert!(rendered.contains("game_versions=%5B%221.20.1%22%5D"));
        assert!(rendered.contains("loaders=%5B%22fabric%22%5D"));
    }

    #[test]
    fn test_base_url_trailing_slash_is_tolerated() {
        let client =
            ModrinthClient::with_base_url("https://staging.example.com/v2/", ClientConfig::default())
                .unwrap();
        let url = client.endpoint(api::SEARCH_PATH).unwrap();
        assert_eq!(url.as_str(), "https://staging.example.com/v2/search");
    }
}
