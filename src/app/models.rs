//! Data models for Mod Fetcher
//!
//! This module defines the core data structures used throughout the
//! application: the immutable catalog entry, the user's filter state, and
//! the wire-format types returned by the catalog service's search, tag, and
//! release endpoints.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{acquire, api};

/// One catalog item, identified by its stable slug
///
/// Entries are immutable once fetched; identity is `id`. They are created by
/// a successful fetch page and dropped the moment a new remote query
/// invalidates the catalog view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    /// Stable slug, unique key
    pub id: String,
    /// Display title
    pub title: String,
    /// Short description
    pub description: String,
    /// Icon URL, when the service provides one
    pub icon_ref: Option<String>,
    /// Lifetime download count
    pub download_count: Option<u64>,
    /// Category ids the entry is tagged with
    pub categories: BTreeSet<String>,
    /// Last modification timestamp
    pub last_modified: Option<DateTime<Utc>>,
}

impl CatalogEntry {
    /// Case-insensitive substring match against title, id, description, or
    /// any category id
    ///
    /// `needle_lower` must already be lowercased; an empty needle matches
    /// everything.
    pub fn matches_free_text(&self, needle_lower: &str) -> bool {
        if needle_lower.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(needle_lower)
            || self.id.to_lowercase().contains(needle_lower)
            || self.description.to_lowercase().contains(needle_lower)
            || self
                .categories
                .iter()
                .any(|c| c.to_lowercase().contains(needle_lower))
    }
}

/// Mod loader constraint for catalog queries and release resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Loader {
    Fabric,
    Forge,
    Quilt,
    NeoForge,
}

impl Loader {
    /// The facet/parameter value the catalog service expects
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fabric => "fabric",
            Self::Forge => "forge",
            Self::Quilt => "quilt",
            Self::NeoForge => "neoforge",
        }
    }
}

impl std::str::FromStr for Loader {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fabric" => Ok(Self::Fabric),
            "forge" => Ok(Self::Forge),
            "quilt" => Ok(Self::Quilt),
            "neoforge" => Ok(Self::NeoForge),
            other => Err(format!(
                "unknown loader '{other}' (expected fabric, forge, quilt, or neoforge)"
            )),
        }
    }
}

impl std::fmt::Display for Loader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sort order for catalog queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortOrder {
    #[default]
    Relevance,
    Downloads,
    Follows,
    Newest,
    Updated,
}

impl SortOrder {
    /// The index parameter value the search endpoint expects
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::Downloads => "downloads",
            Self::Follows => "follows",
            Self::Newest => "newest",
            Self::Updated => "updated",
        }
    }
}

impl std::str::FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "downloads" => Ok(Self::Downloads),
            "follows" => Ok(Self::Follows),
            "newest" => Ok(Self::Newest),
            "updated" => Ok(Self::Updated),
            other => Err(format!(
                "unknown sort order '{other}' (expected relevance, downloads, follows, newest, or updated)"
            )),
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The user's current filter state
///
/// Mutated only by explicit filter actions. Every mutation that is not a
/// free-text edit invalidates the current remote result set, resets
/// pagination to the first page, and clears the selection set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    /// Target platform version (e.g. "1.20.1")
    pub platform_version: String,
    /// Target mod loader
    pub loader: Loader,
    /// Category constraint: empty = unconstrained, non-empty = OR across ids
    pub categories: Vec<String>,
    /// Free-text query, applied locally and forwarded on fresh searches
    pub free_text: String,
    /// Sort order for remote queries
    pub sort: SortOrder,
    /// Offset at which the next additive page load resumes
    pub page_cursor: usize,
}

impl FilterState {
    /// Create a filter state for the given version and loader with no other
    /// constraints
    pub fn new(platform_version: impl Into<String>, loader: Loader) -> Self {
        Self {
            platform_version: platform_version.into(),
            loader,
            categories: Vec::new(),
            free_text: String::new(),
            sort: SortOrder::default(),
            page_cursor: 0,
        }
    }
}

/// One release of a catalog entry, bundling its files
///
/// The release listing endpoint returns releases most-relevant-first; the
/// first one is treated as the best match with no re-ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    /// Release display name
    #[serde(default)]
    pub name: String,
    /// Release version number (e.g. "0.5.1+1.20.1")
    #[serde(default)]
    pub version_number: String,
    /// Files bundled with this release
    #[serde(default)]
    pub files: Vec<ReleaseFile>,
}

impl Release {
    /// Pick the installable binary artifact for this release
    ///
    /// Prefers the file flagged primary; falls back to the first file whose
    /// name carries the expected archive extension. Returns `None` when
    /// neither exists — other packaging formats are not guessed at.
    pub fn primary_artifact(&self) -> Option<&ReleaseFile> {
        self.files
            .iter()
            .find(|f| f.primary)
            .or_else(|| {
                self.files
                    .iter()
                    .find(|f| f.filename.ends_with(acquire::ARCHIVE_EXTENSION))
            })
    }
}

/// A single file within a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseFile {
    /// Download URL
    pub url: String,
    /// Declared filename, used as the local name on transfer
    pub filename: String,
    /// Whether the service flags this file as the primary artifact
    #[serde(default)]
    pub primary: bool,
}

/// One page of search results as returned by the search endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct SearchPage {
    /// Entries on this page, in remote order
    pub hits: Vec<SearchHit>,
    /// Total number of entries matching the query
    #[serde(default)]
    pub total_hits: usize,
}

/// A single search hit in the service's wire format
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    /// Stable slug
    pub slug: String,
    /// Display title
    pub title: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Category ids
    #[serde(default)]
    pub categories: Vec<String>,
    /// Lifetime download count
    #[serde(default)]
    pub downloads: Option<u64>,
    /// Icon URL
    #[serde(default)]
    pub icon_url: Option<String>,
    /// Last modification timestamp
    #[serde(default)]
    pub date_modified: Option<DateTime<Utc>>,
}

impl From<SearchHit> for CatalogEntry {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: hit.slug,
            title: hit.title,
            description: hit.description,
            icon_ref: hit.icon_url,
            download_count: hit.downloads,
            categories: hit.categories.into_iter().collect(),
            last_modified: hit.date_modified,
        }
    }
}

/// One entry of the game-version tag listing
#[derive(Debug, Clone, Deserialize)]
pub struct GameVersionTag {
    /// Version string (e.g. "1.20.1")
    pub version: String,
    /// Release channel ("release", "snapshot", "beta", "alpha")
    #[serde(default)]
    pub version_type: String,
}

/// One entry of the category tag listing
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryTag {
    /// Category id, used as both facet value and display label
    pub name: String,
    /// Project type the category applies to
    #[serde(default)]
    pub project_type: String,
}

impl CategoryTag {
    /// Whether this category applies to the fixed item type this tool
    /// queries for
    pub fn applies_to_mods(&self) -> bool {
        self.project_type == api::PROJECT_TYPE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, title: &str, description: &str, categories: &[&str]) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            icon_ref: None,
            download_count: None,
            categories: categories.iter().map(|c| c.to_string()).collect(),
            last_modified: None,
        }
    }

    fn file(filename: &str, primary: bool) -> ReleaseFile {
        ReleaseFile {
            url: format!("https://cdn.example.com/{filename}"),
            filename: filename.to_string(),
            primary,
        }
    }

    #[test]
    fn test_primary_artifact_prefers_flagged_file() {
        let release = Release {
            name: "Sodium 0.5.1".to_string(),
            version_number: "0.5.1".to_string(),
            files: vec![file("sodium-sources.jar", false), file("sodium.jar", true)],
        };

        assert_eq!(release.primary_artifact().unwrap().filename, "sodium.jar");
    }

    #[test]
    fn test_primary_artifact_falls_back_to_jar_extension() {
        let release = Release {
            name: String::new(),
            version_number: String::new(),
            files: vec![file("readme.txt", false), file("lithium.jar", false)],
        };

        assert_eq!(release.primary_artifact().unwrap().filename, "lithium.jar");
    }

    #[test]
    fn test_primary_artifact_none_when_no_recognizable_file() {
        // Unknown packaging formats are not guessed at
        let release = Release {
            name: String::new(),
            version_number: String::new(),
            files: vec![file("mod.zip", false)],
        };

        assert!(release.primary_artifact().is_none());
    }

    #[test]
    fn test_free_text_matches_all_fields() {
        let e = entry("sodium", "Sodium", "A rendering optimization mod", &["optimization"]);

        assert!(e.matches_free_text("sodium"));
        assert!(e.matches_free_text("rendering"));
        assert!(e.matches_free_text("optimiz"));
        assert!(e.matches_free_text(""));
        assert!(!e.matches_free_text("shader"));
    }

    #[test]
    fn test_free_text_is_case_insensitive_on_entry_fields() {
        let e = entry("create", "Create", "Mechanical CONTRAPTIONS", &[]);

        assert!(e.matches_free_text("contraptions"));
    }

    #[test]
    fn test_loader_round_trip() {
        for loader in [Loader::Fabric, Loader::Forge, Loader::Quilt, Loader::NeoForge] {
            assert_eq!(loader.as_str().parse::<Loader>().unwrap(), loader);
        }
        assert!("rift".parse::<Loader>().is_err());
    }

    #[test]
    fn test_sort_order_round_trip() {
        for sort in [
            SortOrder::Relevance,
            SortOrder::Downloads,
            SortOrder::Follows,
            SortOrder::Newest,
            SortOrder::Updated,
        ] {
            assert_eq!(sort.as_str().parse::<SortOrder>().unwrap(), sort);
        }
    }

    #[test]
    fn test_search_hit_conversion_preserves_identity() {
        let hit = SearchHit {
            slug: "sodium".to_string(),
            title: "Sodium".to_string(),
            description: "desc".to_string(),
            categories: vec!["optimization".to_string(), "utility".to_string()],
            downloads: Some(1000),
            icon_url: None,
            date_modified: None,
        };

        let entry = CatalogEntry::from(hit);
        assert_eq!(entry.id, "sodium");
        assert!(entry.categories.contains("optimization"));
        assert_eq!(entry.download_count, Some(1000));
    }
}
