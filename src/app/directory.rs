//! Version and category reference vocabularies
//!
//! Fetches the two small vocabularies that populate the filter controls:
//! supported platform versions (most recent first, stable releases only)
//! and the mod-relevant category ids. Both calls degrade to hardcoded
//! defaults on transport failure so the session stays usable with reduced
//! choices; degradation is surfaced as a non-fatal status flag.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use tracing::warn;

use crate::app::models::GameVersionTag;
use crate::app::source::CatalogSource;
use crate::constants::directory;

/// Platform version vocabulary, most recent first
#[derive(Debug, Clone)]
pub struct VersionListing {
    /// Unique stable version strings in descending numeric-aware order
    pub versions: Vec<String>,
    /// Whether the hardcoded fallback replaced a failed fetch
    pub degraded: bool,
}

impl VersionListing {
    /// The version preselected for a new session: the preferred default
    /// when listed, the most recent otherwise
    pub fn default_version(&self) -> Option<&str> {
        self.versions
            .iter()
            .find(|v| v.as_str() == directory::PREFERRED_VERSION)
            .or_else(|| self.versions.first())
            .map(String::as_str)
    }
}

/// Category vocabulary for filter controls
///
/// Category ids double as display labels on this service. An empty listing
/// leaves the category facet unconstrained ("All").
#[derive(Debug, Clone)]
pub struct CategoryListing {
    /// Allow-listed mod category ids, remote order preserved
    pub categories: Vec<String>,
    /// Whether a failed fetch left only the unconstrained option
    pub degraded: bool,
}

/// Fetch the platform version vocabulary, falling back on failure
pub async fn platform_versions<C: CatalogSource>(source: &C) -> VersionListing {
    match source.game_versions().await {
        Ok(tags) => VersionListing {
            versions: order_versions(tags),
            degraded: false,
        },
        Err(e) => {
            warn!("game version listing unavailable, using fallback: {e}");
            VersionListing {
                versions: directory::FALLBACK_VERSIONS
                    .iter()
                    .map(|v| v.to_string())
                    .collect(),
                degraded: true,
            }
        }
    }
}

/// Fetch the category vocabulary, falling back on failure
pub async fn categories<C: CatalogSource>(source: &C) -> CategoryListing {
    match source.categories().await {
        Ok(tags) => {
            let mut seen = BTreeSet::new();
            let categories = tags
                .into_iter()
                .filter(|t| t.applies_to_mods())
                .filter(|t| directory::CATEGORY_ALLOW_LIST.contains(&t.name.as_str()))
                .filter(|t| seen.insert(t.name.clone()))
                .map(|t| t.name)
                .collect();
            CategoryListing {
                categories,
                degraded: false,
            }
        }
        Err(e) => {
            warn!("category listing unavailable, offering unconstrained only: {e}");
            CategoryListing {
                categories: Vec::new(),
                degraded: true,
            }
        }
    }
}

/// Reduce the raw tag listing to unique stable versions, most recent first
fn order_versions(tags: Vec<GameVersionTag>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut versions: Vec<String> = tags
        .into_iter()
        .filter(|t| t.version_type == "release")
        .filter(|t| seen.insert(t.version.clone()))
        .map(|t| t.version)
        .collect();
    versions.sort_by(|a, b| numeric_aware_cmp(b, a));
    versions
}

/// Numeric-aware lexicographic comparison
///
/// Digit runs compare by value, everything else by character, so "1.20.10"
/// sorts after "1.20.2".
fn numeric_aware_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let na = take_number(&mut ai);
                let nb = take_number(&mut bi);
                match na.cmp(&nb) {
                    Ordering::Equal => {}
                    ord => return ord,
                }
            }
            (Some(ca), Some(cb)) => match ca.cmp(&cb) {
                Ordering::Equal => {
                    ai.next();
                    bi.next();
                }
                ord => return ord,
            },
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> u64 {
    let mut value: u64 = 0;
    while let Some(c) = chars.peek().copied() {
        if let Some(digit) = c.to_digit(10) {
            value = value.saturating_mul(10).saturating_add(u64::from(digit));
            chars.next();
        } else {
            break;
        }
    }
    value
}
