//! Catalog query construction
//!
//! Translates a [`FilterState`] into the canonical remote-query descriptor
//! the search endpoint understands: facet groups (boolean-AND across groups,
//! boolean-OR within a group), an optional free-text term, a sort index, and
//! a `limit`/`offset` page window. Construction is a pure function of the
//! filter state, so re-issuing an identical query is idempotent.

use crate::app::models::{FilterState, SortOrder};
use crate::constants::{api, catalog};

/// An opaque descriptor for one page-window of a catalog search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// Facet groups: AND across groups, OR within a group
    pub facets: Vec<Vec<String>>,
    /// Optional free-text term
    pub term: Option<String>,
    /// Sort order
    pub sort: SortOrder,
    /// Page size
    pub limit: usize,
    /// Page offset
    pub offset: usize,
}

impl SearchQuery {
    /// Copy of this descriptor re-windowed to the given offset
    ///
    /// Used by the paginated fetcher to walk pages without rebuilding the
    /// facet groups.
    pub fn at_offset(&self, offset: usize) -> Self {
        Self {
            offset,
            ..self.clone()
        }
    }

    /// The facet groups in the service's JSON wire encoding
    pub fn facets_json(&self) -> String {
        serde_json::to_string(&self.facets).expect("facet strings always serialize")
    }

    /// Query-string pairs for the search endpoint, in a fixed order
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = vec![
            ("limit", self.limit.to_string()),
            ("offset", self.offset.to_string()),
            ("index", self.sort.as_str().to_string()),
            ("facets", self.facets_json()),
        ];
        if let Some(term) = &self.term {
            pairs.push(("query", term.clone()));
        }
        pairs
    }
}

/// Build the remote-query descriptor for the given filter state
///
/// Encodes the fixed item-type constraint, the platform-version and loader
/// constraints, zero or more category constraints OR-combined in a single
/// group, the free-text term when present, the sort order, and the first
/// page window.
pub fn build_search_query(filters: &FilterState) -> SearchQuery {
    let mut facets = vec![
        vec![format!("project_type:{}", api::PROJECT_TYPE)],
        vec![format!("versions:{}", filters.platform_version)],
        vec![format!("categories:{}", filters.loader.as_str())],
    ];

    if !filters.categories.is_empty() {
        facets.push(
            filters
                .categories
                .iter()
                .map(|c| format!("categories:{c}"))
                .collect(),
        );
    }

    let term = filters.free_text.trim();
    SearchQuery {
        facets,
        term: (!term.is_empty()).then(|| term.to_string()),
        sort: filters.sort,
        limit: catalog::PAGE_SIZE,
        offset: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::Loader;

    fn filters() -> FilterState {
        FilterState::new("1.20.1", Loader::Fabric)
    }

    #[test]
    fn test_fixed_facet_groups() {
        let query = build_search_query(&filters());

        assert_eq!(query.facets[0], vec!["project_type:mod"]);
        assert_eq!(query.facets[1], vec!["versions:1.20.1"]);
        assert_eq!(query.facets[2], vec!["categories:fabric"]);
        assert_eq!(query.facets.len(), 3);
        assert_eq!(query.limit, catalog::PAGE_SIZE);
        assert_eq!(query.offset, 0);
    }

    #[test]
    fn test_categories_combine_into_one_or_group() {
        let mut f = filters();
        f.categories = vec!["optimization".to_string(), "utility".to_string()];

        let query = build_search_query(&f);

        // AND across groups, OR within: both categories share one group
        assert_eq!(query.facets.len(), 4);
        assert_eq!(
            query.facets[3],
            vec!["categories:optimization", "categories:utility"]
        );
    }

    #[test]
    fn test_empty_categories_add_no_group() {
        let query = build_search_query(&filters());
        assert!(query.facets.iter().all(|g| !g[0].starts_with("categories:opt")));
        assert_eq!(query.facets.len(), 3);
    }

    #[test]
    fn test_free_text_term_is_trimmed_and_optional() {
        let mut f = filters();
        f.free_text = "  sodium ".to_string();
        assert_eq!(build_search_query(&f).term.as_deref(), Some("sodium"));

        f.free_text = "   ".to_string();
        assert_eq!(build_search_query(&f).term, None);
    }

    #[test]
    fn test_identical_filter_state_yields_equal_descriptors() {
        let mut f = filters();
        f.categories = vec!["magic".to_string()];
        f.free_text = "wand".to_string();
        f.sort = SortOrder::Downloads;

        assert_eq!(build_search_query(&f), build_search_query(&f));
    }

    #[test]
    fn test_facets_json_wire_shape() {
        let query = build_search_query(&filters());
        assert_eq!(
            query.facets_json(),
            r#"[["project_type:mod"],["versions:1.20.1"],["categories:fabric"]]"#
        );
    }

    #[test]
    fn test_at_offset_changes_only_the_window() {
        let query = build_search_query(&filters());
        let next = query.at_offset(200);

        assert_eq!(next.offset, 200);
        assert_eq!(next.facets, query.facets);
        assert_eq!(next.limit, query.limit);
    }
}
