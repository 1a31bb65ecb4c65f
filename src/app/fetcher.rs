//! Paginated catalog fetching
//!
//! Executes a remote search descriptor page by page, in strictly increasing
//! offset order, concatenating results until the service returns a short
//! page (end of the result set) or the accumulated-item ceiling is reached,
//! whichever comes first. Reaching the ceiling is surfaced as a distinct
//! truncation flag rather than silently dropped.
//!
//! At most one fetch sequence is logically current at a time. The caller
//! hands each sequence a [`CancellationToken`]; starting a newer sequence
//! cancels the old token, and the walk observes it at every page-fetch
//! suspension point, so a superseded sequence abandons its in-flight request
//! instead of merely ignoring the response.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::app::models::CatalogEntry;
use crate::app::query::SearchQuery;
use crate::app::source::CatalogSource;
use crate::constants::catalog;
use crate::errors::{FetchError, FetchResult};

/// Result of one complete fetch sequence
#[derive(Debug, Clone)]
pub struct FetchOutcome {
    /// Entries in remote order
    pub entries: Vec<CatalogEntry>,
    /// Whether the ceiling cut the walk short of the full result set
    pub truncated: bool,
    /// Total matching entries reported by the service on the last page
    pub total_hits: usize,
}

/// Walk search pages from `start_offset` until exhaustion or the ceiling
///
/// Pages are requested strictly in increasing offset order; there is no
/// concurrent or out-of-order paging. A cancelled token surfaces as
/// [`FetchError::Cancelled`] and the partial results are discarded.
///
/// # Errors
///
/// Returns the first transport or decode error; the caller decides whether
/// the previous catalog contents survive (additive load) or reset (fresh
/// query).
pub async fn fetch_from<C: CatalogSource>(
    source: &C,
    query: &SearchQuery,
    start_offset: usize,
    cancel: &CancellationToken,
) -> FetchResult<FetchOutcome> {
    let mut entries: Vec<CatalogEntry> = Vec::new();
    let mut offset = start_offset;
    let mut total_hits = 0;

    loop {
        if cancel.is_cancelled() {
            debug!("fetch sequence cancelled before page at offset {offset}");
            return Err(FetchError::Cancelled);
        }

        let windowed = query.at_offset(offset);
        let page = tokio::select! {
            _ = cancel.cancelled() => {
                debug!("fetch sequence cancelled during page at offset {offset}");
                return Err(FetchError::Cancelled);
            }
            page = source.search_page(&windowed) => page?,
        };

        let page_len = page.hits.len();
        total_hits = page.total_hits;
        entries.extend(page.hits.into_iter().map(CatalogEntry::from));
        debug!(offset, page_len, accumulated = entries.len(), "fetched search page");

        if entries.len() >= catalog::MAX_RESULTS {
            entries.truncate(catalog::MAX_RESULTS);
            info!(
                count = entries.len(),
                "result ceiling reached, truncating fetch sequence"
            );
            return Ok(FetchOutcome {
                entries,
                truncated: true,
                total_hits,
            });
        }

        if page_len < query.limit {
            break;
        }
        offset += query.limit;
    }

    info!(count = entries.len(), "fetch sequence complete");
    Ok(FetchOutcome {
        entries,
        truncated: false,
        total_hits,
    })
}
