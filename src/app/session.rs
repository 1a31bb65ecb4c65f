//! Catalog browsing session
//!
//! [`CatalogSession`] is the single owner of the browsing state: the filter
//! state, the catalog view, the selection set, and the cancellation state of
//! the current fetch sequence. The rendering collaborator holds a reference
//! to the session and feeds its interaction events into the methods here;
//! nothing lives in module-level globals.
//!
//! Fetching is split into [`begin_fetch`](CatalogSession::begin_fetch) and
//! [`commit`](CatalogSession::commit) around the suspension point: beginning
//! a sequence cancels the in-flight one and bumps a generation counter, and
//! committing discards any outcome whose generation is no longer current.
//! Out-of-order responses from a slow, superseded query therefore never
//! clobber a newer, faster one.

use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::app::acquire::{self, AcquireObserver, AcquireOptions, BatchReport};
use crate::app::fetcher::{fetch_from, FetchOutcome};
use crate::app::models::{CatalogEntry, FilterState};
use crate::app::query::{build_search_query, SearchQuery};
use crate::app::selection::SelectionSet;
use crate::app::source::CatalogSource;
use crate::app::view::{CatalogView, Debouncer};
use crate::constants::catalog;
use crate::errors::{FetchError, FetchResult};

/// Whether a fetch sequence replaces or extends the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchMode {
    /// Fresh query: replaces `all`, clears the selection
    Fresh,
    /// Page request: appends to `all`, selection preserved
    Additive,
}

/// Handle for one fetch sequence, consumed at commit time
#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
    mode: FetchMode,
    /// Token the sequence observes at its suspension points
    pub cancel: CancellationToken,
    /// Descriptor the sequence walks
    pub query: SearchQuery,
    /// Offset the walk starts at
    pub start_offset: usize,
}

/// User-visible result of a committed fetch sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    /// The catalog now holds `count` entries
    Loaded { count: usize },
    /// The ceiling cut the result set short at `count` entries
    Truncated { count: usize },
    /// The fetch failed; the message is shown to the user
    Failed { message: String },
    /// A newer sequence superseded this one; nothing was committed
    Superseded,
}

impl std::fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loaded { count } => write!(f, "Loaded {count} mods."),
            Self::Truncated { count } => {
                write!(f, "Results truncated at {count} mods; refine your filters.")
            }
            Self::Failed { message } => write!(f, "Failed to fetch mods: {message}"),
            Self::Superseded => write!(f, "superseded by a newer request"),
        }
    }
}

/// One user's catalog browsing state, constructed once per session
#[derive(Debug)]
pub struct CatalogSession<C: CatalogSource> {
    source: C,
    filters: FilterState,
    view: CatalogView,
    selection: SelectionSet,
    generation: u64,
    in_flight: Option<CancellationToken>,
    search_debounce: Debouncer<String>,
}

impl<C: CatalogSource> CatalogSession<C> {
    /// Create a session over the given source and initial filter state
    pub fn new(source: C, filters: FilterState) -> Self {
        let mut view = CatalogView::new();
        view.apply_free_text(&filters.free_text);
        Self {
            source,
            filters,
            view,
            selection: SelectionSet::new(),
            generation: 0,
            in_flight: None,
            search_debounce: Debouncer::new(catalog::SEARCH_DEBOUNCE),
        }
    }

    /// The catalog source this session queries
    pub fn source(&self) -> &C {
        &self.source
    }

    /// Current filter state
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Current catalog view
    pub fn view(&self) -> &CatalogView {
        &self.view
    }

    /// Current selection
    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Begin a new fetch sequence, superseding any in-flight one
    ///
    /// The previous sequence's token is cancelled so its in-flight request
    /// is abandoned at the next suspension point; the generation counter
    /// guarantees its outcome is also rejected at commit time. A fresh
    /// query clears the selection and resets pagination.
    pub fn begin_fetch(&mut self, mode: FetchMode) -> FetchTicket {
        if let Some(token) = self.in_flight.take() {
            debug!("cancelling superseded fetch sequence");
            token.cancel();
        }
        self.generation += 1;

        if mode == FetchMode::Fresh {
            self.selection.clear();
            self.filters.page_cursor = 0;
        }

        let cancel = CancellationToken::new();
        self.in_flight = Some(cancel.clone());

        let start_offset = match mode {
            FetchMode::Fresh => 0,
            FetchMode::Additive => self.filters.page_cursor,
        };

        FetchTicket {
            generation: self.generation,
            mode,
            cancel,
            query: build_search_query(&self.filters),
            start_offset,
        }
    }

    /// Commit a fetch sequence's outcome
    ///
    /// An outcome whose ticket is no longer the current generation is
    /// discarded without touching the view — including errors from
    /// sequences that observed their cancellation.
    pub fn commit(&mut self, ticket: FetchTicket, result: FetchResult<FetchOutcome>) -> FetchStatus {
        if ticket.generation != self.generation {
            debug!(
                stale = ticket.generation,
                current = self.generation,
                "discarding superseded fetch outcome"
            );
            return FetchStatus::Superseded;
        }
        self.in_flight = None;

        match result {
            Ok(outcome) => {
                match ticket.mode {
                    FetchMode::Fresh => self.view.set_all(outcome.entries),
                    FetchMode::Additive => self.view.append(outcome.entries),
                }
                self.filters.page_cursor = self.view.all_len();
                if outcome.truncated {
                    FetchStatus::Truncated {
                        count: self.view.all_len(),
                    }
                } else {
                    FetchStatus::Loaded {
                        count: self.view.all_len(),
                    }
                }
            }
            Err(FetchError::Cancelled) => FetchStatus::Superseded,
            Err(e) => {
                // A failed fresh query resets the catalog; a failed page
                // request leaves the already-loaded entries untouched.
                if ticket.mode == FetchMode::Fresh {
                    self.view.set_all(Vec::new());
                }
                FetchStatus::Failed {
                    message: e.to_string(),
                }
            }
        }
    }

    /// Run one complete fresh fetch for the current filters
    pub async fn reload(&mut self) -> FetchStatus {
        let ticket = self.begin_fetch(FetchMode::Fresh);
        let result = fetch_from(&self.source, &ticket.query, ticket.start_offset, &ticket.cancel).await;
        self.commit(ticket, result)
    }

    /// Replace the filter state and re-query
    ///
    /// Every filter change that reaches this method invalidates the remote
    /// result set; free-text edits go through
    /// [`search_text_changed`](Self::search_text_changed) instead.
    pub async fn filter_changed(&mut self, filters: FilterState) -> FetchStatus {
        self.filters = filters;
        let free_text = self.filters.free_text.clone();
        self.view.apply_free_text(&free_text);
        self.reload().await
    }

    /// Fetch and append the next pages after the current catalog
    pub async fn request_more_pages(&mut self) -> FetchStatus {
        let ticket = self.begin_fetch(FetchMode::Additive);
        let result = fetch_from(&self.source, &ticket.query, ticket.start_offset, &ticket.cancel).await;
        self.commit(ticket, result)
    }

    /// Record a free-text keystroke, coalescing bursts
    ///
    /// The recompute fires through
    /// [`apply_settled_search`](Self::apply_settled_search) once the burst
    /// settles; no remote call is involved.
    pub fn search_text_changed(&mut self, text: &str) {
        self.search_debounce.push(text.to_string());
    }

    /// Wait for the current keystroke burst to settle and apply it
    pub async fn apply_settled_search(&mut self) -> bool {
        let settled = self.search_debounce.settled().await;
        match settled {
            Some(text) => {
                self.apply_search_now(&text);
                true
            }
            None => false,
        }
    }

    /// Apply a free-text query immediately, bypassing the debounce
    ///
    /// Recomputes the shown projection from the already-loaded catalog
    /// only.
    pub fn apply_search_now(&mut self, text: &str) {
        self.filters.free_text = text.to_string();
        self.view.apply_free_text(text);
    }

    /// Flip selection membership for one entry id
    pub fn toggle_select(&mut self, id: &str) -> bool {
        self.selection.toggle(id)
    }

    /// Select every currently shown entry
    pub fn select_all(&mut self) {
        self.selection.select_all(self.view.shown_ids());
    }

    /// Clear the selection
    pub fn clear_selection(&mut self) {
        self.selection.deselect_all();
    }

    /// Whether the select-all control should read as "deselect all"
    pub fn all_shown_selected(&self) -> bool {
        self.selection.all_shown_selected(self.view.shown_ids())
    }

    /// Selected entries in shown order, ready for acquisition
    pub fn selected_entries(&self) -> Vec<CatalogEntry> {
        self.view
            .shown()
            .filter(|e| self.selection.is_selected(&e.id))
            .cloned()
            .collect()
    }

    /// Acquire every selected entry sequentially
    ///
    /// Entries are processed in shown order, not selection-insertion order.
    /// The caller disables the trigger control while this is in flight.
    pub async fn acquire_selected<O: AcquireObserver>(
        &self,
        options: &AcquireOptions,
        observer: &mut O,
    ) -> BatchReport {
        let entries = self.selected_entries();
        acquire::acquire(
            &self.source,
            &entries,
            &self.filters.platform_version,
            self.filters.loader,
            options,
            observer,
        )
        .await
    }
}
