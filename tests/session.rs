//! Integration tests for the catalog session
//!
//! These tests exercise the session's pagination, cancellation, selection,
//! and view behavior against the simulated catalog service.

mod common;

use common::SimulatedCatalog;
use mod_fetcher::app::{
    fetch_from, CatalogSession, FetchMode, FetchStatus, FilterState, Loader,
};
use mod_fetcher::errors::FetchError;

fn session(total_hits: usize) -> CatalogSession<SimulatedCatalog> {
    CatalogSession::new(
        SimulatedCatalog::new(total_hits),
        FilterState::new("1.20.1", Loader::Fabric),
    )
}

#[tokio::test]
async fn fetch_walks_pages_until_the_short_page() {
    // 250 matches arrive as pages of 100, 100, 50 - and no fourth request
    let mut session = session(250);

    let status = session.reload().await;

    assert_eq!(status, FetchStatus::Loaded { count: 250 });
    assert_eq!(session.view().all_len(), 250);
    assert_eq!(session.source().pages_served(), 3);
}

#[tokio::test]
async fn fetch_stops_at_the_ceiling_and_reports_truncation() {
    // The service would happily serve 1000 entries; the walk caps at 300
    let mut session = session(1000);

    let status = session.reload().await;

    assert_eq!(status, FetchStatus::Truncated { count: 300 });
    assert_eq!(session.view().all_len(), 300);
    assert_eq!(session.source().pages_served(), 3);
}

#[tokio::test]
async fn exact_page_multiple_needs_no_extra_request() {
    // 200 matches: two full pages, then the walk must stop on page three
    // returning empty - never a fourth
    let mut session = session(200);

    let status = session.reload().await;

    assert_eq!(status, FetchStatus::Loaded { count: 200 });
    assert_eq!(session.source().pages_served(), 3);
}

#[tokio::test]
async fn superseded_fetch_is_cancelled_and_never_commits() {
    let mut session = session(50);

    // Sequence A starts, then sequence B supersedes it before A resolves
    let ticket_a = session.begin_fetch(FetchMode::Fresh);
    session.source().set_label("new");
    let ticket_b = session.begin_fetch(FetchMode::Fresh);

    // B resolves first and commits
    let result_b = fetch_from(
        session.source(),
        &ticket_b.query,
        ticket_b.start_offset,
        &ticket_b.cancel,
    )
    .await;
    let status_b = session.commit(ticket_b, result_b);
    assert_eq!(status_b, FetchStatus::Loaded { count: 50 });

    // A's token was cancelled when B began; its walk observes that at the
    // next suspension point instead of issuing more requests
    let result_a = fetch_from(
        session.source(),
        &ticket_a.query,
        ticket_a.start_offset,
        &ticket_a.cancel,
    )
    .await;
    assert!(matches!(result_a, Err(FetchError::Cancelled)));

    let status_a = session.commit(ticket_a, result_a);
    assert_eq!(status_a, FetchStatus::Superseded);

    // Only B's entries were ever committed
    assert!(session.view().all().iter().all(|e| e.id.starts_with("new-")));
}

#[tokio::test]
async fn stale_outcome_is_discarded_at_commit_time() {
    // Even a successful outcome is rejected when its generation is stale
    let mut session = session(10);

    let ticket_stale = session.begin_fetch(FetchMode::Fresh);
    let result_stale = fetch_from(
        session.source(),
        &ticket_stale.query,
        ticket_stale.start_offset,
        &ticket_stale.cancel,
    )
    .await;

    session.source().set_label("current");
    let ticket_current = session.begin_fetch(FetchMode::Fresh);
    let result_current = fetch_from(
        session.source(),
        &ticket_current.query,
        ticket_current.start_offset,
        &ticket_current.cancel,
    )
    .await;
    let status = session.commit(ticket_current, result_current);
    assert_eq!(status, FetchStatus::Loaded { count: 10 });

    // The stale sequence finished successfully before it was superseded,
    // but its commit must not clobber the newer result
    assert_eq!(
        session.commit(ticket_stale, result_stale),
        FetchStatus::Superseded
    );
    assert!(session
        .view()
        .all()
        .iter()
        .all(|e| e.id.starts_with("current-")));
}

#[tokio::test]
async fn filter_change_clears_selection_after_next_fetch() {
    let mut session = session(20);
    session.reload().await;

    session.toggle_select("mod-1");
    session.toggle_select("mod-2");
    assert_eq!(session.selection().len(), 2);

    let mut filters = FilterState::new("1.19.2", Loader::Forge);
    filters.sort = mod_fetcher::app::SortOrder::Downloads;
    let status = session.filter_changed(filters).await;

    assert_eq!(status, FetchStatus::Loaded { count: 20 });
    assert!(session.selection().is_empty());
}

#[tokio::test]
async fn free_text_preserves_selection_and_stays_local() {
    let mut session = session(20);
    session.reload().await;
    session.toggle_select("mod-1");
    session.toggle_select("mod-15");

    let pages_before = session.source().pages_served();
    session.apply_search_now("mod 1");

    // No remote traffic, selection intact even for entries filtered out of
    // the shown projection
    assert_eq!(session.source().pages_served(), pages_before);
    assert!(session.selection().is_selected("mod-1"));
    assert!(session.selection().is_selected("mod-15"));

    // Shown is the matching subsequence of all, in order
    let shown: Vec<&str> = session.view().shown_ids().collect();
    assert!(shown.contains(&"mod-1"));
    assert!(shown.contains(&"mod-15"));
    assert!(!shown.contains(&"mod-2"));
    assert_eq!(session.view().all_len(), 20);
}

#[tokio::test]
async fn additive_page_load_appends_and_preserves_selection() {
    let mut session = session(150);
    session.reload().await;
    assert_eq!(session.view().all_len(), 150);

    session.toggle_select("mod-0");
    session.source().set_total(250);

    let status = session.request_more_pages().await;

    assert_eq!(status, FetchStatus::Loaded { count: 250 });
    assert_eq!(session.view().all_len(), 250);
    assert!(session.selection().is_selected("mod-0"));
}

#[tokio::test]
async fn failed_fresh_query_resets_the_catalog() {
    let mut session = session(50);
    session.reload().await;
    assert_eq!(session.view().all_len(), 50);

    session.source().set_fail_search(true);
    let status = session.reload().await;

    assert!(matches!(status, FetchStatus::Failed { .. }));
    assert_eq!(session.view().all_len(), 0);
}

#[tokio::test]
async fn failed_additive_load_leaves_previous_entries_untouched() {
    let mut session = session(150);
    session.reload().await;
    assert_eq!(session.view().all_len(), 150);

    session.source().set_fail_search(true);
    let status = session.request_more_pages().await;

    assert!(matches!(status, FetchStatus::Failed { .. }));
    assert_eq!(session.view().all_len(), 150);
}

#[tokio::test]
async fn select_all_then_deselect_all_always_yields_empty() {
    let mut session = session(30);
    session.reload().await;

    session.toggle_select("mod-5");
    session.select_all();
    assert_eq!(session.selection().len(), 30);
    assert!(session.all_shown_selected());

    session.clear_selection();
    assert!(session.selection().is_empty());
    assert!(!session.all_shown_selected());
}

#[tokio::test]
async fn select_all_covers_only_the_shown_subsequence() {
    let mut session = session(30);
    session.reload().await;

    session.apply_search_now("mod 1");
    session.select_all();

    // Everything shown is selected, hidden entries are not
    assert!(session.all_shown_selected());
    assert!(session.selection().is_selected("mod-1"));
    assert!(session.selection().is_selected("mod-19"));
    assert!(!session.selection().is_selected("mod-2"));
}

#[tokio::test(start_paused = true)]
async fn keystroke_burst_settles_into_a_single_recompute() {
    let mut session = session(30);
    session.reload().await;

    session.search_text_changed("m");
    session.search_text_changed("mo");
    session.search_text_changed("mod 2");

    assert!(session.apply_settled_search().await);
    assert_eq!(session.filters().free_text, "mod 2");

    let shown: Vec<&str> = session.view().shown_ids().collect();
    assert!(shown.contains(&"mod-2"));
    assert!(!shown.contains(&"mod-3"));
}
