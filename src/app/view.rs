//! Catalog view: the fetched set and its filtered projection
//!
//! [`CatalogView`] owns the full fetched sequence (`all`, remote order
//! preserved) and derives `shown`, the subsequence matching the current
//! free-text predicate. `shown` is recomputed from `all` alone — applying
//! free text never issues a remote call — and is represented as an index
//! subsequence so entries are never cloned or reordered.
//!
//! [`Debouncer`] coalesces rapid free-text edits into a single recompute:
//! each new value cancels any pending timer and schedules a fresh one, so
//! only the last value in a burst is delivered.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::app::models::CatalogEntry;

/// The full fetched catalog and its free-text projection
#[derive(Debug, Default)]
pub struct CatalogView {
    all: Vec<CatalogEntry>,
    shown: Vec<usize>,
    free_text: String,
}

impl CatalogView {
    /// Create an empty view
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full set and recompute the projection
    ///
    /// Used when a fresh remote query commits; the previous entries are
    /// dropped.
    pub fn set_all(&mut self, entries: Vec<CatalogEntry>) {
        self.all = entries;
        self.recompute();
    }

    /// Extend the full set and recompute the projection
    ///
    /// Used when an additive page load commits.
    pub fn append(&mut self, entries: Vec<CatalogEntry>) {
        self.all.extend(entries);
        self.recompute();
    }

    /// Re-derive `shown` for a new free-text query, from `all` only
    pub fn apply_free_text(&mut self, query: &str) {
        self.free_text = query.trim().to_lowercase();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.shown = self
            .all
            .iter()
            .enumerate()
            .filter(|(_, e)| e.matches_free_text(&self.free_text))
            .map(|(i, _)| i)
            .collect();
    }

    /// The full fetched sequence, remote order preserved
    pub fn all(&self) -> &[CatalogEntry] {
        &self.all
    }

    /// The shown subsequence, in `all` order
    pub fn shown(&self) -> impl Iterator<Item = &CatalogEntry> {
        self.shown.iter().map(|&i| &self.all[i])
    }

    /// Ids of the shown subsequence, in `all` order
    pub fn shown_ids(&self) -> impl Iterator<Item = &str> {
        self.shown().map(|e| e.id.as_str())
    }

    /// Number of entries currently shown
    pub fn shown_len(&self) -> usize {
        self.shown.len()
    }

    /// Number of entries fetched
    pub fn all_len(&self) -> usize {
        self.all.len()
    }
}

/// Restartable single-shot timer for coalescing bursts of values
///
/// Each [`push`](Debouncer::push) aborts any pending timer and schedules a
/// fresh one; only the last value in a burst is delivered after the delay
/// elapses undisturbed.
#[derive(Debug)]
pub struct Debouncer<T: Send + 'static> {
    delay: Duration,
    tx: mpsc::UnboundedSender<T>,
    rx: mpsc::UnboundedReceiver<T>,
    timer: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer with the given settle delay
    pub fn new(delay: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            delay,
            tx,
            rx,
            timer: None,
        }
    }

    /// Schedule `value` for delivery, cancelling any pending one
    pub fn push(&mut self, value: T) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
        let tx = self.tx.clone();
        let delay = self.delay;
        self.timer = Some(tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = tx.send(value);
        }));
    }

    /// Wait for the next settled value
    ///
    /// Suspends until a pushed value survives its delay without being
    /// superseded.
    pub async fn settled(&mut self) -> Option<T> {
        self.rx.recv().await
    }

    /// Drain any already-settled value without waiting, last one wins
    pub fn try_settled(&mut self) -> Option<T> {
        let mut latest = None;
        while let Ok(value) = self.rx.try_recv() {
            latest = Some(value);
        }
        latest
    }
}

impl<T: Send + 'static> Drop for Debouncer<T> {
    fn drop(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}
