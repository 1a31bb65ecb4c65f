//! Batch artifact acquisition
//!
//! Processes the selected entries strictly sequentially, in the order given
//! by the current shown sequence. Each entry resolves its compatible
//! releases, picks the primary artifact of the best-match release, and
//! triggers a transfer; every failure mode is recorded as a per-item
//! outcome and the batch continues to the next entry. A fixed delay follows
//! every attempt so the acquisition channel stays under abuse-prevention
//! thresholds.
//!
//! Re-entrancy is the caller's responsibility: the trigger control is
//! disabled while a batch is in flight.

use std::path::PathBuf;
use std::time::Duration;

use tracing::{info, warn};

use crate::app::models::{CatalogEntry, Loader};
use crate::app::source::CatalogSource;
use crate::constants::acquire as acquire_constants;

/// Outcome of one entry's acquisition attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The artifact was transferred to local storage
    Downloaded { path: PathBuf },
    /// No release is compatible with the target version/loader
    NoCompatibleRelease,
    /// The best-match release carries no recognizable binary artifact
    NoArtifact,
    /// The transfer itself failed
    TransferFailed { detail: String },
}

impl ItemOutcome {
    /// Whether this outcome counts toward the success tally
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Downloaded { .. })
    }

    /// Human-readable failure reason, `None` for successes
    pub fn failure_reason(&self, title: &str) -> Option<String> {
        match self {
            Self::Downloaded { .. } => None,
            Self::NoCompatibleRelease => Some(format!("{title}: no compatible release")),
            Self::NoArtifact => Some(format!("{title}: release has no binary artifact")),
            Self::TransferFailed { detail } => Some(format!("{title}: transfer failed ({detail})")),
        }
    }
}

/// Per-entry record in processing order
#[derive(Debug, Clone)]
pub struct ItemReport {
    pub id: String,
    pub title: String,
    pub outcome: ItemOutcome,
}

/// Aggregated result of a batch acquisition
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub success_count: usize,
    pub failure_count: usize,
    /// Per-item detail, in processing order
    pub items: Vec<ItemReport>,
}

impl BatchReport {
    fn record(&mut self, entry: &CatalogEntry, outcome: ItemOutcome) {
        if outcome.is_success() {
            self.success_count += 1;
        } else {
            self.failure_count += 1;
        }
        self.items.push(ItemReport {
            id: entry.id.clone(),
            title: entry.title.clone(),
            outcome,
        });
    }

    /// Ordered human-readable reasons for every failed item
    pub fn failure_reasons(&self) -> Vec<String> {
        self.items
            .iter()
            .filter_map(|item| item.outcome.failure_reason(&item.title))
            .collect()
    }
}

/// Observer hooks for per-item acquisition progress
///
/// The rendering collaborator implements this to paint progress; `()` is
/// the no-op observer.
pub trait AcquireObserver {
    fn item_started(&mut self, _index: usize, _total: usize, _entry: &CatalogEntry) {}
    fn item_finished(&mut self, _index: usize, _total: usize, _entry: &CatalogEntry, _outcome: &ItemOutcome) {
    }
}

impl AcquireObserver for () {}

/// Options for one batch acquisition run
#[derive(Debug, Clone)]
pub struct AcquireOptions {
    /// Directory artifacts are transferred into
    pub dest_dir: PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// Delay inserted after every attempt
    pub delay: Duration,
}

impl AcquireOptions {
    /// Options transferring into `dest_dir` with the standard delay
    pub fn new(dest_dir: impl Into<PathBuf>) -> Self {
        Self {
            dest_dir: dest_dir.into(),
            force: false,
            delay: acquire_constants::TRANSFER_DELAY,
        }
    }
}

/// Acquire every entry in order, accumulating per-item outcomes
///
/// `entries` must already be in shown order, filtered to the selection.
/// Individual failures never abort the batch.
pub async fn acquire<C, O>(
    source: &C,
    entries: &[CatalogEntry],
    platform_version: &str,
    loader: Loader,
    options: &AcquireOptions,
    observer: &mut O,
) -> BatchReport
where
    C: CatalogSource,
    O: AcquireObserver,
{
    let total = entries.len();
    let mut report = BatchReport::default();
    info!(total, version = platform_version, loader = %loader, "starting batch acquisition");

    for (index, entry) in entries.iter().enumerate() {
        observer.item_started(index, total, entry);

        let outcome = acquire_one(source, entry, platform_version, loader, options).await;
        match &outcome {
            ItemOutcome::Downloaded { path } => {
                info!(id = %entry.id, path = %path.display(), "artifact downloaded");
            }
            failure => {
                warn!(id = %entry.id, ?failure, "acquisition failed for entry");
            }
        }

        observer.item_finished(index, total, entry, &outcome);
        report.record(entry, outcome);

        tokio::time::sleep(options.delay).await;
    }

    info!(
        successes = report.success_count,
        failures = report.failure_count,
        "batch acquisition finished"
    );
    report
}

async fn acquire_one<C: CatalogSource>(
    source: &C,
    entry: &CatalogEntry,
    platform_version: &str,
    loader: Loader,
    options: &AcquireOptions,
) -> ItemOutcome {
    let releases = match source.releases(&entry.id, platform_version, loader).await {
        Ok(releases) => releases,
        Err(e) => {
            return ItemOutcome::TransferFailed {
                detail: format!("release listing failed: {e}"),
            }
        }
    };

    // The transport returns releases most-relevant-first; the first one is
    // the best match and no re-ranking happens here.
    let Some(release) = releases.first() else {
        return ItemOutcome::NoCompatibleRelease;
    };

    let Some(file) = release.primary_artifact() else {
        return ItemOutcome::NoArtifact;
    };

    match source.transfer(file, &options.dest_dir, options.force).await {
        Ok(path) => ItemOutcome::Downloaded { path },
        Err(e) => ItemOutcome::TransferFailed {
            detail: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn entry(id: &str, title: &str) -> CatalogEntry {
        CatalogEntry {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            icon_ref: None,
            download_count: None,
            categories: BTreeSet::new(),
            last_modified: None,
        }
    }

    #[test]
    fn test_report_accounting() {
        let mut report = BatchReport::default();
        report.record(
            &entry("sodium", "Sodium"),
            ItemOutcome::Downloaded {
                path: PathBuf::from("mods/sodium.jar"),
            },
        );
        report.record(&entry("old-mod", "Old Mod"), ItemOutcome::NoCompatibleRelease);
        report.record(
            &entry("flaky", "Flaky"),
            ItemOutcome::TransferFailed {
                detail: "HTTP 500".to_string(),
            },
        );

        assert_eq!(report.success_count, 1);
        assert_eq!(report.failure_count, 2);
        assert_eq!(report.items.len(), 3);
    }

    #[test]
    fn test_failure_reasons_are_ordered_and_skip_successes() {
        let mut report = BatchReport::default();
        report.record(&entry("a", "A"), ItemOutcome::NoCompatibleRelease);
        report.record(
            &entry("b", "B"),
            ItemOutcome::Downloaded {
                path: PathBuf::from("mods/b.jar"),
            },
        );
        report.record(&entry("c", "C"), ItemOutcome::NoArtifact);

        let reasons = report.failure_reasons();
        assert_eq!(reasons.len(), 2);
        assert!(reasons[0].starts_with("A:"));
        assert!(reasons[1].starts_with("C:"));
    }
}
