//! Progress display for catalog loading and batch acquisition
//!
//! Thin indicatif wrappers: a spinner for the catalog fetch and a bar that
//! implements [`AcquireObserver`] for the sequential download batch. Both
//! degrade to plain log lines when stderr is not a terminal.

use indicatif::{ProgressBar, ProgressStyle};

use crate::app::{AcquireObserver, CatalogEntry, ItemOutcome};

/// Spinner shown while a fetch sequence is walking pages
pub fn loading_spinner(message: &str) -> ProgressBar {
    if !atty::is(atty::Stream::Stderr) {
        return ProgressBar::hidden();
    }
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("spinner template is valid"),
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(120));
    spinner
}

/// Acquisition progress bar, one tick per processed entry
pub struct AcquireProgress {
    bar: ProgressBar,
}

impl AcquireProgress {
    /// Create a bar sized for `total` entries
    pub fn new(total: usize) -> Self {
        let bar = if atty::is(atty::Stream::Stderr) {
            let bar = ProgressBar::new(total as u64);
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                    .expect("bar template is valid")
                    .progress_chars("##-"),
            );
            bar
        } else {
            ProgressBar::hidden()
        };
        Self { bar }
    }

    /// Remove the bar from the terminal
    pub fn finish(self) {
        self.bar.finish_and_clear();
    }
}

impl AcquireObserver for AcquireProgress {
    fn item_started(&mut self, _index: usize, _total: usize, entry: &CatalogEntry) {
        self.bar.set_message(entry.title.clone());
    }

    fn item_finished(
        &mut self,
        _index: usize,
        _total: usize,
        entry: &CatalogEntry,
        outcome: &ItemOutcome,
    ) {
        if let Some(reason) = outcome.failure_reason(&entry.title) {
            self.bar.println(format!("  ✗ {reason}"));
        }
        self.bar.inc(1);
    }
}
