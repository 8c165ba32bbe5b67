use std::io::IsTerminal;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use indicatif::{ProgressBar, ProgressStyle};

/// Progress of a check or apply pass over planned files.
///
/// Drawn on stderr, and hidden in quiet mode or when stderr is not a TTY.
#[derive(Clone)]
pub struct RunProgress {
    progress_bar: ProgressBar,
    processed: Arc<AtomicU64>,
}

impl RunProgress {
    /// Creates a progress bar for `total` files, labelled with `verb` ("Checking", ...).
    #[must_use]
    pub fn new(total: u64, quiet: bool, verb: &str) -> Self {
        let is_tty = std::io::stderr().is_terminal();
        Self::new_with_visibility(total, verb, !quiet && is_tty)
    }

    /// A progress bar that never draws.
    #[must_use]
    pub fn hidden() -> Self {
        Self::new_with_visibility(0, "", false)
    }

    fn new_with_visibility(total: u64, verb: &str, visible: bool) -> Self {
        let progress_bar = if visible {
            Self::create_visible_progress_bar(total, verb)
        } else {
            ProgressBar::hidden()
        };

        Self {
            progress_bar,
            processed: Arc::new(AtomicU64::new(0)),
        }
    }

    fn create_visible_progress_bar(total: u64, verb: &str) -> ProgressBar {
        let pb = ProgressBar::new(total);
        let template =
            format!("{{spinner:.green}} {verb} [{{bar:40.cyan/blue}}] {{pos}}/{{len}} files");
        pb.set_style(
            ProgressStyle::default_bar()
                .template(&template)
                // SAFETY: only the verb varies, the placeholders are fixed
                .expect("valid template")
                .progress_chars("█▓░"),
        );
        pb
    }

    /// Marks one more file as processed. Safe to call from rayon workers.
    pub fn inc(&self) {
        let count = self.processed.fetch_add(1, Ordering::Relaxed) + 1;
        self.progress_bar.set_position(count);
    }

    /// Number of files marked processed so far.
    #[must_use]
    pub fn processed(&self) -> u64 {
        self.processed.load(Ordering::Relaxed)
    }

    /// Finishes the progress bar and clears it from the terminal.
    pub fn finish(&self) {
        self.progress_bar.finish_and_clear();
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;
