//! Progress display for searches over one or more board sizes

use crate::algorithm::search::{SearchProgress, SearchReport};
use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::LazyLock;
use std::time::Duration;

static SEARCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_spinner()
        .template("{spinner} [{elapsed_precise}] {prefix} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    let template =
        format!("[{{elapsed_precise}}] Sizes: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}}");
    ProgressStyle::default_bar()
        .template(&template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Coordinates progress display across board sizes
///
/// Shows one spinner for the running search and, when more than one size
/// is requested, a batch bar counting completed sizes.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    search_bar: Option<ProgressBar>,
    size_count: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager drawing to stderr
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            search_bar: None,
            size_count: 0,
        }
    }

    /// Create a progress manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(ProgressDrawTarget::hidden()),
            batch_bar: None,
            search_bar: None,
            size_count: 0,
        }
    }

    /// Prepare bars for `size_count` searches
    pub fn initialize(&mut self, size_count: usize) {
        self.size_count = size_count;

        if size_count > 1 {
            let batch_bar = ProgressBar::new(size_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let search_bar = ProgressBar::new_spinner();
        search_bar.set_style(SEARCH_STYLE.clone());
        self.search_bar = Some(self.multi_progress.add(search_bar));
    }

    /// Number of searches the manager was prepared for
    pub const fn size_count(&self) -> usize {
        self.size_count
    }

    /// Test if the spinner is still drawing
    pub fn is_active(&self) -> bool {
        self.search_bar.as_ref().is_some_and(|bar| !bar.is_finished())
    }

    /// Label the spinner for a new search
    pub fn start_size(&self, size: usize) {
        if let Some(ref bar) = self.search_bar {
            bar.set_prefix(format!("N={size}"));
            bar.set_message(String::new());
            bar.enable_steady_tick(Duration::from_millis(100));
        }
    }

    /// Report counters of the running search
    pub fn update_search(&self, progress: &SearchProgress) {
        if let Some(ref bar) = self.search_bar {
            bar.set_message(format!(
                "level {} | {} solutions | {} accesses | {} steps",
                progress.level, progress.solutions, progress.accesses, progress.transitions
            ));
        }
    }

    /// Mark a search as finished
    pub fn complete_size(&self, report: &SearchReport) {
        if let Some(ref bar) = self.search_bar {
            bar.set_message(format!(
                "✓ {} solutions | {} accesses",
                report.solution_count(),
                report.access_count()
            ));
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref bar) = self.search_bar {
            bar.finish_and_clear();
        }
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All sizes searched");
        }
        let _ = self.multi_progress.clear();
    }
}
