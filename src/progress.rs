//! Progress reporting utilities using indicatif.
//!
//! This module provides the [`ProgressCallback`] trait, which the scanner and
//! the grouper call at a bounded rate, and [`Progress`], which renders those
//! calls as terminal progress bars. Progress is purely observational: no
//! callback result feeds back into scanning or grouping.

use std::sync::Mutex;
use std::time::Duration;

use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

/// Phase name used by the directory scanner.
pub const PHASE_SCANNING: &str = "scanning";
/// Phase name used by the duplicate grouper.
pub const PHASE_GROUPING: &str = "grouping";

/// Progress callback for the scan and grouping phases.
pub trait ProgressCallback: Send + Sync {
    /// Called when a phase starts.
    ///
    /// # Arguments
    ///
    /// * `phase` - Name of the phase (e.g., "scanning", "grouping")
    /// * `total` - Total number of items to process
    fn on_phase_start(&self, phase: &str, total: usize);

    /// Called when progress has advanced.
    ///
    /// # Arguments
    ///
    /// * `current` - Number of items processed so far
    /// * `message` - Short status line (current folder, files found, ...)
    fn on_progress(&self, current: usize, message: &str);

    /// Called when a phase completes.
    fn on_phase_end(&self, phase: &str);
}

/// Progress callback that discards every notification.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopProgress;

impl ProgressCallback for NoopProgress {
    fn on_phase_start(&self, _phase: &str, _total: usize) {}
    fn on_progress(&self, _current: usize, _message: &str) {}
    fn on_phase_end(&self, _phase: &str) {}
}

/// Progress reporter using indicatif.
///
/// Only one phase is active at a time; starting a new phase replaces the
/// current bar.
pub struct Progress {
    multi: MultiProgress,
    active: Mutex<Option<ProgressBar>>,
    quiet: bool,
}

impl Progress {
    /// Create a new progress reporter.
    ///
    /// # Arguments
    ///
    /// * `quiet` - If true, no progress bars will be displayed.
    ///
    /// # Examples
    ///
    /// ```
    /// use mediadupe::progress::Progress;
    ///
    /// let progress = Progress::new(false);
    /// ```
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self {
            multi: MultiProgress::new(),
            active: Mutex::new(None),
            quiet,
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template(
            "  [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("  {spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
    }

    fn with_active(&self, f: impl FnOnce(&ProgressBar)) {
        if let Ok(active) = self.active.lock() {
            if let Some(pb) = active.as_ref() {
                f(pb);
            }
        }
    }
}

impl ProgressCallback for Progress {
    fn on_phase_start(&self, phase: &str, total: usize) {
        if self.quiet {
            return;
        }

        let pb = if total == 0 {
            let pb = self.multi.add(ProgressBar::new_spinner());
            pb.set_style(Self::spinner_style());
            pb.enable_steady_tick(Duration::from_millis(100));
            pb
        } else {
            let pb = self.multi.add(ProgressBar::new(total as u64));
            pb.set_style(Self::bar_style());
            pb
        };
        pb.set_message(phase.to_string());

        if let Ok(mut active) = self.active.lock() {
            if let Some(previous) = active.replace(pb) {
                previous.finish_and_clear();
            }
        }
    }

    fn on_progress(&self, current: usize, message: &str) {
        if self.quiet {
            return;
        }
        self.with_active(|pb| {
            pb.set_position(current as u64);
            pb.set_message(message.to_string());
        });
    }

    fn on_phase_end(&self, phase: &str) {
        if self.quiet {
            return;
        }
        if let Ok(mut active) = self.active.lock() {
            if let Some(pb) = active.take() {
                pb.finish_with_message(format!("{phase} complete"));
            }
        }
    }
}
