//! UI/Progress presentation layer
//!
//! This module handles:
//! - Colour-coded status lines for validation checks
//! - Copy progress for the staging pipeline, via indicatif
//! - Silent reporting for `--quiet` and tests

use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};

use crate::copier::CopyStats;

pub mod display;

/// Progress reporter for the copy pipeline
///
/// One step copies one source folder into one destination.
pub trait CopyReporter {
    /// A copy step is about to start
    fn begin_step(&mut self, src: &Path, dst: &Path);

    /// The current copy step finished
    fn end_step(&mut self, stats: &CopyStats);

    /// Free-form progress note (cleanup, filtering)
    fn note(&mut self, message: &str);

    /// The pipeline finished
    fn finish(&mut self);

    /// The pipeline failed
    fn abandon(&mut self);
}

/// Spinner with the copy lines printed above it
pub struct InteractiveCopyReporter {
    spinner: ProgressBar,
}

impl InteractiveCopyReporter {
    pub fn new() -> Self {
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} [{pos} steps] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(style);
        Self { spinner }
    }

    fn print(&self, line: &str) {
        // Copy lines belong on stdout, ProgressBar::println writes to stderr
        self.spinner.suspend(|| println!("{line}"));
    }
}

impl Default for InteractiveCopyReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyReporter for InteractiveCopyReporter {
    fn begin_step(&mut self, src: &Path, dst: &Path) {
        self.print(&display::copy_line(src, dst));
        self.spinner.set_message(format!("copying {}", src.display()));
    }

    fn end_step(&mut self, stats: &CopyStats) {
        self.spinner.inc(1);
        self.spinner.set_message(format!(
            "{} copied, {} up to date",
            stats.copied, stats.skipped
        ));
    }

    fn note(&mut self, message: &str) {
        self.print(message);
    }

    fn finish(&mut self) {
        self.spinner.finish_and_clear();
    }

    fn abandon(&mut self) {
        self.spinner.abandon();
    }
}

/// Reporter that displays nothing
#[derive(Debug, Default)]
pub struct SilentCopyReporter;

impl CopyReporter for SilentCopyReporter {
    fn begin_step(&mut self, _src: &Path, _dst: &Path) {}

    fn end_step(&mut self, _stats: &CopyStats) {}

    fn note(&mut self, _message: &str) {}

    fn finish(&mut self) {}

    fn abandon(&mut self) {}
}
