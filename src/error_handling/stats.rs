//! Validation statistics tracking.
//!
//! Thread-safe counters for a batch run: how many domains passed, how many
//! failed, and how often each kind of error was reported.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::ErrorKind;
use crate::models::ValidationReport;

/// Thread-safe validation statistics tracker.
///
/// All error kinds are initialized to zero on creation, so counters can be
/// updated from concurrent tasks without further allocation.
pub struct ValidationStats {
    passed: AtomicUsize,
    failed: AtomicUsize,
    errors: HashMap<ErrorKind, AtomicUsize>,
}

impl ValidationStats {
    /// Empty counters, one per error kind.
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for kind in ErrorKind::iter() {
            errors.insert(kind, AtomicUsize::new(0));
        }

        ValidationStats {
            passed: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            errors,
        }
    }

    /// Counts the verdict and every error of a finished report.
    pub fn record(&self, report: &ValidationReport) {
        if report.overall_ok() {
            self.passed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
        for kind in report.error_kinds() {
            self.increment_error(kind);
        }
    }

    /// Bumps the counter for `kind`.
    pub fn increment_error(&self, kind: ErrorKind) {
        if let Some(counter) = self.errors.get(&kind) {
            counter.fetch_add(1, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map",
                kind
            );
        }
    }

    /// Current count for `kind`.
    pub fn get_error_count(&self, kind: ErrorKind) -> usize {
        self.errors
            .get(&kind)
            .map(|c| c.load(Ordering::SeqCst))
            .unwrap_or(0)
    }

    /// Domains that passed.
    pub fn passed(&self) -> usize {
        self.passed.load(Ordering::SeqCst)
    }

    /// Domains that failed.
    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// Domains recorded.
    pub fn total(&self) -> usize {
        self.passed() + self.failed()
    }

    /// Errors across all kinds.
    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::SeqCst)).sum()
    }

    /// Non-zero error counts, most frequent first.
    pub fn error_breakdown(&self) -> Vec<(ErrorKind, usize)> {
        let mut counts: Vec<(ErrorKind, usize)> = ErrorKind::iter()
            .map(|kind| (kind, self.get_error_count(kind)))
            .filter(|(_, count)| *count > 0)
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
        counts
    }
}

impl Default for ValidationStats {
    fn default() -> Self {
        Self::new()
    }
}
