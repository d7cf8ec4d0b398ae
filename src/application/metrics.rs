//! Observability metrics for the admission gate.
//!
//! Provides counters describing gate behavior for monitoring and debugging.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Metrics tracking admission statistics.
///
/// All metrics use atomic operations for thread-safe updates and reads.
/// Clones share the same underlying counters, so a handle can be kept
/// outside the gate for reporting.
#[derive(Debug, Clone)]
pub struct GateMetrics {
    inner: Arc<MetricsInner>,
}

#[derive(Debug)]
struct MetricsInner {
    /// Total number of signals admitted
    signals_admitted: AtomicU64,
    /// Total number of signals denied
    signals_denied: AtomicU64,
    /// Total number of stale entries evicted from the window
    entries_evicted: AtomicU64,
}

impl GateMetrics {
    /// Create a new metrics tracker.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(MetricsInner {
                signals_admitted: AtomicU64::new(0),
                signals_denied: AtomicU64::new(0),
                entries_evicted: AtomicU64::new(0),
            }),
        }
    }

    /// Record an admitted signal.
    pub(crate) fn record_admitted(&self) {
        self.inner.signals_admitted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a denied signal.
    pub(crate) fn record_denied(&self) {
        self.inner.signals_denied.fetch_add(1, Ordering::Relaxed);
    }

    /// Record the eviction of a stale window entry.
    pub(crate) fn record_eviction(&self) {
        self.inner.entries_evicted.fetch_add(1, Ordering::Relaxed);
    }

    /// Get the total number of signals admitted.
    pub fn signals_admitted(&self) -> u64 {
        self.inner.signals_admitted.load(Ordering::Relaxed)
    }

    /// Get the total number of signals denied.
    pub fn signals_denied(&self) -> u64 {
        self.inner.signals_denied.load(Ordering::Relaxed)
    }

    /// Get the total number of stale entries evicted.
    pub fn entries_evicted(&self) -> u64 {
        self.inner.entries_evicted.load(Ordering::Relaxed)
    }

    /// Get a snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            signals_admitted: self.signals_admitted(),
            signals_denied: self.signals_denied(),
            entries_evicted: self.entries_evicted(),
        }
    }

    /// Reset all metrics to zero.
    ///
    /// Useful for testing or when starting a new monitoring period.
    pub fn reset(&self) {
        self.inner.signals_admitted.store(0, Ordering::Relaxed);
        self.inner.signals_denied.store(0, Ordering::Relaxed);
        self.inner.entries_evicted.store(0, Ordering::Relaxed);
    }
}

impl Default for GateMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time snapshot of gate metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricsSnapshot {
    /// Total number of signals admitted
    pub signals_admitted: u64,
    /// Total number of signals denied
    pub signals_denied: u64,
    /// Total number of stale entries evicted from the window
    pub entries_evicted: u64,
}

impl MetricsSnapshot {
    /// Calculate the denial rate (0.0 to 1.0).
    ///
    /// Returns the ratio of denied signals to total signals.
    /// Returns 0.0 if no signals have been processed.
    pub fn denial_rate(&self) -> f64 {
        let total = self.total_signals();
        if total == 0 {
            0.0
        } else {
            self.signals_denied as f64 / total as f64
        }
    }

    /// Get the total number of signals processed (admitted + denied).
    pub fn total_signals(&self) -> u64 {
        self.signals_admitted.saturating_add(self.signals_denied)
    }
}
