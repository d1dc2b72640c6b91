//! Dispatch metrics for observability
//!
//! Counters for monitoring the facade's health: how many events reached the
//! backends, how many the threshold filtered out, and how many backend calls
//! failed.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters maintained by the dispatcher
///
/// # Example
///
/// ```
/// use rust_logger_facade::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
/// metrics.record_dispatched();
/// metrics.record_filtered();
///
/// assert_eq!(metrics.events_dispatched(), 1);
/// assert_eq!(metrics.events_filtered(), 1);
/// ```
#[derive(Debug)]
pub struct DispatchMetrics {
    /// Events that passed the threshold and were fanned out
    events_dispatched: AtomicU64,

    /// Events dropped by the threshold before any event was built
    events_filtered: AtomicU64,

    /// Individual backend `log` calls that returned an error or panicked
    backend_failures: AtomicU64,

    /// Individual backend flushes that failed
    flush_failures: AtomicU64,
}

impl DispatchMetrics {
    pub const fn new() -> Self {
        Self {
            events_dispatched: AtomicU64::new(0),
            events_filtered: AtomicU64::new(0),
            backend_failures: AtomicU64::new(0),
            flush_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn events_dispatched(&self) -> u64 {
        self.events_dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn events_filtered(&self) -> u64 {
        self.events_filtered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn backend_failures(&self) -> u64 {
        self.backend_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn flush_failures(&self) -> u64 {
        self.flush_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.events_dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_filtered(&self) -> u64 {
        self.events_filtered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_backend_failure(&self) -> u64 {
        self.backend_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_flush_failure(&self) -> u64 {
        self.flush_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of offered events removed by the threshold, in percent
    pub fn filter_rate(&self) -> f64 {
        let filtered = self.events_filtered() as f64;
        let total = self.events_dispatched() as f64 + filtered;
        if total == 0.0 {
            0.0
        } else {
            (filtered / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.events_dispatched.store(0, Ordering::Relaxed);
        self.events_filtered.store(0, Ordering::Relaxed);
        self.backend_failures.store(0, Ordering::Relaxed);
        self.flush_failures.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Snapshot of the current counter values
    fn clone(&self) -> Self {
        Self {
            events_dispatched: AtomicU64::new(self.events_dispatched()),
            events_filtered: AtomicU64::new(self.events_filtered()),
            backend_failures: AtomicU64::new(self.backend_failures()),
            flush_failures: AtomicU64::new(self.flush_failures()),
        }
    }
}
