//! Metrics hooks for counting Bloom filter operations
//!
//! ## Usage
//!
//! ```
//! use std::sync::Arc;
//! use counting_bloom::{CountingBloomFilter, Metrics};
//!
//! let metrics = Arc::new(Metrics::new());
//! let mut filter = CountingBloomFilter::new(100, 0.01)
//!     .unwrap()
//!     .with_metrics(metrics.clone());
//!
//! filter.add(b"alice");
//! assert!(filter.test(b"alice"));
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.elements_inserted, 1);
//! assert_eq!(snapshot.lookups_positive, 1);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics collector for filter operations
///
/// Atomic counters, so one collector can be shared by several filters.
#[derive(Debug, Default)]
pub struct Metrics {
    /// Total filters created
    pub filters_created: AtomicU64,
    /// Total counter slots allocated across filters
    pub slots_allocated: AtomicU64,
    /// Total add calls
    pub elements_inserted: AtomicU64,
    /// Total test calls
    pub lookups_performed: AtomicU64,
    /// Test calls that answered "possibly present"
    pub lookups_positive: AtomicU64,
    /// Remove calls that decremented counters
    pub elements_removed: AtomicU64,
    /// Remove calls skipped because the element was absent
    pub removals_skipped: AtomicU64,
    /// Total clear calls
    pub filters_cleared: AtomicU64,
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record filter creation
    pub fn record_filter_created(&self, array_length: usize, _hash_count: usize, _capacity: usize) {
        self.filters_created.fetch_add(1, Ordering::Relaxed);
        self.slots_allocated
            .fetch_add(array_length as u64, Ordering::Relaxed);
    }

    pub fn record_insert(&self) {
        self.elements_inserted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a membership test; `found` includes false positives
    pub fn record_lookup(&self, found: bool) {
        self.lookups_performed.fetch_add(1, Ordering::Relaxed);
        if found {
            self.lookups_positive.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_remove(&self, removed: bool) {
        if removed {
            self.elements_removed.fetch_add(1, Ordering::Relaxed);
        } else {
            self.removals_skipped.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_clear(&self) {
        self.filters_cleared.fetch_add(1, Ordering::Relaxed);
    }

    /// Get current metrics snapshot
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            filters_created: self.filters_created.load(Ordering::Relaxed),
            slots_allocated: self.slots_allocated.load(Ordering::Relaxed),
            elements_inserted: self.elements_inserted.load(Ordering::Relaxed),
            lookups_performed: self.lookups_performed.load(Ordering::Relaxed),
            lookups_positive: self.lookups_positive.load(Ordering::Relaxed),
            elements_removed: self.elements_removed.load(Ordering::Relaxed),
            removals_skipped: self.removals_skipped.load(Ordering::Relaxed),
            filters_cleared: self.filters_cleared.load(Ordering::Relaxed),
        }
    }

    /// Ratio of positive lookups to total lookups.
    ///
    /// Includes both true positives and false positives.
    pub fn observed_positive_rate(&self) -> f64 {
        let total = self.lookups_performed.load(Ordering::Relaxed);
        let positive = self.lookups_positive.load(Ordering::Relaxed);
        if total > 0 {
            positive as f64 / total as f64
        } else {
            0.0
        }
    }

    /// Reset all counters
    pub fn reset(&self) {
        self.filters_created.store(0, Ordering::Relaxed);
        self.slots_allocated.store(0, Ordering::Relaxed);
        self.elements_inserted.store(0, Ordering::Relaxed);
        self.lookups_performed.store(0, Ordering::Relaxed);
        self.lookups_positive.store(0, Ordering::Relaxed);
        self.elements_removed.store(0, Ordering::Relaxed);
        self.removals_skipped.store(0, Ordering::Relaxed);
        self.filters_cleared.store(0, Ordering::Relaxed);
    }
}

/// Point-in-time metrics snapshot
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub filters_created: u64,
    pub slots_allocated: u64,
    pub elements_inserted: u64,
    pub lookups_performed: u64,
    pub lookups_positive: u64,
    pub elements_removed: u64,
    pub removals_skipped: u64,
    pub filters_cleared: u64,
}

/// Trait for custom metrics recording implementations
///
/// Implement this to forward filter activity to an external metrics system.
pub trait MetricsRecorder: Send + Sync {
    fn record_filter_created(&self, array_length: usize, hash_count: usize, capacity: usize);

    fn record_insert(&self);

    fn record_lookup(&self, found: bool);

    /// `removed` is false when the element was absent and nothing changed
    fn record_remove(&self, removed: bool);

    fn record_clear(&self);
}

/// No-op metrics recorder for when metrics are disabled
#[derive(Debug, Default)]
pub struct NoOpMetrics;

impl MetricsRecorder for NoOpMetrics {
    fn record_filter_created(&self, _: usize, _: usize, _: usize) {}
    fn record_insert(&self) {}
    fn record_lookup(&self, _: bool) {}
    fn record_remove(&self, _: bool) {}
    fn record_clear(&self) {}
}

impl MetricsRecorder for Metrics {
    fn record_filter_created(&self, array_length: usize, hash_count: usize, capacity: usize) {
        Metrics::record_filter_created(self, array_length, hash_count, capacity);
    }

    fn record_insert(&self) {
        Metrics::record_insert(self);
    }

    fn record_lookup(&self, found: bool) {
        Metrics::record_lookup(self, found);
    }

    fn record_remove(&self, removed: bool) {
        Metrics::record_remove(self, removed);
    }

    fn record_clear(&self) {
        Metrics::record_clear(self);
    }
}
