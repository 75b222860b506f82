//! # Counting Bloom Filter
//!
//! Replaces the bits of a classic Bloom filter with counters so elements can
//! be removed:
//! - Add: increment the k counters derived from the element
//! - Test: true if all k counters are non-zero
//! - Remove: if the element tests present, decrement its non-zero counters
//!
//! ## Counter width
//!
//! Counters are `u32`. A slot overflows only after `u32::MAX`
//! (4 294 967 295) increments, i.e. billions of insertions landing on the
//! same slot. Should that ever happen the counter is pinned at `u32::MAX`
//! instead of wrapping to zero.
//!
//! ## Removal hazard
//!
//! Removing an element that was never added, but whose k counters are all
//! non-zero because of other elements, passes the presence check and
//! decrements shared counters. A genuinely present element sharing those
//! slots can then test absent. This is inherent to counting Bloom filters.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::domain::config::CountingBloomConfig;
use crate::domain::hash_functions::{offset_index, HashKind};
use crate::domain::parameters::{calculate_fpr, estimate_sizing};
use crate::error::Result;
use crate::metrics::{MetricsRecorder, NoOpMetrics};

/// Counting Bloom filter with `u32` counters.
///
/// Supports both add AND remove operations. Not thread-safe: mutation takes
/// `&mut self`, wrap it in a `Mutex` to share it.
#[derive(Clone)]
pub struct CountingBloomFilter {
    /// One counter per slot
    counters: Vec<u32>,
    /// Number of index derivations per element
    k: usize,
    /// Size in counters
    m: usize,
    /// Expected number of elements
    capacity: usize,
    /// Target false positive rate at capacity
    fpr: f64,
    /// Digest primitive
    hash: HashKind,
    /// Adds minus effective removes
    n: usize,
    metrics: Arc<dyn MetricsRecorder>,
}

impl CountingBloomFilter {
    /// Create a filter sized for `capacity` elements at `false_positive_rate`,
    /// hashing with MurmurHash3.
    ///
    /// # Errors
    /// Fails if `capacity == 0` or the rate is not strictly between 0 and 1.
    pub fn new(capacity: usize, false_positive_rate: f64) -> Result<Self> {
        Self::with_hash(capacity, false_positive_rate, HashKind::default())
    }

    /// Create a filter with a specific digest primitive.
    pub fn with_hash(capacity: usize, false_positive_rate: f64, hash: HashKind) -> Result<Self> {
        let sizing = estimate_sizing(capacity, false_positive_rate)?;

        debug!(
            capacity,
            fpr = false_positive_rate,
            m = sizing.array_length,
            k = sizing.hash_count,
            hash = ?hash,
            "Created counting bloom filter"
        );

        Ok(Self {
            counters: vec![0u32; sizing.array_length],
            k: sizing.hash_count,
            m: sizing.array_length,
            capacity,
            fpr: false_positive_rate,
            hash,
            n: 0,
            metrics: Arc::new(NoOpMetrics),
        })
    }

    /// Create a filter from a validated configuration.
    pub fn from_config(config: &CountingBloomConfig) -> Result<Self> {
        config.validate()?;
        Self::with_hash(config.capacity, config.false_positive_rate, config.hash_kind)
    }

    /// Attach a metrics recorder.
    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsRecorder>) -> Self {
        metrics.record_filter_created(self.m, self.k, self.capacity);
        self.metrics = metrics;
        self
    }

    /// Add an element (increment counters).
    ///
    /// Adding the same element twice needs two removes to clear it.
    pub fn add(&mut self, element: &[u8]) {
        let digest = self.hash.digest(element);
        for i in 0..self.k {
            let idx = offset_index(digest, i, self.m);
            let counter = &mut self.counters[idx];
            if *counter == u32::MAX {
                warn!(index = idx, "Counter saturated at u32::MAX");
                continue;
            }
            *counter += 1;
        }
        self.n = self.n.saturating_add(1);
        self.metrics.record_insert();
    }

    /// Check if element might be in the filter.
    ///
    /// Returns `false` as soon as one derived counter is zero (definitely
    /// absent), `true` otherwise (possibly present).
    pub fn test(&self, element: &[u8]) -> bool {
        let found = self.contains(element);
        self.metrics.record_lookup(found);
        found
    }

    /// Remove an element (decrement counters).
    ///
    /// No-op if the element tests absent. Returns whether counters were
    /// decremented. See the module docs for the removal hazard.
    pub fn remove(&mut self, element: &[u8]) -> bool {
        if !self.contains(element) {
            trace!("Remove skipped, element not present");
            self.metrics.record_remove(false);
            return false;
        }

        let digest = self.hash.digest(element);
        for i in 0..self.k {
            let idx = offset_index(digest, i, self.m);
            if self.counters[idx] != 0 {
                self.counters[idx] -= 1;
            }
        }
        self.n = self.n.saturating_sub(1);
        self.metrics.record_remove(true);
        true
    }

    fn contains(&self, element: &[u8]) -> bool {
        let digest = self.hash.digest(element);
        (0..self.k).all(|i| self.counters[offset_index(digest, i, self.m)] != 0)
    }

    /// Clear all counters.
    pub fn clear(&mut self) {
        self.counters.fill(0);
        self.n = 0;
        debug!(m = self.m, "Cleared counting bloom filter");
        self.metrics.record_clear();
    }

    /// Number of counter slots (m)
    pub fn array_length(&self) -> usize {
        self.m
    }

    /// Number of index derivations per element (k)
    pub fn hash_count(&self) -> usize {
        self.k
    }

    /// Expected number of elements the filter was sized for
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Target false positive rate the filter was sized for
    pub fn false_positive_rate(&self) -> f64 {
        self.fpr
    }

    pub fn hash_kind(&self) -> HashKind {
        self.hash
    }

    /// Adds minus effective removes
    pub fn elements_count(&self) -> usize {
        self.n
    }

    /// Number of non-zero counters
    pub fn counters_set(&self) -> usize {
        self.counters.iter().filter(|&&c| c != 0).count()
    }

    /// Theoretical false positive rate for the current element count
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k
    ///
    /// The formula assumes independent indices. Offset hashing places an
    /// element's k slots in one contiguous window, so the observed rate at
    /// capacity is noticeably higher.
    pub fn estimated_fpr(&self) -> f64 {
        calculate_fpr(self.m, self.n, self.k)
    }
}

impl fmt::Debug for CountingBloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountingBloomFilter")
            .field("m", &self.m)
            .field("k", &self.k)
            .field("capacity", &self.capacity)
            .field("fpr", &self.fpr)
            .field("hash", &self.hash)
            .field("n", &self.n)
            .field("counters_set", &self.counters_set())
            .finish()
    }
}
