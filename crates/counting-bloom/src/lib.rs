//! # Counting Bloom
//!
//! Fixed-capacity counting Bloom filter for in-memory set membership with
//! deletion, plus a classic presence filter driven by caller-supplied hash
//! functions.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure filter logic, no I/O
//!   - `CountingBloomFilter`: counters with add / test / remove
//!   - `build_filter` / `test_membership`: non-counting presence filter
//!   - `CountingBloomConfig`: Configuration with validation
//!   - `estimate_sizing`: m and k from capacity and target FPR
//! - **Metrics** (`metrics`): optional operation counters
//! - **Errors** (`error`): construction errors
//!
//! ## Invariants
//!
//! - **No false negatives**: an added element tests present until it is removed
//! - Counters never drop below zero
//! - An element maps to the same k slots on every call
//!
//! ## Usage Example
//!
//! ```
//! use counting_bloom::CountingBloomFilter;
//!
//! let mut filter = CountingBloomFilter::new(100, 0.01)?;
//! assert_eq!(filter.array_length(), 959);
//! assert_eq!(filter.hash_count(), 7);
//!
//! filter.add(b"foo");
//! filter.add(b"john");
//! assert!(filter.test(b"foo"));
//!
//! filter.remove(b"john");
//! assert!(!filter.test(b"john"));
//! # Ok::<(), counting_bloom::FilterError>(())
//! ```
//!
//! ## Thread safety
//!
//! Filters are single-owner. Mutation takes `&mut self`; share one across
//! threads behind a `Mutex`.

pub mod domain;
pub mod error;
pub mod metrics;

// Re-exports for convenience
pub use domain::{
    build_filter, estimate_sizing, test_membership, CountingBloomConfig,
    CountingBloomConfigBuilder, CountingBloomFilter, FilterSizing, HashKind, PresenceArray,
};
pub use error::{FilterError, Result};
pub use metrics::{Metrics, MetricsRecorder, MetricsSnapshot, NoOpMetrics};
