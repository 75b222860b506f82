//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Sizing math
//! - Digest primitives and index derivation
//! - Configuration
//! - Counting Bloom filter (add / test / remove)
//! - Presence filter (caller-supplied hash functions)
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - Pure functions where possible

pub mod config;
pub mod counting_bloom;
pub mod hash_functions;
pub mod parameters;
pub mod presence_filter;

pub use config::{CountingBloomConfig, CountingBloomConfigBuilder};
pub use counting_bloom::CountingBloomFilter;
pub use hash_functions::{compute_hash_positions, HashKind};
pub use parameters::{calculate_fpr, estimate_sizing, FilterSizing, MAX_ARRAY_LENGTH};
pub use presence_filter::{build_filter, test_membership, PresenceArray};
