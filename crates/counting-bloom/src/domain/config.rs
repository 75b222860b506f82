//! Counting Bloom filter configuration and validation
//!
//! # Example
//!
//! ```
//! use counting_bloom::{CountingBloomConfigBuilder, CountingBloomFilter, HashKind};
//!
//! let config = CountingBloomConfigBuilder::new()
//!     .capacity(10_000)
//!     .false_positive_rate(0.001)
//!     .hash_kind(HashKind::Fnv1)
//!     .build()
//!     .expect("Valid config");
//!
//! let filter = CountingBloomFilter::from_config(&config).unwrap();
//! assert_eq!(filter.capacity(), 10_000);
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::hash_functions::HashKind;
use crate::domain::parameters::{estimate_sizing, FilterSizing};
use crate::error::{FilterError, Result};

/// Construction parameters for a [`CountingBloomFilter`](super::CountingBloomFilter)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CountingBloomConfig {
    /// Expected number of elements (n)
    pub capacity: usize,
    /// Target false positive rate at capacity, strictly between 0 and 1
    pub false_positive_rate: f64,
    /// Digest primitive
    #[serde(default)]
    pub hash_kind: HashKind,
}

impl Default for CountingBloomConfig {
    fn default() -> Self {
        Self {
            capacity: 1_000,
            false_positive_rate: 0.01,
            hash_kind: HashKind::Murmur3,
        }
    }
}

impl CountingBloomConfig {
    /// Create a new configuration with validation
    pub fn new(capacity: usize, false_positive_rate: f64, hash_kind: HashKind) -> Result<Self> {
        let config = Self {
            capacity,
            false_positive_rate,
            hash_kind,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate capacity and rate
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(FilterError::InvalidCapacity {
                capacity: self.capacity,
            });
        }

        if !(self.false_positive_rate > 0.0 && self.false_positive_rate < 1.0) {
            return Err(FilterError::InvalidFalsePositiveRate {
                fpr: self.false_positive_rate,
            });
        }

        Ok(())
    }

    /// Sizing derived from this configuration
    pub fn sizing(&self) -> Result<FilterSizing> {
        estimate_sizing(self.capacity, self.false_positive_rate)
    }

    /// Builder-style method to set capacity
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Builder-style method to set the false positive rate
    pub fn with_false_positive_rate(mut self, fpr: f64) -> Self {
        self.false_positive_rate = fpr;
        self
    }

    /// Builder-style method to set the digest primitive
    pub fn with_hash_kind(mut self, hash_kind: HashKind) -> Self {
        self.hash_kind = hash_kind;
        self
    }
}

/// Fluent builder for [`CountingBloomConfig`]; unset fields take the defaults.
#[derive(Default)]
pub struct CountingBloomConfigBuilder {
    capacity: Option<usize>,
    false_positive_rate: Option<f64>,
    hash_kind: Option<HashKind>,
}

impl CountingBloomConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set expected number of elements
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Set target false positive rate
    pub fn false_positive_rate(mut self, fpr: f64) -> Self {
        self.false_positive_rate = Some(fpr);
        self
    }

    /// Set digest primitive
    pub fn hash_kind(mut self, hash_kind: HashKind) -> Self {
        self.hash_kind = Some(hash_kind);
        self
    }

    /// Build the config, validating all parameters
    pub fn build(self) -> Result<CountingBloomConfig> {
        let defaults = CountingBloomConfig::default();

        let config = CountingBloomConfig {
            capacity: self.capacity.unwrap_or(defaults.capacity),
            false_positive_rate: self
                .false_positive_rate
                .unwrap_or(defaults.false_positive_rate),
            hash_kind: self.hash_kind.unwrap_or(defaults.hash_kind),
        };

        config.validate()?;
        Ok(config)
    }
}
