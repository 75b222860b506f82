//! Error types for the counting Bloom filter crate

use thiserror::Error;

/// Result alias used across the crate
pub type Result<T> = std::result::Result<T, FilterError>;

/// Errors raised while constructing filters
///
/// Every variant is a configuration error. Once a filter exists, `add`,
/// `test` and `remove` cannot fail.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid capacity: {capacity} (must be greater than 0)")]
    InvalidCapacity { capacity: usize },

    #[error("Invalid false positive rate: {fpr} (must be strictly between 0 and 1)")]
    InvalidFalsePositiveRate { fpr: f64 },

    #[error("Degenerate filter parameters: m={m}, k={k}")]
    DegenerateParameters { m: usize, k: usize },

    #[error("Invalid array length: {len} (must be greater than 0)")]
    InvalidArrayLength { len: usize },

    #[error("Hash function returned index {index} outside array of length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}
