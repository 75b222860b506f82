//! Counting Bloom filter sizing
//!
//! Formulas:
//! - m = ceil(-n*ln(p) / (ln(2)^2))  -- counter slots
//! - k = ceil((m/n) * ln(2))         -- index derivations per element
//!
//! FPR at capacity: (1 - e^(-kn/m))^k

use std::f64::consts::LN_2;

use crate::error::{FilterError, Result};

/// Largest counter array the index derivation supports (2^31 slots).
pub const MAX_ARRAY_LENGTH: usize = 1 << 31;

/// Derived filter dimensions
#[derive(Clone, Debug, PartialEq)]
pub struct FilterSizing {
    /// Number of counter slots (m)
    pub array_length: usize,
    /// Number of index derivations per element (k)
    pub hash_count: usize,
    /// Theoretical false positive rate once `capacity` elements are stored
    pub expected_fpr: f64,
}

/// Derive `(m, k)` from an expected element count and a target false
/// positive rate.
///
/// Pure: identical inputs always produce identical sizing. Inputs that would
/// yield an unusable filter are rejected instead of producing `m = 0`.
///
/// # Errors
/// - [`FilterError::InvalidCapacity`] if `capacity == 0`
/// - [`FilterError::InvalidFalsePositiveRate`] unless `0 < fpr < 1`
/// - [`FilterError::DegenerateParameters`] if the derived m or k is 0 or
///   m exceeds [`MAX_ARRAY_LENGTH`]
pub fn estimate_sizing(capacity: usize, fpr: f64) -> Result<FilterSizing> {
    if capacity == 0 {
        return Err(FilterError::InvalidCapacity { capacity });
    }
    // Negated comparison so NaN is rejected too
    if !(fpr > 0.0 && fpr < 1.0) {
        return Err(FilterError::InvalidFalsePositiveRate { fpr });
    }

    let n = capacity as f64;
    let ln2_squared = LN_2 * LN_2;

    let m = (-(n * fpr.ln()) / ln2_squared).ceil();
    if !m.is_finite() || m < 1.0 || m > MAX_ARRAY_LENGTH as f64 {
        return Err(FilterError::DegenerateParameters {
            m: if m.is_finite() { m as usize } else { usize::MAX },
            k: 0,
        });
    }
    let m = m as usize;

    let k = ((m as f64 / n) * LN_2).ceil() as usize;
    if k == 0 {
        return Err(FilterError::DegenerateParameters { m, k });
    }

    Ok(FilterSizing {
        array_length: m,
        hash_count: k,
        expected_fpr: calculate_fpr(m, capacity, k),
    })
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
