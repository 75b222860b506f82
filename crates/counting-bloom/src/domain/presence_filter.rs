//! Presence filter built from caller-supplied hash functions
//!
//! The classic, non-counting Bloom filter: a flat array of 0/1 slots built
//! once from a set of elements. The caller owns the hash functions, each
//! mapping bytes to an index already reduced into `[0, m)`. Nothing here
//! hashes on its own and there is no deletion.
//!
//! ```
//! use counting_bloom::{build_filter, test_membership};
//!
//! let m = 64;
//! let h1 = move |data: &[u8]| data.iter().map(|&b| b as usize).sum::<usize>() % m;
//! let h2 = move |data: &[u8]| (data.len() * 7) % m;
//! let hashes: Vec<Box<dyn Fn(&[u8]) -> usize>> = vec![Box::new(h1), Box::new(h2)];
//!
//! let array = build_filter([b"a".as_slice(), b"b".as_slice()], &hashes, m).unwrap();
//! assert!(test_membership(b"a", &array, &hashes));
//! ```

use bitvec::prelude::*;
use tracing::debug;

use crate::error::{FilterError, Result};

/// Read-only array of 0/1 presence slots
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PresenceArray {
    bits: BitVec<u8, Lsb0>,
}

impl PresenceArray {
    /// Number of slots (m)
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Slot value (0 or 1), `None` past the end
    pub fn get(&self, index: usize) -> Option<u8> {
        self.bits.get(index).map(|bit| u8::from(*bit))
    }

    /// Number of slots set to 1
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Slots as a vector of 0/1 values
    pub fn to_slots(&self) -> Vec<u8> {
        self.bits.iter().map(|bit| u8::from(*bit)).collect()
    }

    fn is_set(&self, index: usize) -> bool {
        self.bits.get(index).map(|bit| *bit).unwrap_or(false)
    }
}

/// Build a presence array of `m` slots from `elements`.
///
/// Sets `array[h(element)] = 1` for every element and every hash function.
/// Setting a slot twice is harmless.
///
/// # Errors
/// - [`FilterError::InvalidArrayLength`] if `m == 0`
/// - [`FilterError::IndexOutOfRange`] if a hash function returns an index `>= m`
pub fn build_filter<I, E, H>(elements: I, hash_functions: &[H], m: usize) -> Result<PresenceArray>
where
    I: IntoIterator<Item = E>,
    E: AsRef<[u8]>,
    H: Fn(&[u8]) -> usize,
{
    if m == 0 {
        return Err(FilterError::InvalidArrayLength { len: m });
    }

    let mut bits = bitvec![u8, Lsb0; 0; m];
    let mut count = 0usize;

    for element in elements {
        let data = element.as_ref();
        for hash in hash_functions {
            let index = hash(data);
            if index >= m {
                return Err(FilterError::IndexOutOfRange { index, len: m });
            }
            bits.set(index, true);
        }
        count += 1;
    }

    debug!(
        elements = count,
        hash_functions = hash_functions.len(),
        m,
        slots_set = bits.count_ones(),
        "Built presence filter"
    );

    Ok(PresenceArray { bits })
}

/// Check whether `element` might be in the set `array` was built from.
///
/// False if any hash function lands on an unset slot. An index outside the
/// array counts as unset since `build_filter` never produces one.
pub fn test_membership<H>(element: &[u8], array: &PresenceArray, hash_functions: &[H]) -> bool
where
    H: Fn(&[u8]) -> usize,
{
    hash_functions.iter().all(|hash| array.is_set(hash(element)))
}
