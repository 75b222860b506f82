//! Digest primitives and index derivation
//!
//! Each element is hashed once into a 32-bit digest. The k indices are then
//! derived by offsetting: index(i) = (digest + i) mod m.

use std::io::Cursor;

use serde::{Deserialize, Serialize};

/// FNV-1 32-bit offset basis
const FNV32_OFFSET: u32 = 0x811c_9dc5;

/// FNV-1 32-bit prime
const FNV32_PRIME: u32 = 0x0100_0193;

/// 32-bit digest primitive used by a counting filter
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashKind {
    /// MurmurHash3 x86_32, seed 0
    #[default]
    Murmur3,
    /// FNV-1 (multiply, then xor)
    Fnv1,
}

impl HashKind {
    /// Hash the full byte sequence into a 32-bit digest.
    pub fn digest(self, element: &[u8]) -> u32 {
        match self {
            HashKind::Murmur3 => murmur_hash32(element),
            HashKind::Fnv1 => fnv1_hash32(element),
        }
    }
}

/// MurmurHash3 x86_32 with seed 0
pub fn murmur_hash32(element: &[u8]) -> u32 {
    let mut cursor = Cursor::new(element);
    // Reading from an in-memory cursor cannot fail
    murmur3::murmur3_32(&mut cursor, 0).unwrap_or(0)
}

/// FNV-1 32-bit
pub fn fnv1_hash32(element: &[u8]) -> u32 {
    element.iter().fold(FNV32_OFFSET, |hash, &byte| {
        hash.wrapping_mul(FNV32_PRIME) ^ u32::from(byte)
    })
}

/// Index for ordinal `i` of a digest in an array of `m` slots.
///
/// The sum is taken in 64 bits so it never wraps; the result is always in
/// `[0, m)`. `m` must be non-zero.
#[inline]
pub fn offset_index(digest: u32, i: usize, m: usize) -> usize {
    ((u64::from(digest) + i as u64) % m as u64) as usize
}

/// Compute the k indices touched by an element
pub fn compute_hash_positions(kind: HashKind, element: &[u8], k: usize, m: usize) -> Vec<usize> {
    let digest = kind.digest(element);
    (0..k).map(|i| offset_index(digest, i, m)).collect()
}
