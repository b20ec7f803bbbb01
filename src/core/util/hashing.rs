//! Hashing utilities.

#![forbid(unsafe_code)]

use crate::core::collections::VertexId;

/// Applies a stable hash function to a face's canonical node sequence.
///
/// This function uses an FNV-based polynomial rolling hash with an avalanche step
/// to produce deterministic hash values. The hash is **order-sensitive**: a face
/// loop and its reverse hash differently, which is exactly what the registry's
/// forward/reverse lookup needs. Callers are expected to rotate the sequence to
/// its canonical form (minimum id first) before hashing, so that all rotations
/// of the same loop collapse to one hash.
///
/// # Arguments
///
/// * `sequence` - Face node ids, already rotated so the minimum id comes first
///
/// # Returns
///
/// A `u64` hash value representing the stable hash of the sequence
///
/// # Algorithm
///
/// Uses FNV constants with polynomial rolling hash:
/// 1. Start with FNV offset basis
/// 2. For each id: `hash = hash.wrapping_mul(PRIME).wrapping_add(id)`
/// 3. Apply avalanche step for better bit distribution
///
/// # Examples
///
/// ```
/// use zoomesh::core::util::hashing::stable_hash_sequence;
///
/// let forward = [0usize, 3, 7, 5];
/// let reverse = [0usize, 5, 7, 3];
///
/// // Opposite windings of the same loop hash differently
/// assert_ne!(stable_hash_sequence(&forward), stable_hash_sequence(&reverse));
///
/// // Identical sequences always agree
/// assert_eq!(stable_hash_sequence(&forward), stable_hash_sequence(&[0, 3, 7, 5]));
/// ```
#[must_use]
pub fn stable_hash_sequence(sequence: &[VertexId]) -> u64 {
    // Hash constants for canonical face key generation (FNV-based)
    const HASH_PRIME: u64 = 1_099_511_628_211; // Large prime (FNV prime)
    const HASH_OFFSET: u64 = 14_695_981_039_346_656_037; // FNV offset basis

    // Handle empty case
    if sequence.is_empty() {
        return 0;
    }

    // Use a polynomial rolling hash for efficient combination
    let mut hash = HASH_OFFSET;
    for &id in sequence {
        hash = hash.wrapping_mul(HASH_PRIME).wrapping_add(id as u64);
    }

    // Apply avalanche step for better bit distribution
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51_afd7_ed55_8ccd);
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    hash ^= hash >> 33;

    hash
}
