//! Cyclic-sequence helpers for face canonicalization.
//!
//! A face loop is a cyclic sequence: `[4, 9, 1, 7]` and `[1, 7, 4, 9]` describe
//! the same face. Canonicalization picks one representative rotation — the one
//! that puts the minimum vertex id first — so that hashing and exact comparison
//! see every physically identical loop the same way. Rotation preserves
//! adjacency; sorting would destroy it and conflate distinct faces that happen
//! to share a vertex set.

#![forbid(unsafe_code)]

use crate::core::collections::{FaceNodeBuffer, VertexId};

/// Rotates a face loop in place so its minimum vertex id comes first.
///
/// The rotation is cyclic: element order is preserved, only the starting point
/// moves. Empty slices are left untouched. With duplicate minimum ids the first
/// occurrence wins, which keeps the result deterministic for any given input
/// (degenerate faces with repeated ids may then canonicalize differently per
/// rotation, matching the store-as-is policy for degenerate input).
///
/// # Examples
///
/// ```
/// use zoomesh::core::util::sequences::rotate_min_first;
///
/// let mut loop_a = vec![4usize, 9, 1, 7];
/// rotate_min_first(&mut loop_a);
/// assert_eq!(loop_a, [1, 7, 4, 9]);
///
/// let mut loop_b = vec![1usize, 7, 4, 9];
/// rotate_min_first(&mut loop_b);
/// assert_eq!(loop_a, loop_b);
/// ```
pub fn rotate_min_first(sequence: &mut [VertexId]) {
    let mut min_pos = 0;
    for (pos, &id) in sequence.iter().enumerate() {
        if id < sequence[min_pos] {
            min_pos = pos;
        }
    }
    sequence.rotate_left(min_pos);
}

/// Returns the canonical rotation of `nodes` without mutating the input.
#[must_use]
pub fn rotated_min_first(nodes: &[VertexId]) -> FaceNodeBuffer {
    let mut out: FaceNodeBuffer = nodes.iter().copied().collect();
    rotate_min_first(&mut out);
    out
}

/// Returns the canonical rotation of the *reversed* loop.
///
/// Used by the registry's reverse lookup: a neighboring cell sees a shared face
/// with opposite winding, and this is the form that winding canonicalizes to.
#[must_use]
pub fn reversed_min_first(nodes: &[VertexId]) -> FaceNodeBuffer {
    let mut out: FaceNodeBuffer = nodes.iter().rev().copied().collect();
    rotate_min_first(&mut out);
    out
}

/// Collects the distinct vertex ids of an id stream, sorted ascending.
///
/// The sorted order makes downstream consumers deterministic: centroid
/// contributor sets and zoo classification counts do not depend on face
/// traversal order.
#[must_use]
pub fn unique_sorted(ids: impl IntoIterator<Item = VertexId>) -> Vec<VertexId> {
    let mut out: Vec<VertexId> = ids.into_iter().collect();
    out.sort_unstable();
    out.dedup();
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotate_min_first_basic() {
        let mut nodes = vec![4usize, 9, 1, 7];
        rotate_min_first(&mut nodes);
        assert_eq!(nodes, [1, 7, 4, 9]);

        // Already canonical stays put
        rotate_min_first(&mut nodes);
        assert_eq!(nodes, [1, 7, 4, 9]);
    }

    #[test]
    fn test_rotate_min_first_all_rotations_agree() {
        let canonical = [2usize, 8, 3, 6, 5];
        for shift in 0..canonical.len() {
            let mut rotated: Vec<VertexId> = canonical.to_vec();
            rotated.rotate_left(shift);
            rotate_min_first(&mut rotated);
            assert_eq!(
                rotated, canonical,
                "rotation by {shift} should canonicalize back"
            );
        }
    }

    #[test]
    fn test_rotate_min_first_edge_cases() {
        let mut empty: Vec<VertexId> = vec![];
        rotate_min_first(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![5usize];
        rotate_min_first(&mut single);
        assert_eq!(single, [5]);

        // Duplicate minimum: first occurrence wins
        let mut dup = vec![3usize, 0, 5, 0];
        rotate_min_first(&mut dup);
        assert_eq!(dup, [0, 5, 0, 3]);
    }

    #[test]
    fn test_reversed_min_first_matches_opposite_winding() {
        // The same physical quad seen from the two adjacent cells
        let from_left = [1usize, 7, 4, 9];
        let from_right = [9usize, 4, 7, 1];
        assert_eq!(rotated_min_first(&from_left), reversed_min_first(&from_right));
    }

    #[test]
    fn test_unique_sorted() {
        let ids = unique_sorted([7usize, 2, 7, 5, 2, 9]);
        assert_eq!(ids, [2, 5, 7, 9]);

        let empty = unique_sorted(std::iter::empty());
        assert!(empty.is_empty());
    }
}
