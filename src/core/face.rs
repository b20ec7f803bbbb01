//! Canonical faces and signed references to them.
//!
//! A cell never owns its faces here: it holds [`SignedFace`] references into a
//! per-domain [`FaceRegistry`] arena, where each physically distinct face is
//! stored exactly once in canonical node order (minimum vertex id first). The
//! sign records which way the referencing cell sees the loop wind — the second
//! cell sharing an interior face always sees it reversed.
//!
//! [`FaceRegistry`]: crate::core::face_registry::FaceRegistry

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};

use crate::core::collections::{FaceId, FaceNodeBuffer, VertexId};

// =============================================================================
// FACE KIND
// =============================================================================

/// Structural class of a canonical face.
///
/// Two-node faces are edges: they only arise when 2D cells are carried in the
/// 3D face-list encoding, and the fan decomposer turns each one into a single
/// triangle instead of walking it as a loop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceKind {
    /// Exactly two stored nodes.
    Edge,
    /// Any other node count, including degenerate ones stored as-is.
    Polygon,
}

impl std::fmt::Display for FaceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Edge => write!(f, "edge"),
            Self::Polygon => write!(f, "polygon"),
        }
    }
}

// =============================================================================
// SIGNED FACE
// =============================================================================

/// One cell's reference to a canonical face, carrying the winding it sees.
///
/// This replaces the classic signed-integer/bit-complement face id trick with
/// an enum the type system can check.
///
/// # Examples
///
/// ```
/// use zoomesh::core::face::SignedFace;
///
/// let seen_forward = SignedFace::Forward(7);
/// let seen_reversed = SignedFace::Reversed(7);
///
/// assert_eq!(seen_forward.id(), seen_reversed.id());
/// assert!(!seen_forward.is_reversed());
/// assert!(seen_reversed.is_reversed());
/// assert_eq!(seen_forward.flipped(), seen_reversed);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignedFace {
    /// The cell sees the canonical node order.
    Forward(FaceId),
    /// The cell sees the canonical loop wound the other way.
    Reversed(FaceId),
}

impl SignedFace {
    /// The canonical face id, winding stripped.
    #[must_use]
    pub const fn id(self) -> FaceId {
        match self {
            Self::Forward(id) | Self::Reversed(id) => id,
        }
    }

    /// Whether this reference sees the loop opposite to canonical order.
    #[must_use]
    pub const fn is_reversed(self) -> bool {
        matches!(self, Self::Reversed(_))
    }

    /// The same face as seen from the other side.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Forward(id) => Self::Reversed(id),
            Self::Reversed(id) => Self::Forward(id),
        }
    }
}

impl std::fmt::Display for SignedFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forward(id) => write!(f, "+{id}"),
            Self::Reversed(id) => write!(f, "-{id}"),
        }
    }
}

// =============================================================================
// FACE
// =============================================================================

/// A canonical face record: the node loop rotated so its minimum id comes first.
///
/// Construction happens only inside the registry, which owns canonicalization;
/// everything else reads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Face {
    nodes: FaceNodeBuffer,
}

impl Face {
    pub(crate) fn from_canonical(nodes: FaceNodeBuffer) -> Self {
        Self { nodes }
    }

    /// The canonical node loop.
    #[must_use]
    pub fn nodes(&self) -> &[VertexId] {
        &self.nodes
    }

    /// Number of stored nodes (not deduplicated: degenerate loops keep their
    /// repeats).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Edge or polygon, by stored node count.
    #[must_use]
    pub fn kind(&self) -> FaceKind {
        if self.nodes.len() == 2 {
            FaceKind::Edge
        } else {
            FaceKind::Polygon
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    #[test]
    fn test_signed_face_accessors() {
        let fwd = SignedFace::Forward(3);
        let rev = SignedFace::Reversed(3);

        assert_eq!(fwd.id(), 3);
        assert_eq!(rev.id(), 3);
        assert!(!fwd.is_reversed());
        assert!(rev.is_reversed());
        assert_eq!(fwd.flipped(), rev);
        assert_eq!(rev.flipped(), fwd);
        assert_ne!(fwd, rev);
    }

    #[test]
    fn test_signed_face_display() {
        assert_eq!(format!("{}", SignedFace::Forward(12)), "+12");
        assert_eq!(format!("{}", SignedFace::Reversed(12)), "-12");
    }

    #[test]
    fn test_face_kind() {
        let edge = Face::from_canonical(smallvec![4, 9]);
        assert_eq!(edge.kind(), FaceKind::Edge);
        assert_eq!(edge.node_count(), 2);

        let tri = Face::from_canonical(smallvec![0, 1, 2]);
        assert_eq!(tri.kind(), FaceKind::Polygon);

        // Degenerate loops are stored as-is and count as polygons
        let degenerate = Face::from_canonical(smallvec![5, 5, 5]);
        assert_eq!(degenerate.kind(), FaceKind::Polygon);
        assert_eq!(degenerate.node_count(), 3);

        assert_eq!(format!("{}", FaceKind::Edge), "edge");
        assert_eq!(format!("{}", FaceKind::Polygon), "polygon");
    }

    #[test]
    fn test_face_serialization_round_trip() {
        let face = Face::from_canonical(smallvec![1, 7, 4, 9]);
        let json = serde_json::to_string(&face).unwrap();
        let back: Face = serde_json::from_str(&json).unwrap();
        assert_eq!(face, back);
    }
}
