//! Canonical face registry: one arena entry per physically distinct face.
//!
//! Arbitrary polyhedra arrive as raw face soup — every cell lists its own node
//! loops, wound however the file happened to store them, with shared faces
//! repeated once per side. The registry collapses that soup: `register` maps
//! any rotation of a loop, in either winding, onto a single canonical
//! [`FaceId`], telling the caller which winding it handed in. Classification
//! only; registration never rejects.
//!
//! Lookup is a hash table from the canonical sequence hash to a short collision
//! list, verified by exact sequence comparison, so registration is O(1)
//! amortized in the loop length and canonicalizing a whole domain stays
//! near-linear in its total face-vertex incidences.
//!
//! A registry is scoped to one (mesh, domain) build and dropped with it; only
//! the remap tables outlive the build.

#![forbid(unsafe_code)]

use crate::core::collections::{FaceHashTable, FaceId, FaceNodeBuffer, VertexId};
use crate::core::face::{Face, FaceKind, SignedFace};
use crate::core::util::hashing::stable_hash_sequence;
use crate::core::util::sequences::{reversed_min_first, rotated_min_first};

/// Deduplicating store of canonical faces for one domain build.
///
/// # Examples
///
/// ```
/// use zoomesh::core::face_registry::FaceRegistry;
/// use zoomesh::core::face::SignedFace;
///
/// let mut registry = FaceRegistry::new();
///
/// // A quad face as the first cell stores it
/// let first = registry.register(&[4, 9, 1, 7]);
/// assert_eq!(first, SignedFace::Forward(0));
///
/// // The neighboring cell walks the same loop the other way, from a
/// // different starting vertex: same face, reversed view
/// let second = registry.register(&[9, 4, 7, 1]);
/// assert_eq!(second, SignedFace::Reversed(0));
///
/// assert_eq!(registry.len(), 1);
/// assert_eq!(registry.nodes(0), [1, 7, 4, 9]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct FaceRegistry {
    /// Flat arena of canonical faces; a `FaceId` indexes here.
    faces: Vec<Face>,
    /// Canonical-sequence hash → candidate face ids.
    by_hash: FaceHashTable,
}

impl FaceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry sized for roughly `faces` distinct faces.
    #[must_use]
    pub fn with_capacity(faces: usize) -> Self {
        Self {
            faces: Vec::with_capacity(faces),
            by_hash: crate::core::collections::fast_hash_map_with_capacity(faces),
        }
    }

    /// Registers one raw face loop and returns its signed canonical reference.
    ///
    /// The loop is rotated so its minimum vertex id comes first and looked up
    /// by hash; on a miss the reversed loop is canonicalized and looked up the
    /// same way. Only when both miss is a new face appended, storing the
    /// forward canonical sequence. Degenerate input (fewer than 2 distinct
    /// vertices, repeated ids, even an empty loop) is accepted and stored
    /// as-is — rejecting malformed topology is the build pass's job, not the
    /// registry's.
    pub fn register(&mut self, nodes: &[VertexId]) -> SignedFace {
        let forward = rotated_min_first(nodes);
        let forward_hash = stable_hash_sequence(&forward);
        if let Some(id) = self.find_exact(forward_hash, &forward) {
            return SignedFace::Forward(id);
        }

        let reverse = reversed_min_first(nodes);
        let reverse_hash = stable_hash_sequence(&reverse);
        if let Some(id) = self.find_exact(reverse_hash, &reverse) {
            return SignedFace::Reversed(id);
        }

        let id = self.faces.len();
        self.faces.push(Face::from_canonical(forward));
        self.by_hash.entry(forward_hash).or_default().push(id);
        SignedFace::Forward(id)
    }

    /// Exact-sequence membership test within one hash bucket. Survives 64-bit
    /// hash collisions: the bucket is a candidate list, not an answer.
    fn find_exact(&self, hash: u64, canonical: &FaceNodeBuffer) -> Option<FaceId> {
        let candidates = self.by_hash.get(&hash)?;
        candidates
            .iter()
            .copied()
            .find(|&id| self.faces[id].nodes() == &canonical[..])
    }

    /// The canonical record behind a face id.
    ///
    /// # Panics
    ///
    /// Panics if `id` was not issued by this registry.
    #[must_use]
    pub fn face(&self, id: FaceId) -> &Face {
        &self.faces[id]
    }

    /// The canonical node loop of a face.
    #[must_use]
    pub fn nodes(&self, id: FaceId) -> &[VertexId] {
        self.faces[id].nodes()
    }

    /// Edge/polygon tag of a face.
    #[must_use]
    pub fn kind(&self, id: FaceId) -> FaceKind {
        self.faces[id].kind()
    }

    /// The node loop as the referencing cell sees it: canonical order for a
    /// forward reference, reversed order for a reversed one. A reversed view
    /// walks the same cycle in the opposite direction, starting from the
    /// canonical loop's last vertex.
    #[must_use]
    pub fn view(&self, face: SignedFace) -> FaceNodeBuffer {
        let nodes = self.faces[face.id()].nodes();
        if face.is_reversed() {
            nodes.iter().rev().copied().collect()
        } else {
            nodes.iter().copied().collect()
        }
    }

    /// Number of distinct canonical faces registered so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Returns `true` if nothing has been registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Iterates canonical faces in id order.
    pub fn iter(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        self.faces.iter().enumerate()
    }
}
