//! High-performance collection aliases used throughout the decomposition kernel.
//!
//! Everything here is a thin alias over well-tuned ecosystem types: `FxHashMap`
//! for internal id-keyed maps and `SmallVec` for the short per-face and per-cell
//! buffers that dominate the hot path.

#![forbid(unsafe_code)]

use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet, FxHasher};
use smallvec::SmallVec;

// =============================================================================
// INDEX TYPES
// =============================================================================

/// Dense 0-based index of a vertex within one domain's coordinate arena.
///
/// Synthetic centroid vertices created by fan decomposition are appended after
/// all original vertices, so `id < original_node_count` distinguishes original
/// from synthetic.
pub type VertexId = usize;

/// Dense 0-based index of a cell within one domain's input cell list.
pub type CellId = usize;

/// Dense 0-based index of a canonical face within a [`FaceRegistry`] arena.
///
/// [`FaceRegistry`]: crate::core::face_registry::FaceRegistry
pub type FaceId = usize;

/// Identifier of a mesh domain (block/piece) within a multi-domain mesh.
pub type DomainId = usize;

// =============================================================================
// CORE OPTIMIZED TYPES
// =============================================================================

/// Optimized `HashMap` type for performance-critical operations.
/// Uses `FastHasher` (`rustc_hash::FxHasher`) for faster hashing in non-cryptographic contexts.
///
/// # Security Warning
///
/// Not DoS-resistant: keys here are mesh indices and face hashes from trusted
/// input files, never attacker-controlled data.
///
/// # Examples
///
/// ```rust
/// use zoomesh::core::collections::FastHashMap;
///
/// let mut map: FastHashMap<u64, usize> = FastHashMap::default();
/// map.insert(123, 456);
/// ```
pub type FastHashMap<K, V> = FxHashMap<K, V>;

/// Optimized `HashSet` companion to [`FastHashMap`].
pub type FastHashSet<T> = FxHashSet<T>;

/// Fast non-cryptographic hasher alias for internal collections.
///
/// Wraps [`rustc_hash::FxHasher`] to ensure consistent hashing behavior
/// across [`FastHashMap`] and [`FastHashSet`].
pub type FastHasher = FxHasher;

/// Build hasher that instantiates [`FastHasher`].
pub type FastBuildHasher = FxBuildHasher;

/// Re-export the Entry enum for [`FastHashMap`], for check-and-insert patterns.
/// Since `FxHashMap` uses `std::collections::hash_map::Entry`, we re-export that.
pub use std::collections::hash_map::Entry;

/// Small-optimized Vec that uses stack allocation for small collections.
/// Generic size parameter allows customization per use case.
/// Provides heap fallback for larger collections.
///
/// # Size Guidelines
///
/// - **N=2**: face-hash collision lists (collisions are rare)
/// - **N=4**: face node loops (triangles and quads dominate real meshes)
/// - **N=8**: zoo cell vertex tuples (hexahedron is the largest at 8)
///
/// # Examples
///
/// ```rust
/// use zoomesh::core::collections::SmallBuffer;
///
/// let mut buffer: SmallBuffer<usize, 8> = SmallBuffer::new();
/// for i in 0..5 {
///     buffer.push(i); // All stack allocated
/// }
/// assert!(!buffer.spilled());
/// ```
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;

// =============================================================================
// DOMAIN-SPECIFIC ALIASES
// =============================================================================

/// Node loop of a single face. Inline capacity covers triangles and quads;
/// larger arbitrary faces spill to the heap.
pub type FaceNodeBuffer = SmallBuffer<VertexId, 4>;

/// Vertex tuple of a zoo cell. Never spills: the hexahedron caps this at 8.
pub type CellNodeBuffer = SmallBuffer<VertexId, 8>;

/// Face ids sharing one canonical hash value. Almost always a single entry;
/// genuine 64-bit collisions get appended and resolved by exact comparison.
pub type CollisionList = SmallBuffer<FaceId, 2>;

/// Reverse lookup from canonical face hash to candidate face ids.
///
/// This is the transient table a [`FaceRegistry`] consults on every
/// registration; it is dropped together with the registry when a domain build
/// finishes.
///
/// [`FaceRegistry`]: crate::core::face_registry::FaceRegistry
pub type FaceHashTable = FastHashMap<u64, CollisionList>;

// =============================================================================
// UTILITY FUNCTIONS
// =============================================================================

/// Creates a [`FastHashMap`] with pre-allocated capacity using the optimal hasher.
/// This is more efficient than the default constructor when the expected size is known.
///
/// # Examples
///
/// ```rust
/// use zoomesh::core::collections::fast_hash_map_with_capacity;
///
/// let map = fast_hash_map_with_capacity::<u64, usize>(1000);
/// ```
#[inline]
#[must_use]
pub fn fast_hash_map_with_capacity<K, V>(capacity: usize) -> FastHashMap<K, V> {
    FastHashMap::with_capacity_and_hasher(capacity, FastBuildHasher::default())
}

/// Creates a [`FastHashSet`] with pre-allocated capacity using the optimal hasher.
#[inline]
#[must_use]
pub fn fast_hash_set_with_capacity<T>(capacity: usize) -> FastHashSet<T> {
    FastHashSet::with_capacity_and_hasher(capacity, FastBuildHasher::default())
}
