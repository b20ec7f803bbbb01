//! # zoomesh
//!
//! This is a library for decomposing unstructured meshes whose cells are
//! arbitrary polyhedra or polygons into meshes containing only the canonical
//! "zoo" cell shapes (triangle, quad, tetrahedron, pyramid, wedge,
//! hexahedron), together with the remap tables needed to carry field data
//! onto the decomposed mesh.
//!
//! # Features
//!
//! - Canonical face registry deduplicating face loops across cells in any
//!   rotation or winding
//! - Zoo-shape recognition that recovers hexahedra, wedges, pyramids, and
//!   tetrahedra written as raw face soup, including twisted quad repair
//! - Centroid-fan fallback that splits everything else, so the output is
//!   always zoo-only
//! - Cell and node remap tables with gather/project helpers for scalar,
//!   vector, and label arrays
//! - Per-domain caching of decomposed meshes behind shared handles
//! - Serialization/Deserialization of the data model with [serde](https://serde.rs)
//!
//! # Basic Usage
//!
//! A hexahedron stored as six raw quad loops is recognized and survives as a
//! single cell:
//!
//! ```rust
//! use zoomesh::prelude::*;
//!
//! let source = SourceMesh::new(
//!     0, // domain id
//!     3, // dimensionality
//!     vec![
//!         0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
//!         0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0,
//!     ],
//!     vec![SourceCell::polyhedron(vec![
//!         vec![0, 3, 2, 1],
//!         vec![4, 5, 6, 7],
//!         vec![0, 1, 5, 4],
//!         vec![1, 2, 6, 5],
//!         vec![2, 3, 7, 6],
//!         vec![3, 0, 4, 7],
//!     ])],
//! )
//! .unwrap();
//!
//! let zoo = ZooMesh::decompose(&source);
//!
//! assert_eq!(zoo.cell_count(), 1);
//! assert_eq!(zoo.cells()[0].shape(), ZooShape::Hexahedron);
//! assert!(!zoo.was_split()); // no remapping needed
//! ```
//!
//! # Fan Decomposition and Field Remapping
//!
//! Cells that match no zoo shape are split around a synthetic centroid
//! vertex, and the remap tables carry source field arrays across the split:
//!
//! ```rust
//! use zoomesh::prelude::*;
//!
//! // A hexagonal prism: 12 vertices, two hexagonal caps, six quad sides
//! let mut coords = Vec::new();
//! for z in [0.0, 1.0] {
//!     for k in 0..6 {
//!         let angle = f64::from(k) * std::f64::consts::TAU / 6.0;
//!         coords.extend_from_slice(&[angle.cos(), angle.sin(), z]);
//!     }
//! }
//! let mut faces = vec![vec![0, 5, 4, 3, 2, 1], vec![6, 7, 8, 9, 10, 11]];
//! for k in 0..6usize {
//!     faces.push(vec![k, (k + 1) % 6, (k + 1) % 6 + 6, k + 6]);
//! }
//!
//! let source = SourceMesh::new(0, 3, coords, vec![SourceCell::polyhedron(faces)]).unwrap();
//! let zoo = ZooMesh::decompose(&source);
//!
//! // Each cap fans into 2 pyramids, each side into 1: 10 cells, 1 new vertex
//! assert_eq!(zoo.cell_count(), 10);
//! assert_eq!(zoo.node_count(), 13);
//! assert!(zoo.was_split());
//!
//! // Cell-centered data replicates onto every piece of the split cell
//! let density = [7.25];
//! let density = gather_cell_field(zoo.cell_remap(), &density);
//! assert_eq!(density.len(), 10);
//! assert!(density.iter().all(|&d| d == 7.25));
//!
//! // Node-centered data gains one averaged value for the centroid
//! let temperature: Vec<f64> = (0..12).map(f64::from).collect();
//! let temperature = project_node_field(zoo.node_remap(), &temperature);
//! assert_eq!(temperature.len(), 13);
//! assert_eq!(temperature[12], 5.5);
//! ```
//!
//! ## Carrying field arrays
//!
//! Which helper moves an array depends on what the array is centered on and
//! whether its values may be averaged:
//!
//! | Source array | Helper | Synthetic vertices |
//! |---|---|---|
//! | cell-centered, any clonable type | [`gather_cell_field`](core::remap::gather_cell_field) / [`gather_cell_components`](core::remap::gather_cell_components) | not involved |
//! | node-centered floating point | [`project_node_field`](core::remap::project_node_field) / [`project_node_components`](core::remap::project_node_components) | mean of contributors |
//! | node-centered labels and ids | [`gather_node_labels`](core::remap::gather_node_labels) | caller's fill value |
//!
//! Empty remap tables mean the mesh came through unchanged, and every helper
//! treats them as the identity mapping, so field code does not need to branch
//! on [`ZooMesh::was_split`](core::mesh::ZooMesh::was_split).
//!
//! # Guarantees
//!
//! 1. **The pass is total** - Once a [`SourceMesh`](core::mesh::SourceMesh)
//!    validates, [`ZooMesh::decompose`](core::mesh::ZooMesh::decompose) never
//!    fails. Recognition failures fall back to the fan, and malformed cells
//!    are skipped with a warning while the rest of the domain decomposes.
//!
//! 2. **Output purity** - Every output cell is one of the six zoo shapes;
//!    consumers never see an arbitrary cell.
//!
//! 3. **Index accounting** - The output vertex count is the input count plus
//!    exactly one centroid per fanned cell, the cell remap covers every
//!    output cell whenever any split or skip occurred, and recorded source
//!    indices are monotonic.
//!
//! 4. **Determinism** - The same domain always decomposes to the same mesh.
//!    Face registration order affects internal face ids only, never the
//!    shapes or tuples of the output cells.
//!
//! # Limitations
//!
//! 1. **Projection is not conservative** - Node-centered projection takes a
//!    plain value-space mean at each centroid. It preserves no integral
//!    quantities and is not a substitute for a conservative interpolation.
//!
//! 2. **Recognition is a 3D concern** - Raw 2D polygons always fan, even
//!    triangular ones. Producers that want 2D passthrough tag their cells as
//!    zoo triangles or quads.
//!
//! 3. **No manifold validation** - Face lists are taken at face value; open
//!    or self-intersecting shells still decompose (the fan is total), but the
//!    geometric quality of the result mirrors the input.

// Allow multiple crate versions due to transitive dependencies
#![expect(clippy::multiple_crate_versions)]
// Forbid unsafe code throughout the entire crate
#![forbid(unsafe_code)]

/// The `core` module contains the decomposition pipeline: cell and face data
/// model, the canonical face registry, zoo recognition, the centroid fan, the
/// build pass, and the remap tables with their store.
pub mod core {
    pub mod cell;
    /// High-performance collection types shared across the pipeline
    pub mod collections;
    /// Centroid-fan fallback for cells that match no zoo shape
    pub mod decomposer;
    pub mod face;
    /// Canonical face registry with forward/reverse hash lookup
    pub mod face_registry;
    pub mod mesh;
    /// Zoo-shape recognition for 3D arbitrary cells
    pub mod recognizer;
    pub mod remap;
    /// Per-domain cache of decomposed meshes
    pub mod store;
    pub mod util;
    // Re-export the `core` modules.
    pub use cell::*;
    pub use decomposer::*;
    pub use face::*;
    pub use face_registry::*;
    pub use mesh::*;
    pub use recognizer::*;
    pub use remap::*;
    pub use store::*;
    pub use util::*;
    // Note: collections module not re-exported here to avoid namespace pollution
    // Import specific types via prelude or use crate::core::collections::
}

/// Contains the coordinate arena and the numeric orientation predicates used
/// during recognition (signed volume sense, twisted quad detection/repair).
pub mod geometry {
    pub mod coords;
    pub mod orientation;
    pub use coords::*;
    pub use orientation::*;
}

/// A prelude module that re-exports commonly used types and functions.
/// This makes it easier to import the most commonly used items from the crate.
pub mod prelude {
    // Re-export from core
    pub use crate::core::{
        cell::*, decomposer::*, face::*, face_registry::*, mesh::*, recognizer::*, remap::*,
        store::*, util::*,
    };

    // Re-export commonly used collection types from core::collections
    pub use crate::core::collections::{
        CellId, CellNodeBuffer, DomainId, FaceId, FaceNodeBuffer, FastHashMap, FastHashSet,
        SmallBuffer, VertexId, fast_hash_map_with_capacity, fast_hash_set_with_capacity,
    };

    // Re-export from geometry
    pub use crate::geometry::{coords::*, orientation::*};
}

/// The function `is_normal` checks that structs implement `auto` traits.
/// Traits are checked at compile time, so this function is only used for
/// testing.
#[must_use]
pub const fn is_normal<T: Sized + Send + Sync + Unpin>() -> bool {
    true
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::{
        core::{
            cell::ZooCell,
            face_registry::FaceRegistry,
            mesh::{SourceMesh, ZooMesh},
            store::RemapStore,
        },
        geometry::coords::Coords,
        is_normal,
    };

    // =============================================================================
    // TYPE SAFETY TESTS
    // =============================================================================

    #[test]
    fn normal_types() {
        assert!(is_normal::<Coords>());
        assert!(is_normal::<ZooCell>());
        assert!(is_normal::<FaceRegistry>());
        assert!(is_normal::<SourceMesh>());
        assert!(is_normal::<ZooMesh>());
        assert!(is_normal::<RemapStore>());
    }

    #[test]
    fn test_prelude_collections_exports() {
        use crate::prelude::*;

        // Test that we can use the collections from the prelude
        let mut map: FastHashMap<u64, usize> = FastHashMap::default();
        map.insert(123, 456);
        assert_eq!(map.get(&123), Some(&456));

        let mut set: FastHashSet<u64> = FastHashSet::default();
        set.insert(789);
        assert!(set.contains(&789));

        let mut buffer: SmallBuffer<i32, 8> = SmallBuffer::new();
        buffer.push(42);
        assert_eq!(buffer.len(), 1);

        // Test capacity helpers
        let map_with_cap = fast_hash_map_with_capacity::<u64, usize>(100);
        assert!(map_with_cap.capacity() >= 100);

        let set_with_cap = fast_hash_set_with_capacity::<u64>(50);
        assert!(set_with_cap.capacity() >= 50);

        // Test domain-specific buffers can be instantiated
        let _face: FaceNodeBuffer = FaceNodeBuffer::new();
        let _cell: CellNodeBuffer = CellNodeBuffer::new();
        let _ids: (VertexId, CellId, FaceId, DomainId) = (0, 0, 0, 0);
    }

    #[test]
    fn test_prelude_pipeline_exports() {
        use crate::prelude::*;

        // Everything needed for decompose-and-remap is reachable from the
        // prelude alone
        let source = SourceMesh::new(
            0,
            2,
            vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
            vec![SourceCell::polygon(vec![0, 1, 2, 3])],
        )
        .unwrap();
        let zoo = ZooMesh::decompose(&source);
        assert_eq!(zoo.cell_count(), 4);
        assert!(zoo.cells().iter().all(|c| c.shape() == ZooShape::Triangle));

        let field = gather_cell_field(zoo.cell_remap(), &[2.5]);
        assert_eq!(field, [2.5, 2.5, 2.5, 2.5]);

        let mut store = RemapStore::new();
        store.insert(DomainKey::new("example", 0), zoo);
        assert!(store.contains(&DomainKey::new("example", 0)));
    }
}
