//! Centroid-fan decomposition of cells that match no zoo shape.
//!
//! The fan is the fallback that makes the pipeline total: any cell the
//! recognizer rejects is split around a synthetic centroid vertex into zoo
//! cells, so downstream consumers never see an arbitrary cell. The centroid
//! is appended to the coordinate arena as the arithmetic mean of the cell's
//! distinct vertices, and the caller records its provenance in the node remap
//! table.
//!
//! In 3D every face is fanned independently against the centroid. A face walk
//! starts from the face's canonical (minimum-first) vertex sequence and closes
//! two pointers toward the middle, emitting one pyramid per step whose base is
//! the quartet `(v[lo], v[lo + 1], v[hi - 1], v[hi])`; when three vertices
//! remain they become the base of a single trailing tetrahedron. A polygon
//! face with `n` vertices therefore yields `n / 2 - 1` pyramids plus, for odd
//! `n`, one tetrahedron. Two-node faces degenerate to a single sliver
//! triangle. In 2D the whole polygon fans into one triangle per boundary
//! edge.
//!
//! Validation happens before the centroid is appended: a malformed cell
//! leaves the coordinate arena untouched, so a skipped cell never leaks an
//! orphan synthetic vertex.

#![forbid(unsafe_code)]

// =============================================================================
// IMPORTS
// =============================================================================

use crate::core::cell::{MalformedTopology, ZooCell, ZooShape};
use crate::core::collections::{CellNodeBuffer, VertexId};
use crate::core::face::SignedFace;
use crate::core::face_registry::FaceRegistry;
use crate::core::util::sequences::unique_sorted;
use crate::geometry::coords::Coords;

// =============================================================================
// FAN OUTPUT
// =============================================================================

/// The zoo cells produced by fanning one source cell, plus the provenance of
/// the synthetic centroid vertex they share.
#[derive(Clone, Debug)]
pub struct FanCells {
    /// Replacement zoo cells, in face order (3D) or boundary order (2D).
    pub cells: Vec<ZooCell>,
    /// Id of the synthetic centroid vertex appended to the coordinate arena.
    pub centroid: VertexId,
    /// Distinct source vertices averaged into the centroid, ascending.
    pub contributors: Vec<VertexId>,
}

// =============================================================================
// 3D FAN
// =============================================================================

/// Fans a polyhedron's registered faces around a synthetic centroid vertex.
///
/// Appends the centroid to `coords` and returns one pyramid/tetrahedron strip
/// per polygon face and one sliver triangle per two-node face.
///
/// # Errors
///
/// Returns [`MalformedTopology`] when the face list is empty or any face has
/// fewer than two nodes. On error `coords` is left unchanged.
///
/// # Examples
///
/// ```
/// use zoomesh::core::cell::ZooShape;
/// use zoomesh::core::decomposer::fan_polyhedron;
/// use zoomesh::core::face_registry::FaceRegistry;
/// use zoomesh::geometry::coords::{Coords, Dimension};
///
/// let mut coords = Coords::new(
///     Dimension::Three,
///     vec![
///         0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
///         0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0,
///     ],
/// )
/// .unwrap();
/// let mut registry = FaceRegistry::new();
/// let faces: Vec<_> = [
///     vec![0, 3, 2, 1],
///     vec![4, 5, 6, 7],
///     vec![0, 1, 5, 4],
///     vec![1, 2, 6, 5],
///     vec![2, 3, 7, 6],
///     vec![3, 0, 4, 7],
/// ]
/// .iter()
/// .map(|l| registry.register(l))
/// .collect();
///
/// let fan = fan_polyhedron(&faces, &registry, &mut coords).unwrap();
/// assert_eq!(fan.cells.len(), 6); // one pyramid per quad face
/// assert!(fan.cells.iter().all(|c| c.shape() == ZooShape::Pyramid));
/// assert_eq!(fan.centroid, 8);
/// assert_eq!(coords.get(8), &[0.5, 0.5, 0.5]);
/// ```
pub fn fan_polyhedron(
    faces: &[SignedFace],
    registry: &FaceRegistry,
    coords: &mut Coords,
) -> Result<FanCells, MalformedTopology> {
    if faces.is_empty() {
        return Err(MalformedTopology::EmptyPolyhedron);
    }
    for (position, face) in faces.iter().enumerate() {
        let found = registry.face(face.id()).node_count();
        if found < 2 {
            return Err(MalformedTopology::ShortFace {
                face: position,
                found,
            });
        }
    }

    let contributors = unique_sorted(
        faces
            .iter()
            .flat_map(|face| registry.nodes(face.id()).iter().copied()),
    );
    let centroid = coords.append_centroid(&contributors);

    let mut cells = Vec::new();
    for face in faces {
        fan_face(registry.nodes(face.id()), centroid, &mut cells);
    }

    Ok(FanCells {
        cells,
        centroid,
        contributors,
    })
}

/// Emits the pyramid/tetrahedron strip for one face against the centroid.
///
/// Walks the face's canonical vertex sequence with two pointers so the strip
/// is independent of how the cell happened to wind the face.
fn fan_face(nodes: &[VertexId], centroid: VertexId, cells: &mut Vec<ZooCell>) {
    if nodes.len() == 2 {
        let tuple: CellNodeBuffer = [nodes[0], nodes[1], centroid].into_iter().collect();
        cells.push(ZooCell::from_raw(ZooShape::Triangle, tuple));
        return;
    }

    let mut lo = 0;
    let mut hi = nodes.len();
    while hi - lo >= 4 {
        let base = [nodes[lo], nodes[lo + 1], nodes[hi - 2], nodes[hi - 1]];
        let tuple: CellNodeBuffer = base.into_iter().chain(std::iter::once(centroid)).collect();
        cells.push(ZooCell::from_raw(ZooShape::Pyramid, tuple));
        lo += 1;
        hi -= 1;
    }
    if hi - lo == 3 {
        let tuple: CellNodeBuffer = [nodes[lo], nodes[lo + 1], nodes[lo + 2], centroid]
            .into_iter()
            .collect();
        cells.push(ZooCell::from_raw(ZooShape::Tetrahedron, tuple));
    }
}

// =============================================================================
// 2D FAN
// =============================================================================

/// Fans a polygon into one triangle per boundary edge around a synthetic
/// centroid vertex appended to `coords`.
///
/// # Errors
///
/// Returns [`MalformedTopology::ShortLoop`] for loops of fewer than three
/// vertices. On error `coords` is left unchanged.
pub fn fan_polygon(
    nodes: &[VertexId],
    coords: &mut Coords,
) -> Result<FanCells, MalformedTopology> {
    if nodes.len() < 3 {
        return Err(MalformedTopology::ShortLoop { found: nodes.len() });
    }

    let contributors = unique_sorted(nodes.iter().copied());
    let centroid = coords.append_centroid(&contributors);

    let cells = (0..nodes.len())
        .map(|i| {
            let tuple: CellNodeBuffer = [nodes[i], nodes[(i + 1) % nodes.len()], centroid]
                .into_iter()
                .collect();
            ZooCell::from_raw(ZooShape::Triangle, tuple)
        })
        .collect();

    Ok(FanCells {
        cells,
        centroid,
        contributors,
    })
}

// =============================================================================
// TESTS
// =============================================================================
