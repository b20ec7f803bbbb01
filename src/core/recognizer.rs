//! Zoo-type recognition for 3D arbitrary cells.
//!
//! Many "arbitrary" polyhedra in real files are ordinary zoo cells that were
//! written face-by-face: a hexahedron stored as six quad loops in whatever
//! rotation and winding the writer produced. Recognition recovers the canonical
//! vertex tuple from such face soup so the cell survives as one zoo cell
//! instead of being fanned into pieces.
//!
//! Recognition is two-phase. A cheap census checks the face/vertex signature
//! against the zoo table:
//!
//! | faces                  | distinct vertices | shape       |
//! |------------------------|-------------------|-------------|
//! | 4 triangles            | 4                 | tetrahedron |
//! | 4 triangles + 1 quad   | 5                 | pyramid     |
//! | 2 triangles + 3 quads  | 6                 | wedge       |
//! | 6 quads                | 8                 | hexahedron  |
//!
//! Anything else — and any signature match whose faces cannot actually be
//! assembled (no opposing face, broken lateral pairing, repeated vertices
//! where a simple loop is required) — yields a [`ZooMismatch`]. The build pass
//! treats every mismatch the same way: log it at debug level and hand the cell
//! to the fan decomposer. A mismatch is never an error.

#![forbid(unsafe_code)]

// =============================================================================
// IMPORTS
// =============================================================================

use thiserror::Error;

use crate::core::cell::{ZooCell, ZooShape};
use crate::core::collections::{SmallBuffer, VertexId};
use crate::core::face::SignedFace;
use crate::core::face_registry::FaceRegistry;
use crate::core::util::sequences::unique_sorted;
use crate::geometry::coords::Coords;
use crate::geometry::orientation::{VolumeSense, signed_volume_sense, untwist_quad};

/// One loop of a prism-like cell: triangle or quad, always ≤ 4 entries.
type LoopBuffer = SmallBuffer<VertexId, 4>;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Why a face list failed to assemble into a zoo cell.
///
/// None of these are surfaced as errors: the caller downgrades the cell to the
/// fan decomposer and records the reason in a debug diagnostic. The variants
/// exist so that diagnostic says something useful.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ZooMismatch {
    /// The face/vertex signature matches no zoo shape.
    #[error(
        "face census ({triangles} triangles, {quads} quads, {others} others, \
         {vertices} distinct vertices) matches no zoo shape"
    )]
    Census {
        /// Number of 3-node faces.
        triangles: usize,
        /// Number of 4-node faces.
        quads: usize,
        /// Faces with any other node count.
        others: usize,
        /// Distinct vertices across all faces.
        vertices: usize,
    },
    /// A loop that must be simple repeats a vertex.
    #[error("a face loop repeats a vertex where a simple loop is required")]
    DegenerateFace,
    /// No face is vertex-disjoint from the anchor face.
    #[error("no face opposes the anchor face")]
    NoOpposingFace,
    /// More than one face is vertex-disjoint from the anchor face.
    #[error("{candidates} faces oppose the anchor face; expected exactly one")]
    AmbiguousOpposingFace {
        /// How many disjoint candidates were found.
        candidates: usize,
    },
    /// The vertex off the base face is missing or not unique.
    #[error("could not isolate a single apex vertex off the base face")]
    MissingApex,
    /// No lateral face contains an edge of the anchor loop.
    #[error("no lateral face bridges the anchor and opposing loops")]
    NoBridgingFace,
    /// A lateral face bridges the loops but its endpoints do not pair up.
    #[error("lateral face endpoints do not pair the anchor and opposing loops")]
    BrokenLateralPairing,
}

// =============================================================================
// RECOGNITION
// =============================================================================

/// Attempts to assemble a registered face list into a canonical zoo cell.
///
/// On success the returned tuple follows the winding conventions documented on
/// [`ZooCell`]; rotating the face list, permuting it, or flipping individual
/// face windings never changes which cell is recognized.
///
/// # Errors
///
/// Returns a [`ZooMismatch`] describing why the faces are not a zoo cell; the
/// caller is expected to fan-decompose instead.
///
/// # Examples
///
/// ```
/// use zoomesh::core::cell::ZooShape;
/// use zoomesh::core::face_registry::FaceRegistry;
/// use zoomesh::core::recognizer::recognize;
/// use zoomesh::geometry::coords::{Coords, Dimension};
///
/// // The unit cube as six arbitrarily wound quad loops
/// let coords = Coords::new(
///     Dimension::Three,
///     vec![
///         0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
///         0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0,
///     ],
/// )
/// .unwrap();
///
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
/// .map(|loop_| registry.register(loop_))
/// .collect();
///
/// let cell = recognize(&faces, &registry, &coords).unwrap();
/// assert_eq!(cell.shape(), ZooShape::Hexahedron);
/// ```
pub fn recognize(
    faces: &[SignedFace],
    registry: &FaceRegistry,
    coords: &Coords,
) -> Result<ZooCell, ZooMismatch> {
    let census = Census::take(faces, registry);

    match (
        census.triangles.len(),
        census.quads.len(),
        census.others,
        census.vertices.len(),
    ) {
        (4, 0, 0, 4) => reconstruct_tetrahedron(&census, registry, coords),
        (4, 1, 0, 5) => reconstruct_pyramid(&census, registry, coords),
        (2, 3, 0, 6) => reconstruct_prism(ZooShape::Wedge, &census, registry, coords),
        (0, 6, 0, 8) => reconstruct_prism(ZooShape::Hexahedron, &census, registry, coords),
        (triangles, quads, others, vertices) => Err(ZooMismatch::Census {
            triangles,
            quads,
            others,
            vertices,
        }),
    }
}

/// Face/vertex signature of one cell, bucketed by face node count.
struct Census {
    triangles: SmallBuffer<SignedFace, 4>,
    quads: SmallBuffer<SignedFace, 6>,
    others: usize,
    /// Distinct vertices across all faces, ascending.
    vertices: Vec<VertexId>,
}

impl Census {
    fn take(faces: &[SignedFace], registry: &FaceRegistry) -> Self {
        let mut triangles = SmallBuffer::new();
        let mut quads = SmallBuffer::new();
        let mut others = 0usize;
        for &face in faces {
            match registry.face(face.id()).node_count() {
                3 => triangles.push(face),
                4 => quads.push(face),
                _ => others += 1,
            }
        }
        let vertices = unique_sorted(
            faces
                .iter()
                .flat_map(|face| registry.nodes(face.id()).iter().copied()),
        );
        Self {
            triangles,
            quads,
            others,
            vertices,
        }
    }
}

// =============================================================================
// PER-SHAPE RECONSTRUCTION
// =============================================================================

fn reconstruct_tetrahedron(
    census: &Census,
    registry: &FaceRegistry,
    coords: &Coords,
) -> Result<ZooCell, ZooMismatch> {
    let base = registry.view(census.triangles[0]);
    if !all_distinct(&base) {
        return Err(ZooMismatch::DegenerateFace);
    }
    let apex = lone_vertex_off(&census.vertices, &base)?;

    let mut tuple = [base[0], base[1], base[2], apex];
    let sense = signed_volume_sense(
        &coords.point3(tuple[0]),
        &coords.point3(tuple[1]),
        &coords.point3(tuple[2]),
        &coords.point3(tuple[3]),
    );
    if sense == VolumeSense::Inverted {
        tuple.swap(1, 2);
    }
    Ok(ZooCell::from_raw(
        ZooShape::Tetrahedron,
        tuple.into_iter().collect(),
    ))
}

fn reconstruct_pyramid(
    census: &Census,
    registry: &FaceRegistry,
    coords: &Coords,
) -> Result<ZooCell, ZooMismatch> {
    let view = registry.view(census.quads[0]);
    if !all_distinct(&view) {
        return Err(ZooMismatch::DegenerateFace);
    }
    let mut base = [view[0], view[1], view[2], view[3]];
    untwist_quad(&mut base, coords);
    let apex = lone_vertex_off(&census.vertices, &base)?;

    // The apex is the adjacent point that settles the base winding
    let sense = signed_volume_sense(
        &coords.point3(base[0]),
        &coords.point3(base[1]),
        &coords.point3(base[2]),
        &coords.point3(apex),
    );
    if sense == VolumeSense::Inverted {
        base = [base[0], base[3], base[2], base[1]];
    }

    Ok(ZooCell::from_raw(
        ZooShape::Pyramid,
        base.iter().copied().chain(std::iter::once(apex)).collect(),
    ))
}

/// Shared reconstruction for the two prism-like shapes: wedge (two triangle
/// loops) and hexahedron (two quad loops), both closed by lateral quads.
fn reconstruct_prism(
    shape: ZooShape,
    census: &Census,
    registry: &FaceRegistry,
    coords: &Coords,
) -> Result<ZooCell, ZooMismatch> {
    let (anchor_face, opposing_face, laterals) = match shape {
        ZooShape::Wedge => {
            let pair = (census.triangles[0], census.triangles[1]);
            if shares_vertex(registry.nodes(pair.0.id()), registry.nodes(pair.1.id())) {
                return Err(ZooMismatch::NoOpposingFace);
            }
            (pair.0, pair.1, census.quads.as_slice())
        }
        ZooShape::Hexahedron => {
            let anchor = census.quads[0];
            let opposing = find_opposing(anchor, &census.quads[1..], registry)?;
            (anchor, opposing, census.quads.as_slice())
        }
        _ => unreachable!("only prism-like shapes reach here"),
    };

    let mut anchor = loop_view(anchor_face, registry, coords)?;
    let opposing_raw = loop_view(opposing_face, registry, coords)?;

    let mut opposing = align_opposing(
        &anchor,
        &opposing_raw,
        laterals,
        anchor_face,
        opposing_face,
        registry,
        coords,
    )?;

    // Winding fix with a fourth point borrowed from the anchor loop
    let sense = signed_volume_sense(
        &coords.point3(opposing[0]),
        &coords.point3(opposing[1]),
        &coords.point3(opposing[2]),
        &coords.point3(anchor[0]),
    );
    if sense == VolumeSense::Inverted {
        reverse_keep_first(&mut opposing);
        reverse_keep_first(&mut anchor);
    }

    Ok(ZooCell::from_raw(
        shape,
        opposing.iter().chain(anchor.iter()).copied().collect(),
    ))
}

// =============================================================================
// RECONSTRUCTION HELPERS
// =============================================================================

/// The cell's view of a prism loop, untwisted when it is a quad.
fn loop_view(
    face: SignedFace,
    registry: &FaceRegistry,
    coords: &Coords,
) -> Result<LoopBuffer, ZooMismatch> {
    let view = registry.view(face);
    if !all_distinct(&view) {
        return Err(ZooMismatch::DegenerateFace);
    }
    let mut out: LoopBuffer = view.iter().copied().collect();
    if out.len() == 4 {
        let mut quad = [out[0], out[1], out[2], out[3]];
        untwist_quad(&mut quad, coords);
        out.copy_from_slice(&quad);
    }
    Ok(out)
}

/// The unique face among `candidates` sharing no vertex with `anchor`.
fn find_opposing(
    anchor: SignedFace,
    candidates: &[SignedFace],
    registry: &FaceRegistry,
) -> Result<SignedFace, ZooMismatch> {
    let anchor_nodes = registry.nodes(anchor.id());
    let mut found: Option<SignedFace> = None;
    let mut count = 0usize;
    for &candidate in candidates {
        if !shares_vertex(anchor_nodes, registry.nodes(candidate.id())) {
            found = Some(candidate);
            count += 1;
        }
    }
    match (found, count) {
        (Some(face), 1) => Ok(face),
        (None, _) => Err(ZooMismatch::NoOpposingFace),
        (Some(_), candidates) => Err(ZooMismatch::AmbiguousOpposingFace { candidates }),
    }
}

/// Rotates (and, when needed, reverses) the opposing loop so that index `j`
/// of the result is joined by a lateral edge to index `j` of the anchor loop.
///
/// The phase comes from any lateral face containing an anchor edge: inside
/// that lateral's loop, each anchor endpoint is adjacent to exactly one
/// opposing-loop vertex — its lateral partner. Two partners pin down the
/// rotation offset and the direction of travel.
fn align_opposing(
    anchor: &[VertexId],
    opposing: &[VertexId],
    laterals: &[SignedFace],
    anchor_face: SignedFace,
    opposing_face: SignedFace,
    registry: &FaceRegistry,
    coords: &Coords,
) -> Result<LoopBuffer, ZooMismatch> {
    let len = anchor.len();
    let mut bridged = false;

    for &lateral in laterals {
        if lateral.id() == anchor_face.id() || lateral.id() == opposing_face.id() {
            continue;
        }
        let Ok(side) = loop_view(lateral, registry, coords) else {
            continue;
        };

        for i in 0..len {
            let a0 = anchor[i];
            let a1 = anchor[(i + 1) % len];
            if !side.contains(&a0) || !side.contains(&a1) {
                continue;
            }
            bridged = true;

            let Some(p0) = lateral_partner(&side, a0, a1) else {
                continue;
            };
            let Some(p1) = lateral_partner(&side, a1, a0) else {
                continue;
            };
            let Some(r) = opposing.iter().position(|&v| v == p0) else {
                continue;
            };
            let Some(s) = opposing.iter().position(|&v| v == p1) else {
                continue;
            };

            // p0 pairs with anchor[i], p1 with anchor[i + 1]; the two must be
            // adjacent in the opposing loop or the faces do not close up
            let aligned: LoopBuffer = if s == (r + 1) % len {
                (0..len)
                    .map(|j| opposing[(r + (j + len - i) % len) % len])
                    .collect()
            } else if s == (r + len - 1) % len {
                (0..len)
                    .map(|j| opposing[(r + len - (j + len - i) % len) % len])
                    .collect()
            } else {
                continue;
            };
            return Ok(aligned);
        }
    }

    if bridged {
        Err(ZooMismatch::BrokenLateralPairing)
    } else {
        Err(ZooMismatch::NoBridgingFace)
    }
}

/// Within a lateral loop, the neighbor of `vertex` that is not `other`.
/// Returns `None` when `vertex` and `other` are not adjacent in the loop.
fn lateral_partner(side: &[VertexId], vertex: VertexId, other: VertexId) -> Option<VertexId> {
    let len = side.len();
    let k = side.iter().position(|&v| v == vertex)?;
    let prev = side[(k + len - 1) % len];
    let next = side[(k + 1) % len];
    if next == other {
        Some(prev)
    } else if prev == other {
        Some(next)
    } else {
        None
    }
}

/// The single cell vertex not on the given base loop.
fn lone_vertex_off(vertices: &[VertexId], base: &[VertexId]) -> Result<VertexId, ZooMismatch> {
    let mut apex = None;
    for &v in vertices {
        if !base.contains(&v) {
            if apex.is_some() {
                return Err(ZooMismatch::MissingApex);
            }
            apex = Some(v);
        }
    }
    apex.ok_or(ZooMismatch::MissingApex)
}

/// Reverses a loop's direction of travel while keeping its first vertex,
/// which flips winding without disturbing lateral pairing by index.
fn reverse_keep_first(nodes: &mut LoopBuffer) {
    nodes[1..].reverse();
}

fn all_distinct(nodes: &[VertexId]) -> bool {
    nodes
        .iter()
        .enumerate()
        .all(|(i, v)| !nodes[..i].contains(v))
}

fn shares_vertex(a: &[VertexId], b: &[VertexId]) -> bool {
    a.iter().any(|v| b.contains(v))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::coords::Dimension;

    /// Unit cube: ids 0..4 on z = 0, 4..8 above them on z = 1.
    fn cube_coords() -> Coords {
        Coords::new(
            Dimension::Three,
            vec![
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0,
            ],
        )
        .unwrap()
    }

    const CUBE_FACES: [[VertexId; 4]; 6] = [
        [0, 3, 2, 1],
        [4, 5, 6, 7],
        [0, 1, 5, 4],
        [1, 2, 6, 5],
        [2, 3, 7, 6],
        [3, 0, 4, 7],
    ];

    fn register_all(loops: &[Vec<VertexId>]) -> (FaceRegistry, Vec<SignedFace>) {
        let mut registry = FaceRegistry::new();
        let faces = loops.iter().map(|l| registry.register(l)).collect();
        (registry, faces)
    }

    /// Checks the documented corner-tet winding convention for a 3D tuple.
    fn assert_correct_sense(cell: &ZooCell, coords: &Coords) {
        let n = cell.nodes();
        let (t0, t1, t2, t3) = match cell.shape() {
            ZooShape::Tetrahedron => (n[0], n[1], n[2], n[3]),
            ZooShape::Pyramid => (n[0], n[1], n[2], n[4]),
            ZooShape::Wedge => (n[0], n[1], n[2], n[3]),
            ZooShape::Hexahedron => (n[0], n[1], n[2], n[4]),
            _ => panic!("not a 3D shape"),
        };
        assert_eq!(
            signed_volume_sense(
                &coords.point3(t0),
                &coords.point3(t1),
                &coords.point3(t2),
                &coords.point3(t3),
            ),
            VolumeSense::Correct,
            "reconstructed {} breaks the winding convention: {cell}",
            cell.shape()
        );
    }

    fn assert_paired_loops(cell: &ZooCell, expected_offset: usize) {
        // For the cube/prism fixtures, vertex v sits directly under v + offset,
        // so every lateral edge of the tuple must connect such a pair
        let n = cell.nodes();
        let half = n.len() / 2;
        for j in 0..half {
            let (a, b) = (n[j], n[j + half]);
            assert!(
                a == b + expected_offset || b == a + expected_offset,
                "lateral edge ({a}, {b}) does not match the fixture's vertical edges"
            );
        }
    }

    #[test]
    fn test_recognize_cube_as_hexahedron() {
        let coords = cube_coords();
        let (registry, faces) = register_all(
            &CUBE_FACES.iter().map(|f| f.to_vec()).collect::<Vec<_>>(),
        );

        let cell = recognize(&faces, &registry, &coords).unwrap();
        assert_eq!(cell.shape(), ZooShape::Hexahedron);
        assert_correct_sense(&cell, &coords);
        assert_paired_loops(&cell, 4);
    }

    #[test]
    fn test_recognize_is_face_order_invariant() {
        let coords = cube_coords();
        let loops: Vec<Vec<VertexId>> = CUBE_FACES.iter().map(|f| f.to_vec()).collect();

        let (registry, faces) = register_all(&loops);
        let reference = recognize(&faces, &registry, &coords).unwrap();

        // Rotate the face list through every starting position
        for shift in 1..loops.len() {
            let mut shuffled = loops.clone();
            shuffled.rotate_left(shift);
            let (registry, faces) = register_all(&shuffled);
            let cell = recognize(&faces, &registry, &coords).unwrap();
            assert_eq!(cell.shape(), ZooShape::Hexahedron);
            assert_correct_sense(&cell, &coords);
            assert_paired_loops(&cell, 4);
            // The tuple may start at a different corner, but the shape and
            // conventions always hold
            assert_eq!(cell.nodes().len(), reference.nodes().len());
        }
    }

    #[test]
    fn test_recognize_is_winding_invariant() {
        let coords = cube_coords();

        // Flip the winding of every face, and of random subsets via rotation
        let flipped: Vec<Vec<VertexId>> = CUBE_FACES
            .iter()
            .map(|f| f.iter().rev().copied().collect())
            .collect();
        let (registry, faces) = register_all(&flipped);
        let cell = recognize(&faces, &registry, &coords).unwrap();
        assert_eq!(cell.shape(), ZooShape::Hexahedron);
        assert_correct_sense(&cell, &coords);
        assert_paired_loops(&cell, 4);

        // Mixed windings: only half the faces flipped
        let mixed: Vec<Vec<VertexId>> = CUBE_FACES
            .iter()
            .enumerate()
            .map(|(i, f)| {
                if i % 2 == 0 {
                    f.iter().rev().copied().collect()
                } else {
                    f.to_vec()
                }
            })
            .collect();
        let (registry, faces) = register_all(&mixed);
        let cell = recognize(&faces, &registry, &coords).unwrap();
        assert_eq!(cell.shape(), ZooShape::Hexahedron);
        assert_correct_sense(&cell, &coords);
    }

    #[test]
    fn test_recognize_hex_with_twisted_base_quad() {
        let coords = cube_coords();
        let mut loops: Vec<Vec<VertexId>> = CUBE_FACES.iter().map(|f| f.to_vec()).collect();
        // Store the anchor quad in bowtie order: [0, 3, 2, 1] -> [0, 2, 3, 1]
        loops[0] = vec![0, 2, 3, 1];

        let (registry, faces) = register_all(&loops);
        let cell = recognize(&faces, &registry, &coords).unwrap();
        assert_eq!(cell.shape(), ZooShape::Hexahedron);
        assert_correct_sense(&cell, &coords);
        assert_paired_loops(&cell, 4);
    }

    #[test]
    fn test_recognize_tetrahedron() {
        let coords = Coords::new(
            Dimension::Three,
            vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
        )
        .unwrap();
        let (registry, faces) = register_all(&[
            vec![0, 2, 1],
            vec![0, 1, 3],
            vec![1, 2, 3],
            vec![2, 0, 3],
        ]);

        let cell = recognize(&faces, &registry, &coords).unwrap();
        assert_eq!(cell.shape(), ZooShape::Tetrahedron);
        assert_correct_sense(&cell, &coords);
        assert_eq!(
            unique_sorted(cell.nodes().iter().copied()),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_recognize_pyramid() {
        let coords = Coords::new(
            Dimension::Three,
            vec![
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.5, 0.5, 1.0,
            ],
        )
        .unwrap();
        let (registry, faces) = register_all(&[
            vec![0, 3, 2, 1],
            vec![0, 1, 4],
            vec![1, 2, 4],
            vec![2, 3, 4],
            vec![3, 0, 4],
        ]);

        let cell = recognize(&faces, &registry, &coords).unwrap();
        assert_eq!(cell.shape(), ZooShape::Pyramid);
        assert_eq!(cell.nodes()[4], 4, "apex must come last");
        assert_correct_sense(&cell, &coords);
    }

    #[test]
    fn test_recognize_wedge() {
        // Triangular prism: triangle 0,1,2 on z = 0 and 3,4,5 above it
        let coords = Coords::new(
            Dimension::Three,
            vec![
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0,
            ],
        )
        .unwrap();
        let (registry, faces) = register_all(&[
            vec![0, 2, 1],
            vec![3, 4, 5],
            vec![0, 1, 4, 3],
            vec![1, 2, 5, 4],
            vec![2, 0, 3, 5],
        ]);

        let cell = recognize(&faces, &registry, &coords).unwrap();
        assert_eq!(cell.shape(), ZooShape::Wedge);
        assert_correct_sense(&cell, &coords);
        assert_paired_loops(&cell, 3);
    }

    #[test]
    fn test_census_mismatch_hexagonal_prism() {
        // Hexagonal prism: zoo-like but with two 6-node faces. Must fall
        // through to the decomposer.
        let mut data = Vec::new();
        for k in 0..6 {
            let angle = f64::from(k) * std::f64::consts::TAU / 6.0;
            data.extend_from_slice(&[angle.cos(), angle.sin(), 0.0]);
        }
        for k in 0..6 {
            let angle = f64::from(k) * std::f64::consts::TAU / 6.0;
            data.extend_from_slice(&[angle.cos(), angle.sin(), 1.0]);
        }
        let coords = Coords::new(Dimension::Three, data).unwrap();

        let mut loops = vec![
            vec![0, 5, 4, 3, 2, 1],
            vec![6, 7, 8, 9, 10, 11],
        ];
        for k in 0..6usize {
            let next = (k + 1) % 6;
            loops.push(vec![k, next, next + 6, k + 6]);
        }
        let (registry, faces) = register_all(&loops);

        let err = recognize(&faces, &registry, &coords).unwrap_err();
        assert_eq!(
            err,
            ZooMismatch::Census {
                triangles: 0,
                quads: 6,
                others: 2,
                vertices: 12,
            }
        );
    }

    #[test]
    fn test_no_opposing_face_downgrades() {
        // Six quads, eight vertices, but every other face touches the anchor
        let coords = cube_coords();
        let (registry, faces) = register_all(&[
            vec![0, 1, 2, 3],
            vec![0, 4, 5, 1],
            vec![1, 5, 6, 2],
            vec![2, 6, 7, 3],
            vec![3, 7, 4, 0],
            vec![0, 5, 6, 7],
        ]);

        let err = recognize(&faces, &registry, &coords).unwrap_err();
        assert_eq!(err, ZooMismatch::NoOpposingFace);
    }

    #[test]
    fn test_ambiguous_opposing_face_downgrades() {
        // Two distinct faces over the same top vertices both oppose the anchor
        let coords = cube_coords();
        let (registry, faces) = register_all(&[
            vec![0, 1, 2, 3],
            vec![4, 5, 6, 7],
            vec![4, 6, 5, 7],
            vec![0, 1, 5, 4],
            vec![1, 2, 6, 5],
            vec![2, 3, 7, 6],
        ]);

        let err = recognize(&faces, &registry, &coords).unwrap_err();
        assert_eq!(err, ZooMismatch::AmbiguousOpposingFace { candidates: 2 });
    }

    #[test]
    fn test_no_bridging_face_downgrades() {
        // Wedge signature, but each quad touches only one vertex of the anchor
        // triangle, so no lateral contains an anchor edge
        let coords = Coords::new(
            Dimension::Three,
            vec![
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0,
            ],
        )
        .unwrap();
        let (registry, faces) = register_all(&[
            vec![0, 2, 1],
            vec![3, 4, 5],
            vec![0, 3, 4, 5],
            vec![1, 4, 5, 3],
            vec![2, 5, 3, 4],
        ]);

        let err = recognize(&faces, &registry, &coords).unwrap_err();
        assert_eq!(err, ZooMismatch::NoBridgingFace);
    }

    #[test]
    fn test_broken_lateral_pairing_downgrades() {
        // One quad contains anchor edges but pairs them back onto the anchor
        // triangle instead of across to the opposing one; the other two quads
        // never bridge at all
        let coords = Coords::new(
            Dimension::Three,
            vec![
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0, //
                0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 1.0, 1.0,
            ],
        )
        .unwrap();
        let (registry, faces) = register_all(&[
            vec![0, 2, 1],
            vec![3, 4, 5],
            vec![0, 1, 2, 3],
            vec![0, 3, 4, 5],
            vec![2, 3, 5, 4],
        ]);

        let err = recognize(&faces, &registry, &coords).unwrap_err();
        assert_eq!(err, ZooMismatch::BrokenLateralPairing);
    }

    #[test]
    fn test_degenerate_base_quad_downgrades() {
        // Pyramid signature (4 triangles + 1 quad, 5 vertices), but the quad
        // loop repeats vertex 0 and cannot be a simple base
        let coords = Coords::new(
            Dimension::Three,
            vec![
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.5, 0.5, 1.0,
            ],
        )
        .unwrap();
        let (registry, faces) = register_all(&[
            vec![0, 1, 0, 2],
            vec![0, 1, 3],
            vec![1, 2, 3],
            vec![2, 0, 4],
            vec![3, 4, 0],
        ]);

        let err = recognize(&faces, &registry, &coords).unwrap_err();
        assert_eq!(err, ZooMismatch::DegenerateFace);
    }

    #[test]
    fn test_mismatch_messages() {
        assert_eq!(
            ZooMismatch::NoOpposingFace.to_string(),
            "no face opposes the anchor face"
        );
        assert_eq!(
            ZooMismatch::AmbiguousOpposingFace { candidates: 3 }.to_string(),
            "3 faces oppose the anchor face; expected exactly one"
        );
        let census = ZooMismatch::Census {
            triangles: 1,
            quads: 2,
            others: 3,
            vertices: 9,
        };
        assert_eq!(
            census.to_string(),
            "face census (1 triangles, 2 quads, 3 others, 9 distinct vertices) \
             matches no zoo shape"
        );
    }
}
