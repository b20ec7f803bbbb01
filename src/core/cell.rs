//! Cell data model: zoo shapes, decomposed output cells, and raw input cells.
//!
//! # Winding conventions
//!
//! Output tuples follow one documented convention, anchored to the
//! [`signed_volume_sense`] predicate (`Correct` = signed volume < 0):
//!
//! - **Triangle** `[a, b, c]`, **Quad** `[a, b, c, d]`: plain loop order.
//! - **Tetrahedron** `[t0, t1, t2, t3]`: `(t0, t1, t2, t3)` is `Correct`.
//! - **Pyramid** `[q0, q1, q2, q3, apex]`: quad base loop then apex;
//!   `(q0, q1, q2, apex)` is `Correct`.
//! - **Wedge** `[w0, w1, w2, w3, w4, w5]`: two triangle loops with lateral
//!   edges `w_i — w_{i+3}`; `(w0, w1, w2, w3)` is `Correct`.
//! - **Hexahedron** `[h0 .. h7]`: two quad loops with lateral edges
//!   `h_i — h_{i+4}`; `(h0, h1, h2, h4)` is `Correct`.
//!
//! Cells emitted by the fan decomposer inherit the winding of the face loops
//! they were cut from; only recognizer output is winding-fixed.
//!
//! [`signed_volume_sense`]: crate::geometry::orientation::signed_volume_sense

#![forbid(unsafe_code)]

// =============================================================================
// IMPORTS
// =============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::collections::{CellNodeBuffer, VertexId};
use crate::geometry::coords::Dimension;

// =============================================================================
// ZOO SHAPE
// =============================================================================

/// The canonical cell shapes every output cell is limited to.
///
/// # Examples
///
/// ```
/// use zoomesh::core::cell::ZooShape;
///
/// assert_eq!(ZooShape::Hexahedron.vertex_count(), 8);
/// assert_eq!(ZooShape::Quad.dimension(), 2);
/// assert_eq!(ZooShape::Wedge.to_string(), "wedge");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ZooShape {
    /// 2D, 3 vertices.
    Triangle,
    /// 2D, 4 vertices in loop order.
    Quad,
    /// 3D, 4 vertices.
    Tetrahedron,
    /// 3D, 5 vertices: quad base plus apex.
    Pyramid,
    /// 3D, 6 vertices: two paired triangle loops.
    Wedge,
    /// 3D, 8 vertices: two paired quad loops.
    Hexahedron,
}

impl ZooShape {
    /// Exact vertex tuple length for this shape.
    #[must_use]
    pub const fn vertex_count(self) -> usize {
        match self {
            Self::Triangle => 3,
            Self::Quad | Self::Tetrahedron => 4,
            Self::Pyramid => 5,
            Self::Wedge => 6,
            Self::Hexahedron => 8,
        }
    }

    /// Topological dimension of the shape (2 for planar cells, 3 for volumetric).
    #[must_use]
    pub const fn dimension(self) -> usize {
        match self {
            Self::Triangle | Self::Quad => 2,
            Self::Tetrahedron | Self::Pyramid | Self::Wedge | Self::Hexahedron => 3,
        }
    }
}

impl std::fmt::Display for ZooShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Triangle => write!(f, "triangle"),
            Self::Quad => write!(f, "quad"),
            Self::Tetrahedron => write!(f, "tetrahedron"),
            Self::Pyramid => write!(f, "pyramid"),
            Self::Wedge => write!(f, "wedge"),
            Self::Hexahedron => write!(f, "hexahedron"),
        }
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Error constructing a [`ZooCell`] whose tuple length contradicts its shape.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ShapeArityError {
    /// The vertex tuple has the wrong length for the tagged shape.
    #[error("a {shape} requires exactly {expected} vertices, got {actual}")]
    WrongVertexCount {
        /// The tagged shape.
        shape: ZooShape,
        /// Tuple length the shape demands.
        expected: usize,
        /// Tuple length that was supplied.
        actual: usize,
    },
}

/// Per-cell reasons the build pass skips a cell instead of decomposing it.
///
/// Malformed topology is non-fatal to the mesh: the offending cell contributes
/// zero output cells (a gap in the cell remap), a warning is logged, and the
/// build continues with the remaining cells.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum MalformedTopology {
    /// A 2D cell loop too short to span an area.
    #[error("2D cell loop has {found} vertices; at least 3 are required")]
    ShortLoop {
        /// Loop length that was supplied.
        found: usize,
    },
    /// A face of a 3D cell too short to form even an edge.
    #[error("face {face} of the cell has {found} vertices; at least 2 are required")]
    ShortFace {
        /// Position of the face within the cell's face list.
        face: usize,
        /// Node count of that face.
        found: usize,
    },
    /// A 3D cell with no faces at all.
    #[error("polyhedron cell lists no faces")]
    EmptyPolyhedron,
    /// A pre-tagged zoo cell whose tuple length contradicts its tag.
    #[error(transparent)]
    ZooArity(#[from] ShapeArityError),
    /// A pre-tagged zoo cell whose shape does not fit the mesh dimensionality.
    #[error("zoo cell of shape {shape} cannot appear in a {mesh} mesh")]
    ShapeDimension {
        /// The tagged shape.
        shape: ZooShape,
        /// Dimensionality of the surrounding mesh.
        mesh: Dimension,
    },
    /// A cell description that only makes sense in the other dimensionality.
    #[error("{described} cell cannot appear in a {mesh} mesh")]
    WrongDimension {
        /// What the cell claimed to be ("polyhedron" or "polygon").
        described: &'static str,
        /// Dimensionality of the surrounding mesh.
        mesh: Dimension,
    },
}

// =============================================================================
// ZOO CELL
// =============================================================================

/// A canonical output cell: shape tag plus explicit vertex tuple.
///
/// The tuple is stored inline (the hexahedron caps it at 8 vertices, so it
/// never heap-allocates) and its length always matches the shape — the
/// constructor enforces it.
///
/// # Examples
///
/// ```
/// use zoomesh::core::cell::{ZooCell, ZooShape};
///
/// let tet = ZooCell::new(ZooShape::Tetrahedron, [0, 1, 2, 3]).unwrap();
/// assert_eq!(tet.shape(), ZooShape::Tetrahedron);
/// assert_eq!(tet.nodes(), [0, 1, 2, 3]);
///
/// assert!(ZooCell::new(ZooShape::Hexahedron, [0, 1, 2]).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ZooCell {
    shape: ZooShape,
    nodes: CellNodeBuffer,
}

impl ZooCell {
    /// Creates a cell, checking the tuple length against the shape.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeArityError::WrongVertexCount`] on a length mismatch.
    pub fn new(
        shape: ZooShape,
        nodes: impl IntoIterator<Item = VertexId>,
    ) -> Result<Self, ShapeArityError> {
        let nodes: CellNodeBuffer = nodes.into_iter().collect();
        if nodes.len() != shape.vertex_count() {
            return Err(ShapeArityError::WrongVertexCount {
                shape,
                expected: shape.vertex_count(),
                actual: nodes.len(),
            });
        }
        Ok(Self { shape, nodes })
    }

    /// Internal constructor for emission sites whose arity is structurally
    /// guaranteed (fan pieces, reconstructed tuples).
    pub(crate) fn from_raw(shape: ZooShape, nodes: CellNodeBuffer) -> Self {
        debug_assert_eq!(nodes.len(), shape.vertex_count());
        Self { shape, nodes }
    }

    /// The shape tag.
    #[must_use]
    pub const fn shape(&self) -> ZooShape {
        self.shape
    }

    /// The vertex tuple, in the convention documented at module level.
    #[must_use]
    pub fn nodes(&self) -> &[VertexId] {
        &self.nodes
    }
}

impl std::fmt::Display for ZooCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:?}", self.shape, self.nodes.as_slice())
    }
}

// =============================================================================
// SOURCE CELL
// =============================================================================

/// One input cell, exactly as the file layer hands it over.
///
/// # Examples
///
/// ```
/// use zoomesh::core::cell::{SourceCell, ZooShape};
///
/// // A cell the reader already classified
/// let tagged = SourceCell::zoo(ZooShape::Triangle, [0, 1, 2]);
///
/// // A 3D arbitrary cell: raw face loops, any winding, any vertex count
/// let arb = SourceCell::polyhedron([vec![0, 1, 2, 3], vec![3, 2, 1, 0]]);
///
/// // A 2D arbitrary cell: one raw boundary loop
/// let gon = SourceCell::polygon([0, 1, 2, 3, 4]);
///
/// assert_eq!(tagged.vertex_ids().count(), 3);
/// assert_eq!(arb.vertex_ids().count(), 8);
/// assert_eq!(gon.vertex_ids().count(), 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceCell {
    /// Pre-tagged canonical cell; passes through unchanged (after arity and
    /// dimension checks).
    Zoo {
        /// The declared shape.
        shape: ZooShape,
        /// Vertex tuple in the file's winding.
        nodes: Vec<VertexId>,
    },
    /// 3D arbitrary cell: raw face node loops, uncanonicalized, with no
    /// winding consistency assumed between neighboring cells.
    Polyhedron {
        /// One node loop per face.
        faces: Vec<Vec<VertexId>>,
    },
    /// 2D arbitrary cell: one raw ordered boundary loop.
    Polygon {
        /// The boundary loop.
        nodes: Vec<VertexId>,
    },
}

impl SourceCell {
    /// Convenience constructor for a pre-tagged zoo cell.
    pub fn zoo(shape: ZooShape, nodes: impl IntoIterator<Item = VertexId>) -> Self {
        Self::Zoo {
            shape,
            nodes: nodes.into_iter().collect(),
        }
    }

    /// Convenience constructor for a 3D arbitrary cell.
    pub fn polyhedron(faces: impl IntoIterator<Item = Vec<VertexId>>) -> Self {
        Self::Polyhedron {
            faces: faces.into_iter().collect(),
        }
    }

    /// Convenience constructor for a 2D arbitrary cell.
    pub fn polygon(nodes: impl IntoIterator<Item = VertexId>) -> Self {
        Self::Polygon {
            nodes: nodes.into_iter().collect(),
        }
    }

    /// Iterates every vertex id the cell references, repeats included.
    /// Ingestion uses this to range-check ids before any geometry runs.
    pub fn vertex_ids(&self) -> impl Iterator<Item = VertexId> + '_ {
        let (flat, nested) = match self {
            Self::Zoo { nodes, .. } | Self::Polygon { nodes } => (Some(nodes), None),
            Self::Polyhedron { faces } => (None, Some(faces)),
        };
        flat.into_iter()
            .flatten()
            .chain(nested.into_iter().flatten().flatten())
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoo_shape_tables() {
        assert_eq!(ZooShape::Triangle.vertex_count(), 3);
        assert_eq!(ZooShape::Quad.vertex_count(), 4);
        assert_eq!(ZooShape::Tetrahedron.vertex_count(), 4);
        assert_eq!(ZooShape::Pyramid.vertex_count(), 5);
        assert_eq!(ZooShape::Wedge.vertex_count(), 6);
        assert_eq!(ZooShape::Hexahedron.vertex_count(), 8);

        assert_eq!(ZooShape::Triangle.dimension(), 2);
        assert_eq!(ZooShape::Quad.dimension(), 2);
        assert_eq!(ZooShape::Tetrahedron.dimension(), 3);
        assert_eq!(ZooShape::Hexahedron.dimension(), 3);
    }

    #[test]
    fn test_zoo_cell_construction() {
        let pyramid = ZooCell::new(ZooShape::Pyramid, [3, 2, 8, 5, 11]).unwrap();
        assert_eq!(pyramid.shape(), ZooShape::Pyramid);
        assert_eq!(pyramid.nodes(), [3, 2, 8, 5, 11]);
        assert_eq!(pyramid.to_string(), "pyramid[3, 2, 8, 5, 11]");

        let err = ZooCell::new(ZooShape::Wedge, [0, 1, 2]).unwrap_err();
        assert_eq!(
            err,
            ShapeArityError::WrongVertexCount {
                shape: ZooShape::Wedge,
                expected: 6,
                actual: 3,
            }
        );
    }

    #[test]
    fn test_malformed_topology_messages() {
        let short = MalformedTopology::ShortLoop { found: 2 };
        assert_eq!(
            short.to_string(),
            "2D cell loop has 2 vertices; at least 3 are required"
        );

        let face = MalformedTopology::ShortFace { face: 4, found: 1 };
        assert_eq!(
            face.to_string(),
            "face 4 of the cell has 1 vertices; at least 2 are required"
        );

        let dim = MalformedTopology::WrongDimension {
            described: "polyhedron",
            mesh: Dimension::Two,
        };
        assert_eq!(dim.to_string(), "polyhedron cell cannot appear in a 2D mesh");
    }

    #[test]
    fn test_source_cell_vertex_ids() {
        let tagged = SourceCell::zoo(ZooShape::Quad, [5, 6, 7, 8]);
        let ids: Vec<VertexId> = tagged.vertex_ids().collect();
        assert_eq!(ids, [5, 6, 7, 8]);

        let arb = SourceCell::polyhedron([vec![0, 1, 2], vec![2, 1, 3]]);
        let ids: Vec<VertexId> = arb.vertex_ids().collect();
        assert_eq!(ids, [0, 1, 2, 2, 1, 3]);

        let gon = SourceCell::polygon([9, 8, 7]);
        assert_eq!(gon.vertex_ids().max(), Some(9));
    }

    #[test]
    fn test_serialization_round_trip() {
        let cell = ZooCell::new(ZooShape::Hexahedron, [0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        let json = serde_json::to_string(&cell).unwrap();
        let back: ZooCell = serde_json::from_str(&json).unwrap();
        assert_eq!(cell, back);

        let source = SourceCell::polyhedron([vec![0, 1, 2, 3], vec![3, 2, 1, 0]]);
        let json = serde_json::to_string(&source).unwrap();
        let back: SourceCell = serde_json::from_str(&json).unwrap();
        assert_eq!(source, back);
    }
}
