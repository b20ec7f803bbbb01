//! The decomposition pass: source mesh in, zoo-only mesh out.
//!
//! [`SourceMesh`] validates a raw domain up front (dimensionality, coordinate
//! array shape, vertex id range), so the pass itself never fails: once a
//! source mesh exists, [`ZooMesh::decompose`] is total. Each cell takes one of
//! three routes:
//!
//! - a pre-tagged [`SourceCell::Zoo`] cell passes through after an arity and
//!   dimension check;
//! - a [`SourceCell::Polyhedron`] has its face loops canonicalized by a
//!   domain-local [`FaceRegistry`], is handed to the recognizer, and falls
//!   back to the centroid fan when it matches no zoo shape;
//! - a [`SourceCell::Polygon`] always fans. Recognition is a 3D concern; 2D
//!   producers that want passthrough tag their cells as zoo triangles/quads.
//!
//! A cell whose description is malformed is skipped with a warning; the rest
//! of the domain is still decomposed. Skips and fans both mean the output
//! index spaces differ from the source, which the mesh reports through
//! [`ZooMesh::was_split`] and its remap tables. When nothing was fanned or
//! skipped the tables stay empty, which every consumer treats as identity.
//!
//! The face registry lives only for the duration of one decomposition; the
//! remap tables live as long as the output mesh.

#![forbid(unsafe_code)]

// =============================================================================
// IMPORTS
// =============================================================================

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::cell::{MalformedTopology, SourceCell, ZooCell};
use crate::core::collections::{CellId, DomainId, VertexId};
use crate::core::decomposer::{fan_polygon, fan_polyhedron, FanCells};
use crate::core::face_registry::FaceRegistry;
use crate::core::recognizer::recognize;
use crate::core::remap::{CellOrigin, CellRemap, NodeRemap};
use crate::geometry::coords::{Coords, CoordsError, Dimension, DimensionError};

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Why a raw domain could not become a [`SourceMesh`].
///
/// These are the fatal, whole-domain conditions; anything recoverable is
/// handled per cell during decomposition instead.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecomposeError {
    /// The mesh is neither 2D nor 3D.
    #[error(transparent)]
    Dimension(#[from] DimensionError),
    /// The flat coordinate array does not divide into vertices.
    #[error(transparent)]
    Coordinates(#[from] CoordsError),
    /// A cell references a vertex the coordinate array does not contain.
    #[error("cell {cell} references vertex {vertex}, but the mesh has only {node_count} vertices")]
    VertexIndexOutOfRange {
        /// Index of the offending cell.
        cell: CellId,
        /// The out-of-range vertex id.
        vertex: VertexId,
        /// Number of vertices the coordinate array holds.
        node_count: usize,
    },
}

// =============================================================================
// SOURCE MESH
// =============================================================================

/// One validated input domain: coordinates plus a cell list that may mix
/// pre-tagged zoo cells with raw polyhedra or polygons.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceMesh {
    domain: DomainId,
    coords: Coords,
    cells: Vec<SourceCell>,
}

impl SourceMesh {
    /// Validates a raw domain description.
    ///
    /// `coords` is a flat interleaved array of `ndims` values per vertex.
    ///
    /// # Errors
    ///
    /// Returns [`DecomposeError`] when `ndims` is neither 2 nor 3, when the
    /// coordinate array length is not a multiple of `ndims`, or when any cell
    /// references a vertex id outside the coordinate array.
    ///
    /// # Examples
    ///
    /// ```
    /// use zoomesh::core::cell::SourceCell;
    /// use zoomesh::core::mesh::SourceMesh;
    ///
    /// let mesh = SourceMesh::new(
    ///     0,
    ///     2,
    ///     vec![0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0, 1.0],
    ///     vec![SourceCell::polygon(vec![0, 1, 2, 3])],
    /// )
    /// .unwrap();
    /// assert_eq!(mesh.node_count(), 4);
    /// assert_eq!(mesh.cell_count(), 1);
    /// ```
    pub fn new(
        domain: DomainId,
        ndims: usize,
        coords: Vec<f64>,
        cells: Vec<SourceCell>,
    ) -> Result<Self, DecomposeError> {
        let dim = Dimension::try_from(ndims)?;
        let coords = Coords::new(dim, coords)?;
        let node_count = coords.len();
        for (cell, description) in cells.iter().enumerate() {
            if let Some(vertex) = description.vertex_ids().find(|&v| v >= node_count) {
                return Err(DecomposeError::VertexIndexOutOfRange {
                    cell,
                    vertex,
                    node_count,
                });
            }
        }
        Ok(Self {
            domain,
            coords,
            cells,
        })
    }

    /// Domain id this mesh was loaded as.
    #[must_use]
    pub const fn domain(&self) -> DomainId {
        self.domain
    }

    /// Mesh dimensionality.
    #[must_use]
    pub const fn dim(&self) -> Dimension {
        self.coords.dim()
    }

    /// Vertex coordinates.
    #[must_use]
    pub const fn coords(&self) -> &Coords {
        &self.coords
    }

    /// Number of vertices.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.coords.len()
    }

    /// Number of cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// The cell descriptions in input order.
    #[must_use]
    pub fn cells(&self) -> &[SourceCell] {
        &self.cells
    }
}

// =============================================================================
// DECOMPOSITION OUTPUT
// =============================================================================

/// A cell dropped from the output, with the reason it was dropped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedCell {
    /// Index of the cell in the source mesh.
    pub cell: CellId,
    /// What was wrong with its description.
    pub reason: MalformedTopology,
}

/// How the cells of one domain were handled.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct DecompositionStats {
    /// Pre-tagged zoo cells passed through unchanged.
    pub passthrough: usize,
    /// Polyhedra recognized as a single zoo cell.
    pub recognized: usize,
    /// Cells split around a synthetic centroid.
    pub fanned: usize,
    /// Malformed cells dropped from the output.
    pub skipped: usize,
}

/// A mesh containing only zoo cells, plus everything needed to carry source
/// field arrays onto it.
#[derive(Clone, Debug)]
pub struct ZooMesh {
    domain: DomainId,
    cells: Vec<ZooCell>,
    coords: Coords,
    cell_remap: CellRemap,
    node_remap: NodeRemap,
    original_node_count: usize,
    was_split: bool,
    skipped: Vec<SkippedCell>,
    stats: DecompositionStats,
}

impl ZooMesh {
    /// Decomposes one domain into zoo cells.
    ///
    /// The pass is total: recognition failures fall back to the fan, and
    /// malformed cells are skipped with a warning rather than failing the
    /// domain.
    ///
    /// # Examples
    ///
    /// ```
    /// use zoomesh::core::cell::{SourceCell, ZooShape};
    /// use zoomesh::core::mesh::{SourceMesh, ZooMesh};
    ///
    /// // A cube written as six raw quad loops comes back as one hexahedron
    /// let source = SourceMesh::new(
    ///     0,
    ///     3,
    ///     vec![
    ///         0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
    ///         0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0, 1.0, 1.0, 0.0, 1.0, 1.0,
    ///     ],
    ///     vec![SourceCell::polyhedron(vec![
    ///         vec![0, 3, 2, 1],
    ///         vec![4, 5, 6, 7],
    ///         vec![0, 1, 5, 4],
    ///         vec![1, 2, 6, 5],
    ///         vec![2, 3, 7, 6],
    ///         vec![3, 0, 4, 7],
    ///     ])],
    /// )
    /// .unwrap();
    ///
    /// let zoo = ZooMesh::decompose(&source);
    /// assert_eq!(zoo.cells().len(), 1);
    /// assert_eq!(zoo.cells()[0].shape(), ZooShape::Hexahedron);
    /// assert!(!zoo.was_split());
    /// ```
    #[must_use]
    pub fn decompose(source: &SourceMesh) -> Self {
        let dim = source.dim();
        let mut coords = source.coords().clone();
        let original_node_count = coords.len();

        let mut registry = FaceRegistry::new();
        let mut cells = Vec::with_capacity(source.cell_count());
        let mut cell_remap = CellRemap::with_capacity(source.cell_count());
        let mut node_remap = NodeRemap::new(original_node_count);
        let mut skipped = Vec::new();
        let mut stats = DecompositionStats::default();

        for (cell_id, description) in source.cells().iter().enumerate() {
            let origin = CellOrigin::new(source.domain(), cell_id);
            match description {
                SourceCell::Zoo { shape, nodes } => {
                    if shape.dimension() != dim.ndims() {
                        record_skip(
                            cell_id,
                            MalformedTopology::ShapeDimension {
                                shape: *shape,
                                mesh: dim,
                            },
                            &mut skipped,
                            &mut stats,
                        );
                        continue;
                    }
                    match ZooCell::new(*shape, nodes.iter().copied()) {
                        Ok(zoo) => {
                            cells.push(zoo);
                            cell_remap.push(origin);
                            stats.passthrough += 1;
                        }
                        Err(arity) => {
                            record_skip(cell_id, arity.into(), &mut skipped, &mut stats);
                        }
                    }
                }
                SourceCell::Polyhedron { faces } => {
                    if dim != Dimension::Three {
                        record_skip(
                            cell_id,
                            MalformedTopology::WrongDimension {
                                described: "polyhedron",
                                mesh: dim,
                            },
                            &mut skipped,
                            &mut stats,
                        );
                        continue;
                    }
                    let registered: Vec<_> =
                        faces.iter().map(|nodes| registry.register(nodes)).collect();
                    match recognize(&registered, &registry, &coords) {
                        Ok(zoo) => {
                            cells.push(zoo);
                            cell_remap.push(origin);
                            stats.recognized += 1;
                        }
                        Err(mismatch) => {
                            debug!(cell = cell_id, reason = %mismatch, "fanning unrecognized cell");
                            match fan_polyhedron(&registered, &registry, &mut coords) {
                                Ok(fan) => absorb_fan(
                                    fan,
                                    origin,
                                    &mut cells,
                                    &mut cell_remap,
                                    &mut node_remap,
                                    &mut stats,
                                ),
                                Err(reason) => {
                                    record_skip(cell_id, reason, &mut skipped, &mut stats);
                                }
                            }
                        }
                    }
                }
                SourceCell::Polygon { nodes } => {
                    if dim != Dimension::Two {
                        record_skip(
                            cell_id,
                            MalformedTopology::WrongDimension {
                                described: "polygon",
                                mesh: dim,
                            },
                            &mut skipped,
                            &mut stats,
                        );
                        continue;
                    }
                    match fan_polygon(nodes, &mut coords) {
                        Ok(fan) => absorb_fan(
                            fan,
                            origin,
                            &mut cells,
                            &mut cell_remap,
                            &mut node_remap,
                            &mut stats,
                        ),
                        Err(reason) => {
                            record_skip(cell_id, reason, &mut skipped, &mut stats);
                        }
                    }
                }
            }
        }

        let was_split = stats.fanned > 0 || stats.skipped > 0;
        if !was_split {
            cell_remap = CellRemap::new();
            node_remap = NodeRemap::identity();
        }
        debug!(
            domain = source.domain(),
            passthrough = stats.passthrough,
            recognized = stats.recognized,
            fanned = stats.fanned,
            skipped = stats.skipped,
            output_cells = cells.len(),
            "domain decomposition complete"
        );

        Self {
            domain: source.domain(),
            cells,
            coords,
            cell_remap,
            node_remap,
            original_node_count,
            was_split,
            skipped,
            stats,
        }
    }

    /// Domain id the mesh was decomposed from.
    #[must_use]
    pub const fn domain(&self) -> DomainId {
        self.domain
    }

    /// Mesh dimensionality.
    #[must_use]
    pub const fn dim(&self) -> Dimension {
        self.coords.dim()
    }

    /// The zoo cells in output order.
    #[must_use]
    pub fn cells(&self) -> &[ZooCell] {
        &self.cells
    }

    /// Vertex coordinates, including any synthetic centroids at the end.
    #[must_use]
    pub const fn coords(&self) -> &Coords {
        &self.coords
    }

    /// Number of output cells.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of output vertices.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.coords.len()
    }

    /// Number of vertices the source mesh had.
    #[must_use]
    pub const fn original_node_count(&self) -> usize {
        self.original_node_count
    }

    /// `true` when output index spaces differ from the source (any cell was
    /// fanned or skipped), meaning field arrays must go through the remap
    /// tables.
    #[must_use]
    pub const fn was_split(&self) -> bool {
        self.was_split
    }

    /// Per-output-cell provenance (empty = identity).
    #[must_use]
    pub const fn cell_remap(&self) -> &CellRemap {
        &self.cell_remap
    }

    /// Synthetic vertex provenance (empty = identity).
    #[must_use]
    pub const fn node_remap(&self) -> &NodeRemap {
        &self.node_remap
    }

    /// Cells dropped from the output, in source order.
    #[must_use]
    pub fn skipped(&self) -> &[SkippedCell] {
        &self.skipped
    }

    /// Counters describing how the domain's cells were handled.
    #[must_use]
    pub const fn stats(&self) -> DecompositionStats {
        self.stats
    }
}

fn record_skip(
    cell: CellId,
    reason: MalformedTopology,
    skipped: &mut Vec<SkippedCell>,
    stats: &mut DecompositionStats,
) {
    warn!(cell, %reason, "skipping malformed cell");
    skipped.push(SkippedCell { cell, reason });
    stats.skipped += 1;
}

fn absorb_fan(
    fan: FanCells,
    origin: CellOrigin,
    cells: &mut Vec<ZooCell>,
    cell_remap: &mut CellRemap,
    node_remap: &mut NodeRemap,
    stats: &mut DecompositionStats,
) {
    for cell in fan.cells {
        cells.push(cell);
        cell_remap.push(origin);
    }
    node_remap.push_synthetic(fan.contributors);
    stats.fanned += 1;
}

// =============================================================================
// TESTS
// =============================================================================
