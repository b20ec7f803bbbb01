//! Flat coordinate storage for one mesh domain.
//!
//! Coordinates live in a single contiguous `f64` arena, `ndims` values per
//! vertex, exactly as they arrive from file readers. Original vertices are
//! immutable; fan decomposition appends synthetic centroid vertices after all
//! originals, never interleaved, so a vertex id alone tells original from
//! synthetic. All geometry runs in `f64` regardless of the precision the file
//! stored.

#![forbid(unsafe_code)]

use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::collections::VertexId;

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Error raised when a mesh declares a dimensionality this kernel cannot handle.
///
/// This aborts construction for the whole domain: unlike a malformed cell there
/// is no sensible per-cell recovery when the coordinate layout itself is
/// unknown.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum DimensionError {
    /// The mesh is neither 2D nor 3D.
    #[error("unsupported mesh dimensionality {ndims}: expected 2 or 3")]
    UnsupportedDimensionality {
        /// The dimensionality the input declared.
        ndims: usize,
    },
}

/// Errors raised while validating a flat coordinate array.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum CoordsError {
    /// The flat array length is not a whole number of vertices.
    #[error("coordinate array of length {len} is not a multiple of dimensionality {ndims}")]
    RaggedCoordinates {
        /// Length of the flat coordinate array.
        len: usize,
        /// Declared dimensionality.
        ndims: usize,
    },
}

// =============================================================================
// DIMENSION
// =============================================================================

/// Spatial dimensionality of a mesh domain.
///
/// Only 2D and 3D meshes are representable; anything else is rejected at
/// ingestion with [`DimensionError::UnsupportedDimensionality`].
///
/// # Examples
///
/// ```
/// use zoomesh::geometry::coords::Dimension;
///
/// let dim = Dimension::try_from(3).unwrap();
/// assert_eq!(dim, Dimension::Three);
/// assert_eq!(dim.ndims(), 3);
///
/// assert!(Dimension::try_from(4).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Planar mesh: cells are polygons described by vertex loops.
    Two,
    /// Volumetric mesh: cells are polyhedra described by face lists.
    Three,
}

impl Dimension {
    /// Number of coordinates stored per vertex.
    #[must_use]
    pub const fn ndims(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }
}

impl TryFrom<usize> for Dimension {
    type Error = DimensionError;

    fn try_from(ndims: usize) -> Result<Self, Self::Error> {
        match ndims {
            2 => Ok(Self::Two),
            3 => Ok(Self::Three),
            _ => Err(DimensionError::UnsupportedDimensionality { ndims }),
        }
    }
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Two => write!(f, "2D"),
            Self::Three => write!(f, "3D"),
        }
    }
}

// =============================================================================
// COORDS
// =============================================================================

/// Flat per-domain coordinate arena: `ndims` interleaved `f64` values per vertex.
///
/// # Examples
///
/// ```
/// use zoomesh::geometry::coords::{Coords, Dimension};
///
/// // Two 3D vertices
/// let coords = Coords::new(Dimension::Three, vec![0.0, 0.0, 0.0, 1.0, 2.0, 3.0]).unwrap();
/// assert_eq!(coords.len(), 2);
/// assert_eq!(coords.get(1), [1.0, 2.0, 3.0]);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coords {
    dim: Dimension,
    data: Vec<f64>,
}

impl Coords {
    /// Creates a coordinate arena from a flat interleaved array.
    ///
    /// # Errors
    ///
    /// Returns [`CoordsError::RaggedCoordinates`] if `data.len()` is not a
    /// multiple of the dimensionality.
    pub fn new(dim: Dimension, data: Vec<f64>) -> Result<Self, CoordsError> {
        if data.len() % dim.ndims() != 0 {
            return Err(CoordsError::RaggedCoordinates {
                len: data.len(),
                ndims: dim.ndims(),
            });
        }
        Ok(Self { dim, data })
    }

    /// The dimensionality of this arena.
    #[must_use]
    pub const fn dim(&self) -> Dimension {
        self.dim
    }

    /// Number of vertices stored (originals plus any appended centroids).
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len() / self.dim.ndims()
    }

    /// Returns `true` if no vertices are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The coordinate slice of one vertex (`ndims` values).
    ///
    /// # Panics
    ///
    /// Panics if `vertex` is out of range; ids are validated at mesh ingestion,
    /// so an out-of-range id here is a caller bug rather than bad input data.
    #[must_use]
    pub fn get(&self, vertex: VertexId) -> &[f64] {
        let n = self.dim.ndims();
        &self.data[vertex * n..(vertex + 1) * n]
    }

    /// The vertex as a 3D point for the orientation predicates.
    ///
    /// 2D vertices are lifted onto the `z = 0` plane, keeping this total; the
    /// volume predicates are only meaningful for 3D input, and the 3D-only
    /// recognizer is the sole caller.
    #[must_use]
    pub fn point3(&self, vertex: VertexId) -> Point3<f64> {
        let c = self.get(vertex);
        match self.dim {
            Dimension::Two => Point3::new(c[0], c[1], 0.0),
            Dimension::Three => Point3::new(c[0], c[1], c[2]),
        }
    }

    /// The raw interleaved coordinate array.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Appends the arithmetic mean of the given vertices as a new vertex and
    /// returns its id.
    ///
    /// This is the synthetic centroid of fan decomposition: the contributor set
    /// is the distinct vertex set of the cell being fanned. Contributors must
    /// be non-empty; the decomposer rejects cells that would violate that
    /// before ever reaching here.
    pub fn append_centroid(&mut self, contributors: &[VertexId]) -> VertexId {
        debug_assert!(!contributors.is_empty(), "centroid of no vertices");
        let n = self.dim.ndims();
        let id = self.len();
        let inv = 1.0 / contributors.len() as f64;
        for axis in 0..n {
            let sum: f64 = contributors.iter().map(|&v| self.data[v * n + axis]).sum();
            self.data.push(sum * inv);
        }
        id
    }
}
