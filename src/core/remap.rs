//! Remap tables tying a decomposed mesh back to its source arrays.
//!
//! Decomposition changes both index spaces of a mesh: fanned cells multiply
//! into several zoo cells, and each fanned cell appends one synthetic centroid
//! vertex. Field data supplied against the source mesh has to be carried
//! across both changes, and that is all these tables do.
//!
//! [`CellRemap`] records, per output cell, which source cell produced it, so
//! cell-centered arrays are moved with a gather: `out[k] = src[remap[k].cell]`.
//! [`NodeRemap`] records, per synthetic vertex, the sorted source vertices
//! averaged into its position, so node-centered arrays keep their original
//! entries and append one derived value per synthetic vertex.
//!
//! An empty table means the mesh came through unchanged, and every function
//! here treats it as the identity mapping. The projection of node fields is a
//! plain value-space mean; it preserves no integral quantities and is not a
//! substitute for a conservative interpolation.

#![forbid(unsafe_code)]

// =============================================================================
// IMPORTS
// =============================================================================

use num_traits::Float;
use serde::{Deserialize, Serialize};

use crate::core::collections::{CellId, DomainId, VertexId};

// =============================================================================
// CELL REMAP
// =============================================================================

/// Source-cell provenance of one output cell.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CellOrigin {
    /// Domain the source cell belongs to.
    pub domain: DomainId,
    /// Index of the source cell within that domain.
    pub cell: CellId,
}

impl CellOrigin {
    /// Creates a new origin record.
    #[must_use]
    pub const fn new(domain: DomainId, cell: CellId) -> Self {
        Self { domain, cell }
    }
}

impl std::fmt::Display for CellOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cell {} of domain {}", self.cell, self.domain)
    }
}

/// Per-output-cell provenance table, indexed by output cell id.
///
/// Origins are appended in output order, so the recorded source cell indices
/// are nondecreasing within a domain build. An empty table is the identity
/// mapping (no cell was fanned or skipped).
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct CellRemap {
    origins: Vec<CellOrigin>,
}

impl CellRemap {
    /// Creates an empty (identity) table.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            origins: Vec::new(),
        }
    }

    /// Creates an empty table with room for `capacity` output cells.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            origins: Vec::with_capacity(capacity),
        }
    }

    /// Appends the origin of the next output cell.
    pub fn push(&mut self, origin: CellOrigin) {
        self.origins.push(origin);
    }

    /// Number of output cells covered by the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.origins.len()
    }

    /// `true` when the table is the identity mapping.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.origins.is_empty()
    }

    /// Origin of output cell `k`, if the table covers it.
    #[must_use]
    pub fn get(&self, k: usize) -> Option<CellOrigin> {
        self.origins.get(k).copied()
    }

    /// All origins in output order.
    #[must_use]
    pub fn origins(&self) -> &[CellOrigin] {
        &self.origins
    }
}

/// Moves a cell-centered scalar array onto the decomposed mesh.
///
/// Every output cell takes the value of the source cell it came from; fanned
/// cells therefore replicate their source value. An empty table returns the
/// input unchanged.
///
/// # Panics
///
/// Panics if an origin references an index outside `field`.
///
/// # Examples
///
/// ```
/// use zoomesh::core::remap::{CellOrigin, CellRemap, gather_cell_field};
///
/// let mut remap = CellRemap::new();
/// for cell in [0, 1, 1, 1] {
///     remap.push(CellOrigin::new(0, cell));
/// }
/// assert_eq!(gather_cell_field(&remap, &[10.0, 20.0]), [10.0, 20.0, 20.0, 20.0]);
/// ```
#[must_use]
pub fn gather_cell_field<T: Clone>(remap: &CellRemap, field: &[T]) -> Vec<T> {
    if remap.is_empty() {
        return field.to_vec();
    }
    remap
        .origins()
        .iter()
        .map(|origin| field[origin.cell].clone())
        .collect()
}

/// Moves an interleaved cell-centered array of `ncomps` components per cell
/// onto the decomposed mesh.
///
/// # Panics
///
/// Panics if `ncomps` is zero, if `field.len()` is not a multiple of
/// `ncomps`, or if an origin references a cell outside `field`.
#[must_use]
pub fn gather_cell_components<T: Clone>(remap: &CellRemap, field: &[T], ncomps: usize) -> Vec<T> {
    assert!(ncomps > 0, "component count must be positive");
    assert_eq!(
        field.len() % ncomps,
        0,
        "field length {} is not a multiple of the component count {ncomps}",
        field.len()
    );
    if remap.is_empty() {
        return field.to_vec();
    }
    let mut out = Vec::with_capacity(remap.len() * ncomps);
    for origin in remap.origins() {
        let start = origin.cell * ncomps;
        out.extend_from_slice(&field[start..start + ncomps]);
    }
    out
}

// =============================================================================
// NODE REMAP
// =============================================================================

/// Provenance of the synthetic centroid vertices, indexed by appearance order.
///
/// Synthetic vertex `j` has global id `original_count + j` and was placed at
/// the arithmetic mean of its recorded contributors. A table with no entries
/// is the identity mapping.
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct NodeRemap {
    original_count: usize,
    contributors: Vec<Vec<VertexId>>,
}

impl NodeRemap {
    /// Creates the identity table (no synthetic vertices).
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            original_count: 0,
            contributors: Vec::new(),
        }
    }

    /// Creates an empty table over a mesh with `original_count` vertices.
    #[must_use]
    pub const fn new(original_count: usize) -> Self {
        Self {
            original_count,
            contributors: Vec::new(),
        }
    }

    /// Records the contributor set of the next synthetic vertex.
    ///
    /// Contributors must be sorted ascending and non-empty.
    pub fn push_synthetic(&mut self, contributors: Vec<VertexId>) {
        debug_assert!(!contributors.is_empty());
        debug_assert!(contributors.windows(2).all(|w| w[0] < w[1]));
        self.contributors.push(contributors);
    }

    /// Number of vertices the source mesh had.
    #[must_use]
    pub const fn original_count(&self) -> usize {
        self.original_count
    }

    /// Number of synthetic centroid vertices.
    #[must_use]
    pub fn synthetic_count(&self) -> usize {
        self.contributors.len()
    }

    /// Total vertex count of the decomposed mesh.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.original_count + self.contributors.len()
    }

    /// `true` when the table is the identity mapping.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.contributors.is_empty()
    }

    /// Contributor set of synthetic vertex `j` (counted from zero).
    #[must_use]
    pub fn contributors(&self, j: usize) -> &[VertexId] {
        &self.contributors[j]
    }

    /// All contributor sets in appearance order.
    pub fn iter(&self) -> impl Iterator<Item = &[VertexId]> {
        self.contributors.iter().map(Vec::as_slice)
    }
}

/// Projects a node-centered scalar array onto the decomposed mesh.
///
/// Original vertices keep their values; each synthetic vertex receives the
/// arithmetic mean of its contributors' values. The mean is taken in value
/// space and preserves no integral quantities.
///
/// # Panics
///
/// Panics if `field` does not cover the original vertex count, or if a
/// contributor id lies outside `field`.
///
/// # Examples
///
/// ```
/// use zoomesh::core::remap::{NodeRemap, project_node_field};
///
/// let mut remap = NodeRemap::new(4);
/// remap.push_synthetic(vec![0, 1, 2, 3]);
/// let projected = project_node_field(&remap, &[1.0, 2.0, 3.0, 4.0]);
/// assert_eq!(projected, [1.0, 2.0, 3.0, 4.0, 2.5]);
/// ```
#[must_use]
pub fn project_node_field<T: Float>(remap: &NodeRemap, field: &[T]) -> Vec<T> {
    if remap.is_identity() {
        return field.to_vec();
    }
    assert_eq!(
        field.len(),
        remap.original_count(),
        "node field covers {} vertices but the source mesh had {}",
        field.len(),
        remap.original_count()
    );
    let mut out = Vec::with_capacity(remap.total_count());
    out.extend_from_slice(field);
    for contributors in remap.iter() {
        out.push(contributor_mean(field, contributors, 1, 0));
    }
    out
}

/// Projects an interleaved node-centered array of `ncomps` components per
/// vertex onto the decomposed mesh, averaging each component independently.
///
/// # Panics
///
/// Panics if `ncomps` is zero, if `field.len()` differs from
/// `original_count * ncomps`, or if a contributor id lies outside `field`.
#[must_use]
pub fn project_node_components<T: Float>(remap: &NodeRemap, field: &[T], ncomps: usize) -> Vec<T> {
    assert!(ncomps > 0, "component count must be positive");
    if remap.is_identity() {
        return field.to_vec();
    }
    assert_eq!(
        field.len(),
        remap.original_count() * ncomps,
        "node field covers {} values but the source mesh needs {}",
        field.len(),
        remap.original_count() * ncomps
    );
    let mut out = Vec::with_capacity(remap.total_count() * ncomps);
    out.extend_from_slice(field);
    for contributors in remap.iter() {
        for axis in 0..ncomps {
            out.push(contributor_mean(field, contributors, ncomps, axis));
        }
    }
    out
}

/// Carries a node-centered label array onto the decomposed mesh.
///
/// Labels cannot be averaged, so synthetic vertices take the caller-provided
/// `fill` value (a ghost flag, an invalid global id, and so on).
///
/// # Panics
///
/// Panics if `field` does not cover the original vertex count.
#[must_use]
pub fn gather_node_labels<T: Clone>(remap: &NodeRemap, field: &[T], fill: T) -> Vec<T> {
    if remap.is_identity() {
        return field.to_vec();
    }
    assert_eq!(
        field.len(),
        remap.original_count(),
        "node field covers {} vertices but the source mesh had {}",
        field.len(),
        remap.original_count()
    );
    let mut out = Vec::with_capacity(remap.total_count());
    out.extend_from_slice(field);
    out.resize(remap.total_count(), fill);
    out
}

/// Mean of one component over a contributor set, accumulated without any
/// integer-to-float cast so the function stays total for every `Float` type.
fn contributor_mean<T: Float>(
    field: &[T],
    contributors: &[VertexId],
    stride: usize,
    axis: usize,
) -> T {
    let mut sum = T::zero();
    let mut count = T::zero();
    for &vertex in contributors {
        sum = sum + field[vertex * stride + axis];
        count = count + T::one();
    }
    sum / count
}

// =============================================================================
// TESTS
// =============================================================================
