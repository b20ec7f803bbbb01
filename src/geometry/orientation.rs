//! Orientation predicates for zoo-cell reconstruction.
//!
//! Reconstruction of tetrahedra, pyramids, wedges and hexahedra from arbitrary
//! face soup has to settle two questions that the input does not answer: which
//! way a base loop winds relative to the rest of the cell, and whether a quad
//! loop is stored in bowtie (self-intersecting) order. Both are answered here
//! with plain `f64` arithmetic; no exact or adaptive predicates are needed
//! because a wrong answer near degeneracy only flips a cell that was already
//! numerically ambiguous.

#![forbid(unsafe_code)]

use nalgebra::Point3;

use crate::core::collections::VertexId;
use crate::geometry::coords::Coords;

/// Relative tolerance for the twisted-quad test: consecutive-edge dot products
/// smaller than this fraction of the edge magnitudes are treated as noise.
/// Warped-but-simple quads (hex faces are rarely perfectly planar) produce
/// exactly such near-zero negatives.
const TWIST_RELATIVE_EPSILON: f64 = 1e-8;

/// Winding sense of a vertex tuple relative to the canonical cell convention.
///
/// The convention is anchored to [`signed_volume_sense`]: a tuple is `Correct`
/// when the signed volume of its test tetrahedron is negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VolumeSense {
    /// The tuple winds the canonical way (signed volume < 0).
    Correct,
    /// The tuple winds the opposite way, or is degenerate (signed volume ≥ 0).
    Inverted,
}

impl std::fmt::Display for VolumeSense {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Correct => write!(f, "CORRECT"),
            Self::Inverted => write!(f, "INVERTED"),
        }
    }
}

/// Determines whether the tetrahedron `(p0, p1, p2, p3)` winds the canonical way.
///
/// Computes `n = (p1 − p0) × (p2 − p0)` and `d = (p3 − p0) · n`; `d < 0` is
/// [`VolumeSense::Correct`], `d ≥ 0` is [`VolumeSense::Inverted`]. The test is
/// deliberately binary: a degenerate (flat) tetrahedron counts as `Inverted`,
/// and callers respond by swapping two vertices, which is harmless when the
/// volume is zero. `NaN` coordinates also land in the `Inverted` branch, so the
/// predicate is total over `f64`.
///
/// Used directly for tetrahedra, and with a fourth point borrowed from the
/// opposite side of the cell to fix base-loop winding for pyramids, wedges and
/// hexahedra.
///
/// # Examples
///
/// ```
/// use nalgebra::Point3;
/// use zoomesh::geometry::orientation::{signed_volume_sense, VolumeSense};
///
/// let p0 = Point3::new(0.0, 0.0, 0.0);
/// let p1 = Point3::new(1.0, 0.0, 0.0);
/// let p2 = Point3::new(0.0, 1.0, 0.0);
/// let below = Point3::new(0.0, 0.0, -1.0);
/// let above = Point3::new(0.0, 0.0, 1.0);
///
/// assert_eq!(signed_volume_sense(&p0, &p1, &p2, &below), VolumeSense::Correct);
/// assert_eq!(signed_volume_sense(&p0, &p1, &p2, &above), VolumeSense::Inverted);
/// ```
#[must_use]
pub fn signed_volume_sense(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
) -> VolumeSense {
    let normal = (p1 - p0).cross(&(p2 - p0));
    let d = (p3 - p0).dot(&normal);
    if d < 0.0 {
        VolumeSense::Correct
    } else {
        VolumeSense::Inverted
    }
}

/// Detects a quad loop stored in bowtie (self-intersecting) vertex order.
///
/// Walks the four cyclic edge vectors and counts consecutive pairs whose dot
/// product is negative with magnitude above a small relative threshold
/// (`1e-8` of the two edge magnitudes). More than 2 such pairs means the loop
/// crosses itself as stored. A simple planar quad can have at most two obtuse
/// turns, while both bowtie orders of four points produce four sharp reversals;
/// the relative threshold keeps slightly warped or noisy-but-simple quads from
/// being flagged.
///
/// Callers repair a twisted quad by swapping the two vertices on a crossing
/// diagonal — see [`untwist_quad`].
#[must_use]
pub fn quad_is_twisted(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
) -> bool {
    let edges = [p1 - p0, p2 - p1, p3 - p2, p0 - p3];

    let mut reversals = 0usize;
    for i in 0..4 {
        let a = &edges[i];
        let b = &edges[(i + 1) % 4];
        let dot = a.dot(b);
        if dot < 0.0 && -dot > TWIST_RELATIVE_EPSILON * a.norm() * b.norm() {
            reversals += 1;
        }
    }
    reversals > 2
}

/// Repairs a bowtie quad loop in place; returns `true` if a swap was applied.
///
/// Of the three cyclic orders four points admit, exactly one is simple, so when
/// the stored order is twisted one of the two diagonal swaps fixes it: first
/// the last two corners are exchanged, and if the loop still self-intersects
/// that swap is reverted and the middle two corners are exchanged instead. For
/// genuinely degenerate point sets where neither candidate tests simple, the
/// second swap is kept; the result is deterministic either way.
pub fn untwist_quad(quad: &mut [VertexId; 4], coords: &Coords) -> bool {
    let twisted = |q: &[VertexId; 4]| {
        quad_is_twisted(
            &coords.point3(q[0]),
            &coords.point3(q[1]),
            &coords.point3(q[2]),
            &coords.point3(q[3]),
        )
    };

    if !twisted(quad) {
        return false;
    }
    quad.swap(2, 3);
    if !twisted(quad) {
        return true;
    }
    quad.swap(2, 3);
    quad.swap(1, 2);
    true
}
