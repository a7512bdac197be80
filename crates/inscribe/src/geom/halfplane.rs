//! Half-plane view of a convex cell, used by the exact inscribed-circle solver
//! and the strict inside test.
//!
//! - `Hs2`: closed half-plane `n·x <= c` with unit outward normal.
//! - `halfplanes_of`: one half-plane per non-degenerate boundary segment.

use nalgebra::Vector2;

use super::types::{Cell, Orientation, Point, Segment};

/// Closed half-plane `n · x <= c`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hs2 {
    pub n: Vector2<f64>,
    pub c: f64,
}

impl Hs2 {
    #[inline]
    pub fn new(n: Vector2<f64>, c: f64) -> Self {
        Self { n, c }
    }
    #[inline]
    pub fn satisfies_eps(&self, p: Point, eps: f64) -> bool {
        self.n.dot(&p) <= self.c + eps
    }
    /// Signed slack `c − n·p` (distance to the line for unit `n`; positive inside).
    #[inline]
    pub fn slack(&self, p: Point) -> f64 {
        self.c - self.n.dot(&p)
    }

    /// Half-plane bounded by the supporting line of `seg`, interior on the side
    /// implied by the ring `orientation`. `None` for zero-length segments or a
    /// degenerate ring.
    pub fn from_segment(seg: &Segment, orientation: Orientation) -> Option<Self> {
        let edge = seg.end - seg.start;
        // CCW: interior on the left, so the outward normal is the edge turned 90° CW.
        let n = match orientation {
            Orientation::CounterClockwise => Vector2::new(edge.y, -edge.x),
            Orientation::Clockwise => Vector2::new(-edge.y, edge.x),
            Orientation::Degenerate => return None,
        };
        let c = n.dot(&seg.start);
        canonicalize_unit(n, c).map(|(n, c)| Hs2::new(n, c))
    }
}

#[inline]
fn canonicalize_unit(n: Vector2<f64>, c: f64) -> Option<(Vector2<f64>, f64)> {
    let norm = n.norm();
    if !(norm.is_finite()) || norm <= 0.0 {
        return None;
    }
    Some((n / norm, c / norm))
}

/// Half-plane representation of a convex cell (zero-length edges skipped).
///
/// Empty for degenerate (zero-area) rings.
pub fn halfplanes_of(cell: &Cell) -> Vec<Hs2> {
    let orientation = cell.orientation();
    cell.segments
        .iter()
        .filter_map(|s| Hs2::from_segment(s, orientation))
        .collect()
}

/// Membership in a convex cell with slack `eps` (`eps > 0` is permissive).
pub fn contains_eps(cell: &Cell, p: Point, eps: f64) -> bool {
    let hs = halfplanes_of(cell);
    !hs.is_empty() && hs.iter().all(|h| h.satisfies_eps(p, eps))
}
