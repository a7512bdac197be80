//! Exact maximum inscribed circle (Chebyshev center) of a convex cell.
//!
//! With unit outward normals the circle `(x, r)` fits iff `n_i·x + r <= c_i`
//! for every edge. Maximizing `r` is a 3-variable LP whose optimum sits where
//! three constraints are tight, so for the handful of edges a Voronoi cell has
//! we enumerate constraint triples, solve each 3×3 system and keep the best
//! feasible one.
//!
//! For a non-convex ring the half-planes describe its kernel, so the result is
//! the largest circle in the kernel, not in the polygon.

use nalgebra::{Matrix3, Vector3};

use super::check_cell;
use crate::error::CellError;
use crate::geom::{halfplanes_of, Cell, Point, RadiusResult};

/// Feasibility slack for the triple enumeration.
pub const CHEBYSHEV_EPS: f64 = 1e-9;

pub fn chebyshev_center(cell: &Cell, eps: f64) -> Result<RadiusResult, CellError> {
    check_cell(cell)?;
    let hs = halfplanes_of(cell);
    if hs.len() < 3 {
        return Err(CellError::Degenerate);
    }
    let m = hs.len();
    let mut best: Option<RadiusResult> = None;
    for i in 0..m {
        for j in (i + 1)..m {
            for k in (j + 1)..m {
                let (a, b, c) = (hs[i], hs[j], hs[k]);
                let mat = Matrix3::new(
                    a.n.x, a.n.y, 1.0, //
                    b.n.x, b.n.y, 1.0, //
                    c.n.x, c.n.y, 1.0,
                );
                let Some(inv) = mat.try_inverse() else {
                    continue;
                };
                let sol = inv * Vector3::new(a.c, b.c, c.c);
                let (center, r) = (Point::new(sol.x, sol.y), sol.z);
                if !(r.is_finite() && r >= -eps) {
                    continue;
                }
                if !hs.iter().all(|h| h.n.dot(&center) + r <= h.c + eps) {
                    continue;
                }
                if best.is_none_or(|cur| r > cur.radius) {
                    best = Some(RadiusResult::new(center, r.max(0.0)));
                }
            }
        }
    }
    best.ok_or(CellError::Degenerate)
}
