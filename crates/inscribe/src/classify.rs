//! Eligibility gate: which cells are analyzed.
//!
//! A cell is analyzed only if none of its segment endpoints lies on a side of
//! the bounding region and it has the expected number of edges (hexagonal
//! interior cells of a lattice). Clipped or irregular cells are skipped.

use crate::geom::{BoundingRegion, Cell};

/// Classifier configuration.
///
/// `boundary_tol = 0.0` is exact equality against the region sides. Diagram
/// builders that clip by interpolation may leave tiny residues; a small positive
/// tolerance catches those at the cost of also excluding interior cells whose
/// vertices come within `boundary_tol` of a side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClassifyCfg {
    pub expected_edges: usize,
    pub boundary_tol: f64,
}

impl Default for ClassifyCfg {
    fn default() -> Self {
        Self {
            expected_edges: 6,
            boundary_tol: 0.0,
        }
    }
}

/// Outcome of classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellClass {
    Analyzable,
    OnBoundary,
    UnexpectedShape { edges: usize },
    /// No boundary segments at all.
    Degenerate,
}

impl CellClass {
    #[inline]
    pub fn is_analyzable(&self) -> bool {
        matches!(self, CellClass::Analyzable)
    }
}

#[inline]
fn on_side(v: f64, side: f64, tol: f64) -> bool {
    if tol <= 0.0 {
        v == side
    } else {
        (v - side).abs() <= tol
    }
}

/// True if any segment endpoint has `x` on the left/right side or `y` on the
/// top/bottom side of `region`.
pub fn touches_boundary(cell: &Cell, region: &BoundingRegion, tol: f64) -> bool {
    cell.segments.iter().any(|s| {
        [s.start, s.end].iter().any(|p| {
            on_side(p.x, region.left, tol)
                || on_side(p.x, region.right, tol)
                || on_side(p.y, region.top, tol)
                || on_side(p.y, region.bottom, tol)
        })
    })
}

#[inline]
pub fn has_expected_shape(cell: &Cell, expected_edges: usize) -> bool {
    cell.edge_count() == expected_edges
}

/// Boundary contact is checked before shape, so a boundary cell is reported as
/// `OnBoundary` whatever its edge count.
pub fn classify(cell: &Cell, region: &BoundingRegion, cfg: &ClassifyCfg) -> CellClass {
    if cell.segments.is_empty() {
        return CellClass::Degenerate;
    }
    if touches_boundary(cell, region, cfg.boundary_tol) {
        return CellClass::OnBoundary;
    }
    if !has_expected_shape(cell, cfg.expected_edges) {
        return CellClass::UnexpectedShape {
            edges: cell.edge_count(),
        };
    }
    CellClass::Analyzable
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::tests::{axis_square, regular_hexagon};
    use crate::geom::Segment;
    use nalgebra::vector;

    fn region() -> BoundingRegion {
        BoundingRegion::canvas(100.0, 80.0)
    }

    #[test]
    fn interior_hexagon_is_analyzable() {
        let hex = regular_hexagon(vector![50.0, 40.0], 5.0);
        let cfg = ClassifyCfg::default();
        assert!(!touches_boundary(&hex, &region(), 0.0));
        assert!(has_expected_shape(&hex, 6));
        assert_eq!(classify(&hex, &region(), &cfg), CellClass::Analyzable);
    }

    #[test]
    fn endpoint_on_left_side_excludes_any_shape() {
        let mut hex = regular_hexagon(vector![50.0, 40.0], 5.0);
        hex.segments[3].end.x = 0.0;
        let cfg = ClassifyCfg::default();
        assert_eq!(classify(&hex, &region(), &cfg), CellClass::OnBoundary);

        let mut sq = axis_square(vector![50.0, 40.0], 5.0);
        sq.segments[0].start.x = 0.0;
        assert_eq!(classify(&sq, &region(), &cfg), CellClass::OnBoundary);
    }

    #[test]
    fn each_side_is_detected() {
        let r = region();
        for p in [
            vector![100.0, 40.0],
            vector![50.0, 0.0],
            vector![50.0, 80.0],
        ] {
            let cell = Cell::new(
                vector![50.0, 40.0],
                vec![Segment::new(vector![50.0, 40.0], p)],
            );
            assert!(touches_boundary(&cell, &r, 0.0), "{p:?}");
        }
    }

    #[test]
    fn exact_equality_ignores_near_misses_unless_tolerant() {
        let mut hex = regular_hexagon(vector![50.0, 40.0], 5.0);
        hex.segments[0].start.x = 1e-12;
        let exact = ClassifyCfg::default();
        assert_eq!(classify(&hex, &region(), &exact), CellClass::Analyzable);
        let tolerant = ClassifyCfg {
            boundary_tol: 1e-9,
            ..exact
        };
        assert_eq!(classify(&hex, &region(), &tolerant), CellClass::OnBoundary);
    }

    #[test]
    fn wrong_edge_count_and_empty() {
        let sq = axis_square(vector![50.0, 40.0], 5.0);
        let cfg = ClassifyCfg::default();
        assert_eq!(
            classify(&sq, &region(), &cfg),
            CellClass::UnexpectedShape { edges: 4 }
        );
        let four = ClassifyCfg {
            expected_edges: 4,
            ..cfg
        };
        assert!(classify(&sq, &region(), &four).is_analyzable());
        let empty = Cell::new(vector![1.0, 1.0], Vec::new());
        assert_eq!(classify(&empty, &region(), &cfg), CellClass::Degenerate);
    }
}
