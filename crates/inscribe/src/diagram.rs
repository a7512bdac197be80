//! Bounded Voronoi cells from a site set.
//!
//! The triangulation itself is delegated to `spade`. Each cell is the bounding
//! rectangle clipped by the bisector half-planes of the site's Delaunay
//! neighbours, so its boundary ring inherits the rectangle's orientation and
//! clipped vertices on a rectangle side carry that side's exact coordinate.
//!
//! Conventions
//! - Duplicate sites collapse to one cell (first occurrence wins).
//! - Every site is triangulated, including sites outside the region, so cells
//!   near the rim see all their neighbours. Cells whose clipped ring has fewer
//!   than 3 vertices are dropped.
//! - Consecutive ring vertices closer than `COALESCE_EPS` are merged, which
//!   removes zero-length edges at co-circular sites.

use spade::{DelaunayTriangulation, Point2, Triangulation};

use crate::error::DiagramError;
use crate::geom::{BoundingRegion, Cell, Point};

/// Distance below which consecutive ring vertices are merged.
pub const COALESCE_EPS: f64 = 1e-9;

/// Seam for the external diagram construction: sites + region → cells.
pub trait DiagramBuilder {
    fn build(&self, sites: &[Point], region: &BoundingRegion) -> Result<Vec<Cell>, DiagramError>;
}

/// `DiagramBuilder` backed by spade's Delaunay triangulation.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpadeVoronoi;

impl DiagramBuilder for SpadeVoronoi {
    fn build(&self, sites: &[Point], region: &BoundingRegion) -> Result<Vec<Cell>, DiagramError> {
        build_cells(sites, region)
    }
}

/// Keep the part of a convex ring where `(x − m)·d <= 0` (Sutherland–Hodgman, one plane).
fn clip_halfplane(ring: &[Point], m: Point, d: Point) -> Vec<Point> {
    let n = ring.len();
    let mut out = Vec::with_capacity(n + 1);
    for i in 0..n {
        let p = ring[i];
        let q = ring[(i + 1) % n];
        let fp = (p - m).dot(&d);
        let fq = (q - m).dot(&d);
        if fp <= 0.0 {
            out.push(p);
        }
        if (fp < 0.0 && fq > 0.0) || (fp > 0.0 && fq < 0.0) {
            let t = fp / (fp - fq);
            out.push(p + (q - p) * t);
        }
    }
    out
}

fn coalesce(ring: Vec<Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(ring.len());
    for p in ring {
        if out.last().is_some_and(|l| (p - *l).norm() < COALESCE_EPS) {
            continue;
        }
        out.push(p);
    }
    while out.len() > 1 {
        let (first, last) = (out[0], out[out.len() - 1]);
        if (first - last).norm() < COALESCE_EPS {
            out.pop();
        } else {
            break;
        }
    }
    out
}

/// Voronoi cells of `sites` clipped to `region`, in first-occurrence order.
pub fn build_cells(sites: &[Point], region: &BoundingRegion) -> Result<Vec<Cell>, DiagramError> {
    if !region.is_valid() {
        return Err(DiagramError::InvalidRegion(*region));
    }
    let mut dt: DelaunayTriangulation<Point2<f64>> = DelaunayTriangulation::new();
    for (index, s) in sites.iter().enumerate() {
        if !(s.x.is_finite() && s.y.is_finite()) {
            return Err(DiagramError::NonFiniteSite { index });
        }
        dt.insert(Point2::new(s.x, s.y))
            .map_err(DiagramError::Triangulation)?;
    }

    let rect = region.corners().to_vec();
    let mut cells = Vec::with_capacity(dt.num_vertices());
    let mut dropped = 0usize;
    for v in dt.vertices() {
        let pos = v.position();
        let site = Point::new(pos.x, pos.y);
        let mut ring = rect.clone();
        for e in v.out_edges() {
            let q = e.to().position();
            let other = Point::new(q.x, q.y);
            ring = clip_halfplane(&ring, (site + other) * 0.5, other - site);
            if ring.is_empty() {
                break;
            }
        }
        let ring = coalesce(ring);
        if ring.len() < 3 {
            dropped += 1;
            continue;
        }
        cells.push(Cell::from_vertices(site, &ring));
    }
    tracing::debug!(
        sites = sites.len(),
        unique = dt.num_vertices(),
        cells = cells.len(),
        dropped,
        "voronoi cells built"
    );
    Ok(cells)
}
