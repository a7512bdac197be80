//! Site-centered inscribed circle: the largest circle around the site that
//! stays inside the cell, i.e. the minimum site-to-edge distance.

use crate::error::CellError;
use crate::geom::{min_segment_distance, Cell, Point, RadiusResult};

/// Index and distance of the boundary segment closest to `p`.
///
/// Ties keep the lowest index. Fails fast on an empty boundary.
pub fn nearest_edge(cell: &Cell, p: Point) -> Result<(usize, f64), CellError> {
    min_segment_distance(p, &cell.segments).ok_or(CellError::NoSegments)
}

/// Circle centered at the site with radius `min_i dist(site, segment_i)`.
pub fn site_radius(cell: &Cell) -> Result<RadiusResult, CellError> {
    let (_, r) = nearest_edge(cell, cell.site)?;
    Ok(RadiusResult::new(cell.site, r))
}
