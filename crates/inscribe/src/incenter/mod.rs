//! Approximate incircle of a cell by steepest-ascent hill climbing.
//!
//! Model
//! - Start at the site. Each round evaluates the 9 points `current + (i·step, j·step)`
//!   for `i, j ∈ {−1, 0, +1}`; a candidate's radius is its minimum distance to the
//!   boundary segments. The best strict improvement becomes the next `current`.
//! - Stops at the first round without improvement (a local maximum on the step
//!   grid) or after `max_iterations` rounds. No randomness: identical cells give
//!   identical results.
//!
//! Validity
//! - `Validity::Unsigned` keeps the historical predicate `distance >= 0` on every
//!   edge, which holds for every finite point, so every candidate is accepted and
//!   only the radius comparison selects. A candidate outside the cell can win if
//!   its distance to the nearest edge beats the inside candidates.
//! - `Validity::Inside` accepts a candidate only if it lies on the interior side
//!   of every edge (signed distance >= 0). This changes results for cells where
//!   the climb would otherwise leave the polygon.
//!
//! The exact alternative is `exact::chebyshev_center`.

mod exact;

pub use exact::{chebyshev_center, CHEBYSHEV_EPS};

use crate::error::CellError;
use crate::geom::{min_segment_distance, signed_edge_distance, Cell, Point, RadiusResult};

/// Candidate acceptance rule.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Validity {
    #[default]
    Unsigned,
    Inside,
}

/// Incircle method selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Method {
    #[default]
    HillClimb,
    Exact,
}

/// Hill-climbing configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchCfg {
    /// Grid step for the 3×3 neighbourhood. Non-positive or NaN values are clamped.
    pub step: f64,
    pub max_iterations: usize,
    pub validity: Validity,
}

impl Default for SearchCfg {
    fn default() -> Self {
        Self {
            step: 1.0,
            max_iterations: 100,
            validity: Validity::Unsigned,
        }
    }
}

/// Search result plus bookkeeping for reports.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchTrace {
    pub result: RadiusResult,
    /// Rounds evaluated (including the final non-improving one).
    pub iterations: usize,
    /// The round cap ended the search while it was still improving.
    pub hit_cap: bool,
}

pub(crate) fn check_cell(cell: &Cell) -> Result<(), CellError> {
    if cell.segments.is_empty() {
        return Err(CellError::NoSegments);
    }
    let finite = |p: Point| p.x.is_finite() && p.y.is_finite();
    if !finite(cell.site) || !cell.segments.iter().all(|s| finite(s.start) && finite(s.end)) {
        return Err(CellError::NonFinite);
    }
    Ok(())
}

/// Approximate incircle; see the module docs for the model.
pub fn find_incenter(cell: &Cell, cfg: &SearchCfg) -> Result<RadiusResult, CellError> {
    find_incenter_traced(cell, cfg).map(|t| t.result)
}

pub fn find_incenter_traced(cell: &Cell, cfg: &SearchCfg) -> Result<SearchTrace, CellError> {
    check_cell(cell)?;
    let step = cfg.step.abs().max(1e-12);
    let orientation = cell.orientation();
    let is_valid = |c: Point| match cfg.validity {
        Validity::Unsigned => true,
        Validity::Inside => cell
            .segments
            .iter()
            .all(|s| signed_edge_distance(c, s, orientation) >= 0.0),
    };
    let radius_at = |c: Point| {
        min_segment_distance(c, &cell.segments)
            .map(|(_, d)| d)
            .unwrap_or(0.0)
    };

    let mut current = cell.site;
    let mut best = cell.site;
    let mut best_radius = 0.0;
    let mut iterations = 0;
    let mut hit_cap = false;

    for round in 0..cfg.max_iterations {
        iterations = round + 1;
        let mut improved = false;
        for i in -1i32..=1 {
            for j in -1i32..=1 {
                let candidate = current + Point::new(f64::from(i) * step, f64::from(j) * step);
                if !is_valid(candidate) {
                    continue;
                }
                let r = radius_at(candidate);
                if r > best_radius {
                    best = candidate;
                    best_radius = r;
                    improved = true;
                }
            }
        }
        if !improved {
            break;
        }
        current = best;
        hit_cap = round + 1 == cfg.max_iterations;
    }

    if hit_cap {
        tracing::trace!(
            site = ?(cell.site.x, cell.site.y),
            max_iterations = cfg.max_iterations,
            "incenter search stopped at the iteration cap"
        );
    }
    Ok(SearchTrace {
        result: RadiusResult::new(best, best_radius),
        iterations,
        hit_cap,
    })
}

/// Incircle by the selected method. The exact method reports zero iterations.
pub fn incircle(cell: &Cell, method: Method, cfg: &SearchCfg) -> Result<SearchTrace, CellError> {
    match method {
        Method::HillClimb => find_incenter_traced(cell, cfg),
        Method::Exact => chebyshev_center(cell, CHEBYSHEV_EPS).map(|result| SearchTrace {
            result,
            iterations: 0,
            hit_cap: false,
        }),
    }
}
