//! Jittered hexagonal ("brick") lattice used as the site set of the diagram.
//!
//! Model
//! - `hex_radius = radius / cos 30°`, `hex_height = √3 · hex_radius`.
//! - `cols = floor(width / (0.75 · hex_height))`; the row count is a fixed policy
//!   (120 by default), not derived from the canvas height.
//! - Row `r`, column `c`: `x = hex_height·c + hex_height/2` on even rows (no offset on
//!   odd rows), `y = (1.5·hex_radius·r + hex_radius) · scale_y`.
//! - Each coordinate gets independent uniform noise in `[−jitter/2, +jitter/2]`.
//!
//! Points are emitted row-major. Rows past the canvas height are kept; the
//! diagram builder still triangulates them, so they shape the cells near the
//! rim, and drops only cells that clip away to nothing inside the region.
//!
//! A configuration may produce at most `MAX_POINTS` nodes.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::LatticeError;
use crate::geom::Point;

/// Upper bound on `rows · cols` accepted by `LatticeCfg::validate`.
pub const MAX_POINTS: usize = 4_000_000;

/// Lattice parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatticeCfg {
    /// Base radius (inner radius of the ideal hexagon).
    pub radius: f64,
    /// Vertical compression; conceptually in `(0, 1]`.
    pub scale_y: f64,
    /// Full width of the uniform jitter window.
    pub jitter: f64,
    /// Canvas width the columns must cover.
    pub width: f64,
    pub rows: usize,
}

impl Default for LatticeCfg {
    fn default() -> Self {
        Self {
            radius: 60.0,
            scale_y: 0.31,
            jitter: 20.0,
            width: 960.0,
            rows: 120,
        }
    }
}

impl LatticeCfg {
    pub fn validate(&self) -> Result<(), LatticeError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(LatticeError::invalid("radius must be finite and > 0"));
        }
        if !(self.scale_y.is_finite() && self.scale_y > 0.0) {
            return Err(LatticeError::invalid("scale_y must be finite and > 0"));
        }
        if !(self.jitter.is_finite() && self.jitter >= 0.0) {
            return Err(LatticeError::invalid("jitter must be finite and >= 0"));
        }
        if !(self.width.is_finite() && self.width > 0.0) {
            return Err(LatticeError::invalid("width must be finite and > 0"));
        }
        if self.rows == 0 {
            return Err(LatticeError::invalid("need at least one row"));
        }
        let geo = self.geometry();
        match geo.rows.checked_mul(geo.cols) {
            Some(n) if n <= MAX_POINTS => Ok(()),
            _ => Err(LatticeError::invalid(format!(
                "{} rows × {} cols exceeds {MAX_POINTS} points",
                geo.rows, geo.cols
            ))),
        }
    }

    /// Derived spacing constants.
    pub fn geometry(&self) -> LatticeGeometry {
        let hex_radius = self.radius / (std::f64::consts::PI / 6.0).cos();
        let hex_height = 3f64.sqrt() * hex_radius;
        let cols = (self.width / (hex_height * 0.75)).floor().max(0.0) as usize;
        LatticeGeometry {
            hex_radius,
            hex_height,
            cols,
            rows: self.rows,
        }
    }
}

/// Spacing constants derived from `LatticeCfg`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatticeGeometry {
    pub hex_radius: f64,
    pub hex_height: f64,
    pub cols: usize,
    pub rows: usize,
}

impl LatticeGeometry {
    /// Unjittered position of lattice node (row, col).
    #[inline]
    pub fn node(&self, row: usize, col: usize, scale_y: f64) -> Point {
        let offset = if row % 2 == 0 {
            self.hex_height / 2.0
        } else {
            0.0
        };
        let x = self.hex_height * col as f64 + offset;
        let y = (self.hex_radius * 1.5 * row as f64 + self.hex_radius) * scale_y;
        Point::new(x, y)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Generate the jittered lattice, drawing noise from `rng` (x then y per node).
///
/// With `jitter == 0` no randomness is consumed.
pub fn hex_lattice<R: Rng>(cfg: &LatticeCfg, rng: &mut R) -> Result<Vec<Point>, LatticeError> {
    cfg.validate()?;
    let geo = cfg.geometry();
    let mut points = Vec::with_capacity(geo.len());
    for row in 0..geo.rows {
        for col in 0..geo.cols {
            let mut p = geo.node(row, col, cfg.scale_y);
            if cfg.jitter > 0.0 {
                p.x += (rng.gen::<f64>() - 0.5) * cfg.jitter;
                p.y += (rng.gen::<f64>() - 0.5) * cfg.jitter;
            }
            points.push(p);
        }
    }
    tracing::debug!(
        rows = geo.rows,
        cols = geo.cols,
        points = points.len(),
        jitter = cfg.jitter,
        "hex lattice generated"
    );
    Ok(points)
}

/// Reproducible lattice from a seed.
pub fn hex_lattice_seeded(cfg: &LatticeCfg, seed: u64) -> Result<Vec<Point>, LatticeError> {
    let mut rng = StdRng::seed_from_u64(seed);
    hex_lattice(cfg, &mut rng)
}
