//! Value types shared by the classifier, the radius computations and the aggregator.
//!
//! - `Segment`: one boundary edge of a cell (start, end).
//! - `Cell`: a site plus its ordered boundary ring.
//! - `BoundingRegion`: axis-aligned rectangle used to detect clipped cells.
//! - `RadiusResult`: a circle (center, radius).
//!
//! Code cross-refs: `distance::point_segment_distance`, `classify::classify`

use nalgebra::Vector2;

/// A planar point. Value type; no identity beyond its coordinates.
pub type Point = Vector2<f64>;

/// Boundary edge `start → end`. Direction does not matter for distances.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    #[inline]
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }
    #[inline]
    pub fn reversed(&self) -> Self {
        Self {
            start: self.end,
            end: self.start,
        }
    }
    #[inline]
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
    #[inline]
    pub fn midpoint(&self) -> Point {
        (self.start + self.end) * 0.5
    }
}

/// Winding of a boundary ring.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
    CounterClockwise,
    Clockwise,
    /// Zero signed area (collinear or empty ring).
    Degenerate,
}

/// A site and the ordered segments bounding its region.
///
/// Invariants (when well formed):
/// - `segments[i].end == segments[(i + 1) % n].start` (closed loop).
///
/// The type does not enforce the invariant; `classify` reports malformed cells.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub site: Point,
    pub segments: Vec<Segment>,
}

impl Cell {
    pub fn new(site: Point, segments: Vec<Segment>) -> Self {
        Self { site, segments }
    }

    /// Close an ordered vertex ring into segments `v[i] → v[i+1]` (wrapping).
    pub fn from_vertices(site: Point, vertices: &[Point]) -> Self {
        let n = vertices.len();
        let segments = (0..n)
            .map(|i| Segment::new(vertices[i], vertices[(i + 1) % n]))
            .collect();
        Self { site, segments }
    }

    /// Number of boundary segments.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.segments.len()
    }

    /// Segment start points in ring order.
    pub fn vertices(&self) -> impl Iterator<Item = Point> + '_ {
        self.segments.iter().map(|s| s.start)
    }

    /// True if every segment ends where the next one starts (within `eps`).
    pub fn is_closed(&self, eps: f64) -> bool {
        let n = self.segments.len();
        if n == 0 {
            return false;
        }
        (0..n).all(|i| (self.segments[i].end - self.segments[(i + 1) % n].start).norm() <= eps)
    }

    /// Shoelace signed area of the start-point ring (positive for CCW in a y-up frame).
    pub fn signed_area(&self) -> f64 {
        let twice: f64 = self
            .segments
            .iter()
            .map(|s| s.start.x * s.end.y - s.end.x * s.start.y)
            .sum();
        0.5 * twice
    }

    pub fn orientation(&self) -> Orientation {
        let a = self.signed_area();
        if a > 0.0 {
            Orientation::CounterClockwise
        } else if a < 0.0 {
            Orientation::Clockwise
        } else {
            Orientation::Degenerate
        }
    }
}

/// Axis-aligned rectangle `[left, right] × [top, bottom]`.
///
/// `top`/`bottom` follow the canvas convention (y grows downwards), so
/// `top <= bottom` for a canvas-derived region. Only equality tests are applied
/// to the sides, so the convention is not load-bearing.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingRegion {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl BoundingRegion {
    /// Canvas-sized region anchored at the origin.
    pub fn canvas(width: f64, height: f64) -> Self {
        Self {
            left: 0.0,
            right: width,
            top: 0.0,
            bottom: height,
        }
    }
    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }
    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
    /// Closed containment test.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        let (y0, y1) = if self.top <= self.bottom {
            (self.top, self.bottom)
        } else {
            (self.bottom, self.top)
        };
        p.x >= self.left && p.x <= self.right && p.y >= y0 && p.y <= y1
    }
    /// Corners in ring order: (left, top), (right, top), (right, bottom), (left, bottom).
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right, self.top),
            Point::new(self.right, self.bottom),
            Point::new(self.left, self.bottom),
        ]
    }
    pub fn is_valid(&self) -> bool {
        [self.left, self.right, self.top, self.bottom]
            .iter()
            .all(|v| v.is_finite())
            && self.left < self.right
            && self.top != self.bottom
    }
}

/// A circle: center and non-negative radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RadiusResult {
    pub center: Point,
    pub radius: f64,
}

impl RadiusResult {
    #[inline]
    pub fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}
