//! Planar primitives for cell analysis.
//!
//! Purpose
//! - Value types for cells, segments, bounding regions and circles.
//! - Point-to-segment distance (finite segment, clamped projection), the
//!   single primitive every radius computation reduces to.
//! - A half-plane view of convex cells for the exact solver and inside tests.
//!
//! Code cross-refs: `inradius::site_radius`, `incenter::find_incenter`,
//! `incenter::chebyshev_center`

pub mod distance;
pub mod halfplane;
mod types;

pub use distance::{
    closest_point_on_segment, min_segment_distance, point_segment_distance,
    point_segment_distance_raw, signed_edge_distance,
};
pub use halfplane::{contains_eps, halfplanes_of, Hs2};
pub use types::{BoundingRegion, Cell, Orientation, Point, RadiusResult, Segment};
