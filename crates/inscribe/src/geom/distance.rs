use super::types::{Orientation, Point, Segment};

/// Clamped projection parameter of `p` onto `a → b`.
///
/// A zero-length segment maps to `-1` so that the clamp lands on `a`.
#[inline]
fn projection_param(p: Point, a: Point, b: Point) -> f64 {
    let ab = b - a;
    let len_sq = ab.norm_squared();
    let t = if len_sq != 0.0 {
        (p - a).dot(&ab) / len_sq
    } else {
        -1.0
    };
    t.clamp(0.0, 1.0)
}

/// Closest point to `p` on the finite segment `a → b`.
#[inline]
pub fn closest_point_raw(p: Point, a: Point, b: Point) -> Point {
    let t = projection_param(p, a, b);
    a + (b - a) * t
}

/// Euclidean distance from `p` to the finite segment `a → b` (not the infinite line).
///
/// Degenerate segments (`a == b`) yield `|p − a|`. Always finite and non-negative
/// for finite inputs.
#[inline]
pub fn point_segment_distance_raw(p: Point, a: Point, b: Point) -> f64 {
    (p - closest_point_raw(p, a, b)).norm()
}

#[inline]
pub fn closest_point_on_segment(p: Point, seg: &Segment) -> Point {
    closest_point_raw(p, seg.start, seg.end)
}

#[inline]
pub fn point_segment_distance(p: Point, seg: &Segment) -> f64 {
    point_segment_distance_raw(p, seg.start, seg.end)
}

/// Signed distance from `p` to the supporting line of `seg`, positive on the
/// interior side of a ring with the given orientation.
///
/// Zero-length segments and degenerate rings fall back to the unsigned segment
/// distance.
pub fn signed_edge_distance(p: Point, seg: &Segment, orientation: Orientation) -> f64 {
    let edge = seg.end - seg.start;
    let len = edge.norm();
    if len == 0.0 {
        return point_segment_distance(p, seg);
    }
    // cross(edge, p - start) > 0 ⇔ p lies to the left of start → end.
    let rel = p - seg.start;
    let left = (edge.x * rel.y - edge.y * rel.x) / len;
    match orientation {
        Orientation::CounterClockwise => left,
        Orientation::Clockwise => -left,
        Orientation::Degenerate => point_segment_distance(p, seg),
    }
}

/// Minimum distance from `p` to any segment, with the index of the minimizer.
///
/// Returns `None` for an empty slice. Ties keep the first segment.
pub fn min_segment_distance(p: Point, segments: &[Segment]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, s) in segments.iter().enumerate() {
        let d = point_segment_distance(p, s);
        if best.is_none_or(|(_, b)| d < b) {
            best = Some((i, d));
        }
    }
    best
}
