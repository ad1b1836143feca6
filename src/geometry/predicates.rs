//! Planar predicates on `f64` coordinates.
//!
//! # Tolerances
//! Coordinates produced by the kernel during refinement are rounded
//! constructions (midpoints of split segments), so collinearity is decided
//! relative to the squared length of the reference segment rather than by
//! an exact sign test. Points closer to a polygon edge than that tolerance
//! are reported [`BoundedSide::OnBoundary`].

use crate::geometry::Point;

/// Relative tolerance for collinearity and on-segment tests.
const COLLINEAR_EPS: f64 = 1e-9;

/// Position of a point relative to a closed polygon.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BoundedSide {
    /// Strictly inside.
    OnBoundedSide,
    /// On an edge or a corner.
    OnBoundary,
    /// Strictly outside.
    OnUnboundedSide,
}

/// Result of intersecting two closed segments.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SegmentIntersection {
    /// The segments are disjoint.
    None,
    /// The segments meet in exactly one point.
    Point(Point),
    /// The segments are collinear and overlap along a segment of positive length.
    Segment(Point, Point),
}

impl SegmentIntersection {
    /// True when the intersection is itself a segment.
    pub fn is_segment(&self) -> bool {
        matches!(self, SegmentIntersection::Segment(..))
    }
}

/// Twice the signed area of `(a, b, c)`; positive for a left turn.
#[inline]
pub fn orientation(a: Point, b: Point, c: Point) -> f64 {
    (b - a).cross(c - a)
}

/// Squared Euclidean distance between two points.
#[inline]
pub fn squared_distance(a: Point, b: Point) -> f64 {
    (b - a).length2()
}

fn is_collinear(a: Point, b: Point, p: Point) -> bool {
    let len2 = squared_distance(a, b);
    if len2 == 0.0 {
        return p == a;
    }
    orientation(a, b, p).abs() <= COLLINEAR_EPS * len2
}

fn on_segment(a: Point, b: Point, p: Point) -> bool {
    if !is_collinear(a, b, p) {
        return false;
    }
    let ab = b - a;
    let len2 = ab.length2();
    if len2 == 0.0 {
        return p == a;
    }
    let t = (p - a).dot(ab) / len2;
    (-COLLINEAR_EPS..=1.0 + COLLINEAR_EPS).contains(&t)
}

/// Classifies `p` against the polygon given by `ring`.
///
/// The ring is closed implicitly; an explicitly repeated closing point
/// contributes a zero-length edge and is harmless. Rings with fewer than
/// three points bound no area.
pub fn bounded_side(ring: &[Point], p: Point) -> BoundedSide {
    let n = ring.len();
    if n == 0 {
        return BoundedSide::OnUnboundedSide;
    }
    let mut inside = false;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        if on_segment(a, b, p) {
            return BoundedSide::OnBoundary;
        }
        // crossing number, half-open in y
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = a.x + (p.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if p.x < x_cross {
                inside = !inside;
            }
        }
    }
    if n < 3 {
        return BoundedSide::OnUnboundedSide;
    }
    if inside {
        BoundedSide::OnBoundedSide
    } else {
        BoundedSide::OnUnboundedSide
    }
}

/// Intersects the closed segments `[a0, a1]` and `[b0, b1]`.
pub fn segment_intersection(a0: Point, a1: Point, b0: Point, b1: Point) -> SegmentIntersection {
    if a0 == a1 {
        return if on_segment(b0, b1, a0) {
            SegmentIntersection::Point(a0)
        } else {
            SegmentIntersection::None
        };
    }
    if b0 == b1 {
        return if on_segment(a0, a1, b0) {
            SegmentIntersection::Point(b0)
        } else {
            SegmentIntersection::None
        };
    }

    if is_collinear(a0, a1, b0) && is_collinear(a0, a1, b1) {
        let dir = a1 - a0;
        let len2 = dir.length2();
        let param = |p: Point| (p - a0).dot(dir) / len2;
        let (mut t0, mut t1) = (param(b0), param(b1));
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        let lo = t0.max(0.0);
        let hi = t1.min(1.0);
        if hi - lo > COLLINEAR_EPS {
            return SegmentIntersection::Segment(a0 + dir * lo, a0 + dir * hi);
        }
        if (hi - lo).abs() <= COLLINEAR_EPS {
            return SegmentIntersection::Point(a0 + dir * lo);
        }
        return SegmentIntersection::None;
    }

    let d1 = orientation(b0, b1, a0);
    let d2 = orientation(b0, b1, a1);
    let d3 = orientation(a0, a1, b0);
    let d4 = orientation(a0, a1, b1);
    let straddles = |u: f64, v: f64| (u <= 0.0 && v >= 0.0) || (u >= 0.0 && v <= 0.0);
    if !straddles(d1, d2) || !straddles(d3, d4) {
        return SegmentIntersection::None;
    }
    let r = a1 - a0;
    let s = b1 - b0;
    let denom = r.cross(s);
    if denom == 0.0 {
        return SegmentIntersection::None;
    }
    let t = (b0 - a0).cross(s) / denom;
    SegmentIntersection::Point(a0 + r * t)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn square(min: f64, max: f64) -> Vec<Point> {
        vec![p(min, min), p(max, min), p(max, max), p(min, max)]
    }

    #[test]
    fn bounded_side_square() {
        let ring = square(0.0, 4.0);
        assert_eq!(bounded_side(&ring, p(1.0, 1.0)), BoundedSide::OnBoundedSide);
        assert_eq!(bounded_side(&ring, p(4.0, 2.0)), BoundedSide::OnBoundary);
        assert_eq!(bounded_side(&ring, p(0.0, 0.0)), BoundedSide::OnBoundary);
        assert_eq!(bounded_side(&ring, p(5.0, 2.0)), BoundedSide::OnUnboundedSide);
    }

    #[test]
    fn bounded_side_ignores_explicit_closing_point() {
        let mut ring = square(0.0, 4.0);
        ring.push(p(0.0, 0.0));
        assert_eq!(bounded_side(&ring, p(2.0, 2.0)), BoundedSide::OnBoundedSide);
        assert_eq!(bounded_side(&ring, p(-1.0, 2.0)), BoundedSide::OnUnboundedSide);
    }

    #[test]
    fn bounded_side_concave() {
        // U shape opening upwards
        let ring = vec![
            p(0.0, 0.0),
            p(3.0, 0.0),
            p(3.0, 3.0),
            p(2.0, 3.0),
            p(2.0, 1.0),
            p(1.0, 1.0),
            p(1.0, 3.0),
            p(0.0, 3.0),
        ];
        assert_eq!(bounded_side(&ring, p(1.5, 2.0)), BoundedSide::OnUnboundedSide);
        assert_eq!(bounded_side(&ring, p(0.5, 2.0)), BoundedSide::OnBoundedSide);
        assert_eq!(bounded_side(&ring, p(1.5, 0.5)), BoundedSide::OnBoundedSide);
    }

    #[test]
    fn degenerate_ring_bounds_nothing() {
        let ring = vec![p(0.0, 0.0), p(1.0, 1.0)];
        assert_eq!(bounded_side(&ring, p(0.5, 0.5)), BoundedSide::OnBoundary);
        assert_eq!(bounded_side(&ring, p(0.0, 1.0)), BoundedSide::OnUnboundedSide);
    }

    #[test]
    fn collinear_overlap_is_segment() {
        let hit = segment_intersection(p(1.0, 1.0), p(2.0, 2.0), p(0.0, 0.0), p(4.0, 4.0));
        assert_eq!(hit, SegmentIntersection::Segment(p(1.0, 1.0), p(2.0, 2.0)));
    }

    #[test]
    fn collinear_touching_is_point() {
        let hit = segment_intersection(p(0.0, 0.0), p(1.0, 0.0), p(1.0, 0.0), p(3.0, 0.0));
        assert_eq!(hit, SegmentIntersection::Point(p(1.0, 0.0)));
        assert!(!hit.is_segment());
    }

    #[test]
    fn collinear_disjoint_is_none() {
        let hit = segment_intersection(p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(3.0, 0.0));
        assert_eq!(hit, SegmentIntersection::None);
    }

    #[test]
    fn crossing_is_point() {
        let hit = segment_intersection(p(0.0, 0.0), p(2.0, 2.0), p(0.0, 2.0), p(2.0, 0.0));
        assert_eq!(hit, SegmentIntersection::Point(p(1.0, 1.0)));
    }

    #[test]
    fn parallel_is_none() {
        let hit = segment_intersection(p(0.0, 0.0), p(2.0, 0.0), p(0.0, 1.0), p(2.0, 1.0));
        assert_eq!(hit, SegmentIntersection::None);
    }

    #[test]
    fn rounded_midpoint_still_overlaps() {
        let a = p(0.1, 0.7);
        let b = p(3.3, 9.1);
        let mid = p((a.x + b.x) / 2.0, (a.y + b.y) / 2.0);
        assert!(segment_intersection(a, mid, a, b).is_segment());
        assert!(segment_intersection(mid, b, b, a).is_segment());
    }

    #[test]
    fn squared_distance_basic() {
        assert_eq!(squared_distance(p(0.0, 0.0), p(3.0, 4.0)), 25.0);
    }
}
