//! Seed points for holes.
//!
//! Best-effort: the seed is placed just off the second ring vertex along
//! the bisector of its two ring edges. This lands inside the hole when that
//! corner is convex; the second attempt flips the direction for a reflex
//! corner. Neither attempt is guaranteed for arbitrary rings.

use crate::geometry::Point;
use crate::geometry::predicates::{BoundedSide, bounded_side};

/// Offset used when the corner is assumed convex.
pub const CONVEX_OFFSET: f64 = 0.0001;
/// Offset used for the retry, assuming a reflex corner.
pub const REFLEX_OFFSET: f64 = -0.01;

/// Which attempt produced the seed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeedPlacement {
    FirstAttempt,
    SecondAttempt,
    /// Neither attempt landed inside; the second attempt's point is used anyway.
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Seed {
    pub point: Point,
    pub placement: SeedPlacement,
}

fn offset_from_corner(a: Point, b: Point, c: Point, eps: f64) -> Point {
    b + ((a - b) + (c - b)) * eps
}

/// Synthesizes a point inside `hole`. Returns `None` for rings with fewer
/// than three vertices.
pub fn synthesize_seed(hole: &[Point]) -> Option<Seed> {
    let [a, b, c] = match hole {
        [a, b, c, ..] => [*a, *b, *c],
        _ => return None,
    };
    let inside = |p: Point| bounded_side(hole, p) == BoundedSide::OnBoundedSide;

    let first = offset_from_corner(a, b, c, CONVEX_OFFSET);
    if inside(first) {
        log::info!("Seed is inside the hole on first attempt");
        return Some(Seed {
            point: first,
            placement: SeedPlacement::FirstAttempt,
        });
    }

    let second = offset_from_corner(a, b, c, REFLEX_OFFSET);
    let placement = if inside(second) {
        log::info!("Seed is inside the hole on second attempt");
        SeedPlacement::SecondAttempt
    } else {
        log::error!(
            "Seed point ({}, {}) is not in the hole; refinement result will be bad",
            second.x,
            second.y
        );
        SeedPlacement::Failed
    };
    Some(Seed {
        point: second,
        placement,
    })
}

/// One seed per hole ring (rings after the first), skipping rings too short
/// to bound a hole.
pub fn hole_seeds(rings: &[Vec<Point>]) -> Vec<Point> {
    rings
        .iter()
        .enumerate()
        .skip(1)
        .filter_map(|(index, ring)| {
            let seed = synthesize_seed(ring);
            if seed.is_none() {
                log::error!("Hole ring {index} has fewer than 3 vertices; no seed placed");
            }
            seed.map(|s| s.point)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn convex_corner_first_attempt() {
        let hole = vec![p(1.0, 1.0), p(3.0, 1.0), p(3.0, 3.0), p(1.0, 3.0)];
        let seed = synthesize_seed(&hole).unwrap();
        assert_eq!(seed.placement, SeedPlacement::FirstAttempt);
        assert_eq!(bounded_side(&hole, seed.point), BoundedSide::OnBoundedSide);
    }

    #[test]
    fn reflex_corner_second_attempt() {
        let hole = vec![
            p(4.0, 2.0),
            p(2.0, 2.0),
            p(2.0, 4.0),
            p(0.0, 4.0),
            p(0.0, 0.0),
            p(4.0, 0.0),
        ];
        let seed = synthesize_seed(&hole).unwrap();
        assert_eq!(seed.placement, SeedPlacement::SecondAttempt);
        assert_eq!(bounded_side(&hole, seed.point), BoundedSide::OnBoundedSide);
    }

    #[test]
    fn straight_corner_fails_but_returns_point() {
        let hole = vec![p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0), p(2.0, 2.0), p(0.0, 2.0)];
        let seed = synthesize_seed(&hole).unwrap();
        assert_eq!(seed.placement, SeedPlacement::Failed);
        assert_eq!(seed.point, p(1.0, 0.0));
    }

    #[test]
    fn short_ring_has_no_seed() {
        assert!(synthesize_seed(&[p(0.0, 0.0), p(1.0, 0.0)]).is_none());
    }

    #[test]
    fn seeds_skip_outer_ring() {
        let rings = vec![
            vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)],
            vec![p(1.0, 1.0), p(3.0, 1.0), p(3.0, 3.0), p(1.0, 3.0)],
            vec![p(5.0, 5.0)],
        ];
        let seeds = hole_seeds(&rings);
        assert_eq!(seeds.len(), 1);
        assert!(seeds[0].x > 2.9 && seeds[0].y < 1.1);
    }
}
