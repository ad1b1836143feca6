//! Inside/outside classification of triangulated faces.
//!
//! A face is in the domain when its representative point lies strictly
//! inside the outer ring and not strictly inside any hole. Only the ring
//! geometry is consulted, never the triangulation's own notion of
//! inside/outside, so the result survives arbitrary refinement.

use spade::handles::FixedVertexHandle;

use crate::geometry::Point;
use crate::geometry::predicates::{BoundedSide, bounded_side};
use crate::kernel::Triangulation;

/// Weight of each edge vector in [`representative_point`].
const EDGE_WEIGHT: f64 = 0.33;

/// Ring geometry of the domain: ring 0 is the outer boundary, the rest are holes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Domain {
    rings: Vec<Vec<Point>>,
}

impl Domain {
    pub fn new(rings: Vec<Vec<Point>>) -> Self {
        Domain { rings }
    }

    /// Snapshots the current positions of ring vertices.
    pub fn from_rings(tri: &Triangulation, rings: &[Vec<FixedVertexHandle>]) -> Self {
        Domain::new(
            rings
                .iter()
                .map(|ring| ring.iter().map(|&v| tri.position(v)).collect())
                .collect(),
        )
    }

    pub fn outer(&self) -> Option<&[Point]> {
        self.rings.first().map(Vec::as_slice)
    }

    pub fn holes(&self) -> &[Vec<Point>] {
        self.rings.get(1..).unwrap_or(&[])
    }

    /// Strictly inside the outer ring and not strictly inside any hole.
    pub fn contains(&self, p: Point) -> bool {
        let Some(outer) = self.outer() else {
            return false;
        };
        if bounded_side(outer, p) != BoundedSide::OnBoundedSide {
            return false;
        }
        !self
            .holes()
            .iter()
            .any(|hole| bounded_side(hole, p) == BoundedSide::OnBoundedSide)
    }

    /// Classifies a triangle by its representative point.
    pub fn contains_face(&self, corners: [Point; 3]) -> bool {
        self.contains(representative_point(corners))
    }
}

/// A point strictly inside a non-degenerate triangle: the first corner
/// offset by 0.33 of each edge vector leaving it.
pub fn representative_point([a, b, c]: [Point; 3]) -> Point {
    a + (b - a) * EDGE_WEIGHT + (c - a) * EDGE_WEIGHT
}

/// Writes the domain flag of every face of `tri`. Returns the number of
/// faces classified inside.
pub fn classify_faces(tri: &mut Triangulation, domain: &Domain) -> usize {
    let flags: Vec<_> = tri
        .faces()
        .map(|face| {
            let corners = face.vertices.map(|v| tri.position(v));
            (face.handle, domain.contains_face(corners))
        })
        .collect();
    let inside = flags.iter().filter(|(_, inside)| *inside).count();
    log::info!("{} of {} faces are in the domain", inside, flags.len());
    tri.set_domain(flags);
    inside
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    fn square_with_hole() -> Domain {
        Domain::new(vec![
            vec![p(0.0, 0.0), p(4.0, 0.0), p(4.0, 4.0), p(0.0, 4.0)],
            vec![p(1.0, 1.0), p(3.0, 1.0), p(3.0, 3.0), p(1.0, 3.0)],
        ])
    }

    #[test]
    fn representative_point_is_interior() {
        let rp = representative_point([p(0.0, 0.0), p(3.0, 0.0), p(0.0, 3.0)]);
        assert!((rp.x - 0.99).abs() < 1e-12);
        assert!((rp.y - 0.99).abs() < 1e-12);
    }

    #[test]
    fn contains_respects_holes() {
        let domain = square_with_hole();
        assert!(domain.contains(p(0.5, 0.5)));
        assert!(!domain.contains(p(2.0, 2.0)));
        assert!(!domain.contains(p(5.0, 5.0)));
    }

    #[test]
    fn boundary_points_are_outside() {
        let domain = square_with_hole();
        assert!(!domain.contains(p(0.0, 2.0)));
        // on a hole edge: not strictly inside the hole, so in the domain
        assert!(domain.contains(p(1.0, 2.0)));
    }

    #[test]
    fn faces_classified_by_representative_point() {
        let domain = square_with_hole();
        let near_corner = [p(0.17, 0.17), p(1.17, 0.17), p(0.17, 1.17)];
        let in_hole = [p(1.67, 1.67), p(2.67, 1.67), p(1.67, 2.67)];
        assert!(domain.contains_face(near_corner));
        assert!(!domain.contains_face(in_hole));
    }

    #[test]
    fn empty_domain_contains_nothing() {
        assert!(!Domain::default().contains(p(0.0, 0.0)));
    }
}
