//! `Triangulation`: a constrained Delaunay triangulation whose vertices
//! carry a [`VertexId`].

use spade::handles::{FixedFaceHandle, FixedVertexHandle, InnerTag};
use spade::{
    AngleLimit, ConstrainedDelaunayTriangulation, HasPosition, Point2, RefinementParameters,
    Triangulation as _,
};

use crate::geometry::Point;
use crate::kernel::{KernelFault, MeshCriteria, TransformOutcome};
use crate::topology::vertex_id::VertexId;

/// Vertex budget of a transform, per vertex already present.
pub const VERTEX_BUDGET_FACTOR: usize = 100;
/// Vertex budget of a size-bounded refinement, per `max_area` cell of the bounding box.
pub const AREA_BUDGET_FACTOR: f64 = 4.0;

/// Vertex payload stored in the triangulation.
///
/// Vertices created by the kernel itself (segment splits, refinement
/// Steiner points) are built through `From<Point2<f64>>` and therefore start
/// with [`VertexId::UNASSIGNED`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KernelVertex {
    position: Point2<f64>,
    id: VertexId,
}

impl KernelVertex {
    pub fn id(&self) -> VertexId {
        self.id
    }
}

impl HasPosition for KernelVertex {
    type Scalar = f64;

    fn position(&self) -> Point2<f64> {
        self.position
    }
}

impl From<Point2<f64>> for KernelVertex {
    fn from(position: Point2<f64>) -> Self {
        KernelVertex {
            position,
            id: VertexId::UNASSIGNED,
        }
    }
}

/// A finite edge with its two incident inner faces (`None` for the outer face).
#[derive(Clone, Copy, Debug)]
pub struct KernelEdge {
    pub from: FixedVertexHandle,
    pub to: FixedVertexHandle,
    pub faces: [Option<FixedFaceHandle<InnerTag>>; 2],
}

/// A finite triangle.
#[derive(Clone, Copy, Debug)]
pub struct KernelFace {
    pub handle: FixedFaceHandle<InnerTag>,
    pub vertices: [FixedVertexHandle; 3],
}

type Cdt = ConstrainedDelaunayTriangulation<KernelVertex>;

/// Constrained Delaunay triangulation with per-face domain flags.
#[derive(Clone, Default)]
pub struct Triangulation {
    cdt: Cdt,
    /// Indexed by inner face index; emptied by every structural change.
    in_domain: Vec<bool>,
}

impl Triangulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `point`, or returns the handle of the vertex already at that
    /// exact position. An existing vertex keeps its identity.
    pub fn insert(&mut self, point: Point) -> Result<FixedVertexHandle, KernelFault> {
        if !point.is_finite() {
            return Err(KernelFault::InvalidPoint {
                x: point.x,
                y: point.y,
                reason: "coordinate is not finite".to_string(),
            });
        }
        let position: Point2<f64> = point.into();
        if let Some(existing) = self.cdt.locate_vertex(position) {
            return Ok(existing.fix());
        }
        let handle = self
            .cdt
            .insert(KernelVertex::from(position))
            .map_err(|err| KernelFault::InvalidPoint {
                x: point.x,
                y: point.y,
                reason: format!("{err:?}"),
            })?;
        self.in_domain.clear();
        Ok(handle)
    }

    /// Forces the segment `a`-`b` into the triangulation.
    ///
    /// Rejected, leaving the triangulation unchanged, when it would cross an
    /// existing constraint.
    pub fn insert_constraint(
        &mut self,
        a: FixedVertexHandle,
        b: FixedVertexHandle,
    ) -> Result<(), KernelFault> {
        if a == b {
            return Ok(());
        }
        if !self.cdt.can_add_constraint(a, b) {
            return Err(KernelFault::IntersectingConstraint(
                self.position(a),
                self.position(b),
            ));
        }
        self.cdt.add_constraint(a, b);
        self.in_domain.clear();
        Ok(())
    }

    /// Splits constraint edges until the triangulation is conforming Delaunay.
    ///
    /// Encroached-segment splitting yields a conforming Gabriel triangulation,
    /// which is in particular conforming Delaunay.
    pub fn make_conforming_delaunay(&mut self) -> Result<TransformOutcome, KernelFault> {
        self.split_encroached_constraints()
    }

    /// Splits constraint edges until every constraint sub-edge is Gabriel
    /// (no vertex inside its diametral circle).
    pub fn make_conforming_gabriel(&mut self) -> Result<TransformOutcome, KernelFault> {
        self.split_encroached_constraints()
    }

    fn split_encroached_constraints(&mut self) -> Result<TransformOutcome, KernelFault> {
        let params = RefinementParameters::<f64>::new()
            .with_angle_limit(AngleLimit::from_deg(0.0))
            .with_max_additional_vertices(self.vertex_budget(None))
            .exclude_outer_faces(false);
        Ok(self.run_refinement(params))
    }

    /// Delaunay mesh refinement under `criteria`.
    ///
    /// Every face is refined, since road constraints make any parity based
    /// notion of inside unreliable. A size bound is enforced on edge length:
    /// edges inside the domain (or on a constraint) still longer than it after
    /// a refinement round are split at their midpoint, and rounds repeat until
    /// none is left or the vertex budget runs out.
    ///
    /// Afterwards the new vertices for which `in_domain` is false, and which
    /// lie on no constraint, are removed again. Faces inside the domain are
    /// bounded by constraints and are not touched by those removals. Each
    /// seed marks a hole and must be outside the domain; seeds that are not
    /// are logged.
    pub fn refine_mesh<F>(
        &mut self,
        seeds: &[Point],
        criteria: MeshCriteria,
        in_domain: F,
    ) -> Result<TransformOutcome, KernelFault>
    where
        F: Fn(Point) -> bool,
    {
        criteria.validate()?;
        for seed in seeds.iter().filter(|&&seed| in_domain(seed)) {
            log::warn!(
                "Seed ({}, {}) is inside the domain; its hole will be meshed",
                seed.x,
                seed.y
            );
        }

        let budget = criteria
            .vertex_budget
            .unwrap_or_else(|| self.vertex_budget(criteria.max_area()));
        let before = self.num_vertices();

        let complete = loop {
            let remaining = budget.saturating_sub(self.num_vertices() - before);
            if !self.run_refinement(quality_parameters(&criteria, remaining)).is_complete() {
                break false;
            }
            if criteria.size_bound <= 0.0 {
                break true;
            }
            let midpoints = self.long_edge_midpoints(criteria.size_bound, &in_domain);
            if midpoints.is_empty() {
                break true;
            }
            let round_start = self.num_vertices();
            for mid in midpoints {
                if self.num_vertices() - before >= budget {
                    break;
                }
                if let Err(fault) = self.insert(mid) {
                    log::warn!("{fault}");
                }
            }
            if self.num_vertices() == round_start || self.num_vertices() - before >= budget {
                break false;
            }
        };

        let removed = self.remove_new_vertices_outside(before, &in_domain);
        let vertices_added = self.num_vertices() - before;
        log::info!(
            "Refinement kept {vertices_added} vertices, dropped {removed} outside the domain"
        );
        Ok(if complete {
            TransformOutcome::Applied { vertices_added }
        } else {
            TransformOutcome::Partial { vertices_added }
        })
    }

    /// Midpoints of edges longer than `max_len` that are constraints or whose
    /// midpoint lies in the domain.
    fn long_edge_midpoints<F>(&self, max_len: f64, in_domain: &F) -> Vec<Point>
    where
        F: Fn(Point) -> bool,
    {
        let max_len2 = max_len * max_len;
        self.cdt
            .undirected_edges()
            .filter_map(|edge| {
                let [a, b] = edge.positions().map(Point::from);
                let mid = (a + b) * 0.5;
                let long = (b - a).length2() > max_len2;
                (long && (edge.is_constraint_edge() || in_domain(mid))).then_some(mid)
            })
            .collect()
    }

    /// Removes vertices with handle index `>= first` that are outside the
    /// domain and not on a constraint edge. Returns how many were removed.
    ///
    /// Removal swaps the last vertex into the freed slot, so going from the
    /// highest index down only ever moves vertices at or above `first`.
    fn remove_new_vertices_outside<F>(&mut self, first: usize, in_domain: &F) -> usize
    where
        F: Fn(Point) -> bool,
    {
        let mut doomed: Vec<_> = self
            .cdt
            .vertices()
            .filter(|v| v.fix().index() >= first)
            .filter(|v| !v.out_edges().any(|e| e.is_constraint_edge()))
            .filter(|v| !in_domain(v.position().into()))
            .map(|v| v.fix())
            .collect();
        doomed.sort_unstable_by_key(|v| std::cmp::Reverse(v.index()));
        for &v in &doomed {
            spade::Triangulation::remove(&mut self.cdt, v);
        }
        if !doomed.is_empty() {
            self.in_domain.clear();
        }
        doomed.len()
    }

    /// Vertex budget for a refinement: proportional to the current vertex
    /// count, plus the number of `max_area` triangles that fit the bounding
    /// box when a size bound is set.
    fn vertex_budget(&self, max_area: Option<f64>) -> usize {
        let base = self.num_vertices().saturating_mul(VERTEX_BUDGET_FACTOR);
        let Some(area) = max_area else {
            return base;
        };
        let Some((lo, hi)) = self.bounding_box() else {
            return base;
        };
        let cells = ((hi.x - lo.x) * (hi.y - lo.y) / area * AREA_BUDGET_FACTOR).ceil();
        // float to int casts saturate
        base.saturating_add(cells as usize)
    }

    fn bounding_box(&self) -> Option<(Point, Point)> {
        self.vertices().map(|v| self.position(v)).fold(None, |acc, p| {
            Some(match acc {
                None => (p, p),
                Some((lo, hi)) => (
                    Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                    Point::new(hi.x.max(p.x), hi.y.max(p.y)),
                ),
            })
        })
    }

    /// Runs spade's refinement and reports how many vertices it added.
    fn run_refinement(&mut self, params: RefinementParameters<f64>) -> TransformOutcome {
        if self.cdt.num_inner_faces() == 0 {
            return TransformOutcome::Applied { vertices_added: 0 };
        }
        let before = self.cdt.num_vertices();
        let result = self.cdt.refine(params);
        let vertices_added = self.cdt.num_vertices() - before;
        if vertices_added > 0 {
            self.in_domain.clear();
        }
        if result.refinement_complete {
            TransformOutcome::Applied { vertices_added }
        } else {
            TransformOutcome::Partial { vertices_added }
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.cdt.num_vertices()
    }

    pub fn num_edges(&self) -> usize {
        self.cdt.num_undirected_edges()
    }

    pub fn num_faces(&self) -> usize {
        self.cdt.num_inner_faces()
    }

    pub fn position(&self, v: FixedVertexHandle) -> Point {
        self.cdt.vertex(v).position().into()
    }

    pub fn vertex_id(&self, v: FixedVertexHandle) -> VertexId {
        self.cdt.vertex(v).data().id
    }

    pub fn set_vertex_id(&mut self, v: FixedVertexHandle, id: VertexId) {
        self.cdt.vertex_data_mut(v).id = id;
    }

    /// All vertices, in the kernel's storage order.
    pub fn vertices(&self) -> impl Iterator<Item = FixedVertexHandle> + '_ {
        self.cdt.vertices().map(|v| v.fix())
    }

    /// All finite edges, once each.
    pub fn edges(&self) -> impl Iterator<Item = KernelEdge> + '_ {
        self.cdt.undirected_edges().map(|edge| {
            let [from, to] = edge.vertices();
            let directed = edge.as_directed();
            KernelEdge {
                from: from.fix(),
                to: to.fix(),
                faces: [
                    directed.face().as_inner().map(|f| f.fix()),
                    directed.rev().face().as_inner().map(|f| f.fix()),
                ],
            }
        })
    }

    /// All finite triangles.
    pub fn faces(&self) -> impl Iterator<Item = KernelFace> + '_ {
        self.cdt.inner_faces().map(|face| {
            let [a, b, c] = face.vertices();
            KernelFace {
                handle: face.fix(),
                vertices: [a.fix(), b.fix(), c.fix()],
            }
        })
    }

    /// True when `a`-`b` is a constraint edge of the triangulation.
    pub fn is_constraint_edge(&self, a: FixedVertexHandle, b: FixedVertexHandle) -> bool {
        self.cdt
            .get_edge_from_neighbors(a, b)
            .is_some_and(|edge| self.cdt.is_constraint_edge(edge.as_undirected().fix()))
    }

    /// Replaces the domain flags; faces missing from `flags` are out of domain.
    pub fn set_domain<I>(&mut self, flags: I)
    where
        I: IntoIterator<Item = (FixedFaceHandle<InnerTag>, bool)>,
    {
        let mut in_domain = vec![false; self.cdt.num_all_faces()];
        for (face, inside) in flags {
            in_domain[face.index()] = inside;
        }
        self.in_domain = in_domain;
    }

    /// True once domain flags have been set and no structural change happened since.
    pub fn has_domain(&self) -> bool {
        !self.in_domain.is_empty()
    }

    /// Domain flag of `face`; `false` when flags are missing or stale.
    pub fn is_in_domain(&self, face: FixedFaceHandle<InnerTag>) -> bool {
        self.in_domain.get(face.index()).copied().unwrap_or(false)
    }
}

/// Refinement parameters for one round of quality meshing.
fn quality_parameters(criteria: &MeshCriteria, budget: usize) -> RefinementParameters<f64> {
    let params = RefinementParameters::<f64>::new()
        .with_angle_limit(AngleLimit::from_deg(criteria.min_angle_deg()))
        .with_max_additional_vertices(budget)
        .exclude_outer_faces(false);
    match criteria.max_area() {
        Some(area) => params.with_max_allowed_area(area),
        None => params,
    }
}
