//! Vertex/edge ingestion.
//!
//! Every input chain is pushed into the triangulation point by point. A
//! point lands on an existing vertex when one already sits at that exact
//! position, so shared corners keep a single identity. Consecutive distinct
//! vertices become constraint edges, and each constraint is recorded in the
//! provenance table under the chain's [`EdgeType`].

use itertools::Itertools;
use spade::handles::FixedVertexHandle;

use crate::geometry::Point;
use crate::io::GeometryInput;
use crate::kernel::Triangulation;
use crate::topology::edge_type::EdgeType;
use crate::topology::provenance::ProvenanceTable;
use crate::topology::vertex_id::VertexIdAllocator;

/// An ingested ring or line-string, as vertex handles in input order.
#[derive(Clone, Debug, PartialEq)]
pub struct Chain {
    pub edge_type: EdgeType,
    pub vertices: Vec<FixedVertexHandle>,
}

impl Chain {
    /// Consecutive vertex pairs, skipping zero-length pairs.
    pub fn edges(&self) -> impl Iterator<Item = (FixedVertexHandle, FixedVertexHandle)> + '_ {
        self.vertices
            .iter()
            .copied()
            .tuple_windows()
            .filter(|(a, b)| a != b)
    }

    pub fn is_ring(&self) -> bool {
        matches!(self.edge_type, EdgeType::Boundary | EdgeType::Hole)
    }
}

/// State shared by ingestion, label repair and finalization.
#[derive(Clone, Debug, Default)]
pub struct IngestionContext {
    ids: VertexIdAllocator,
    table: ProvenanceTable<FixedVertexHandle>,
    edges_inserted: usize,
    chains: Vec<Chain>,
}

impl IngestionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ingests all rings (ring 0 as boundary, the rest as holes) and then
    /// all line-strings as roads.
    pub fn ingest(tri: &mut Triangulation, input: &GeometryInput) -> Self {
        let mut ctx = IngestionContext::new();
        for (index, ring) in input.polygon.iter().enumerate() {
            ctx.insert_chain(tri, ring, EdgeType::for_ring(index));
        }
        for chain in &input.linestrings {
            ctx.insert_chain(tri, chain, EdgeType::Road);
        }
        log::info!("Number of input vertices: {}", tri.num_vertices());
        log::info!("Number of edges inserted: {}", ctx.edges_inserted);
        ctx
    }

    /// Inserts one chain and returns the number of constraint edges added.
    ///
    /// Points the kernel cannot represent are dropped from the chain and
    /// constraints it rejects are not recorded; both are logged.
    pub fn insert_chain(
        &mut self,
        tri: &mut Triangulation,
        points: &[Point],
        edge_type: EdgeType,
    ) -> usize {
        let mut vertices = Vec::with_capacity(points.len());
        for &point in points {
            match tri.insert(point) {
                Ok(v) => {
                    if !tri.vertex_id(v).is_assigned() {
                        tri.set_vertex_id(v, self.ids.allocate());
                    }
                    vertices.push(v);
                }
                Err(fault) => log::error!("{fault}"),
            }
        }

        let chain = Chain {
            edge_type,
            vertices,
        };
        let mut added = 0;
        for (a, b) in chain.edges() {
            if let Err(fault) = tri.insert_constraint(a, b) {
                log::error!("{fault}");
                continue;
            }
            log::info!(
                "Inserting edge {} - {} with type {}",
                tri.vertex_id(a),
                tri.vertex_id(b),
                edge_type
            );
            self.table.record(a, b, edge_type);
            added += 1;
        }
        self.edges_inserted += added;
        self.chains.push(chain);
        added
    }

    pub fn table(&self) -> &ProvenanceTable<FixedVertexHandle> {
        &self.table
    }

    pub(crate) fn table_mut(&mut self) -> &mut ProvenanceTable<FixedVertexHandle> {
        &mut self.table
    }

    pub(crate) fn ids_mut(&mut self) -> &mut VertexIdAllocator {
        &mut self.ids
    }

    /// Number of constraint edges inserted so far.
    pub fn edges_inserted(&self) -> usize {
        self.edges_inserted
    }

    /// Number of identities handed out so far.
    pub fn vertices_identified(&self) -> usize {
        self.ids.allocated()
    }

    /// All chains in ingestion order.
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    /// Ring chains only: the outer ring first, then holes.
    pub fn rings(&self) -> Vec<Vec<FixedVertexHandle>> {
        self.chains
            .iter()
            .filter(|c| c.is_ring())
            .map(|c| c.vertices.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::vertex_id::VertexId;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn shared_corner_keeps_one_identity() {
        let mut tri = Triangulation::new();
        let mut ctx = IngestionContext::new();
        ctx.insert_chain(&mut tri, &pts(&[(0.0, 0.0), (4.0, 0.0)]), EdgeType::Road);
        ctx.insert_chain(&mut tri, &pts(&[(4.0, 0.0), (4.0, 4.0)]), EdgeType::Road);
        assert_eq!(tri.num_vertices(), 3);
        assert_eq!(ctx.vertices_identified(), 3);
        let shared = ctx.chains()[0].vertices[1];
        assert_eq!(shared, ctx.chains()[1].vertices[0]);
        assert_eq!(tri.vertex_id(shared), VertexId::new(1));
    }

    #[test]
    fn zero_length_pair_is_skipped() {
        let mut tri = Triangulation::new();
        let mut ctx = IngestionContext::new();
        let added = ctx.insert_chain(
            &mut tri,
            &pts(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 1.0)]),
            EdgeType::Road,
        );
        assert_eq!(added, 2);
        assert_eq!(ctx.edges_inserted(), 2);
        assert_eq!(ctx.table().len(), 2);
    }

    #[test]
    fn single_point_chain_has_no_edges() {
        let mut tri = Triangulation::new();
        let mut ctx = IngestionContext::new();
        assert_eq!(ctx.insert_chain(&mut tri, &pts(&[(2.0, 2.0)]), EdgeType::Road), 0);
        assert_eq!(tri.num_vertices(), 1);
        assert!(ctx.table().is_empty());
    }

    #[test]
    fn ring_types_follow_ring_order() {
        let input = GeometryInput {
            polygon: vec![
                pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 4.0), (0.0, 0.0)]),
                pts(&[(1.0, 1.0), (3.0, 1.0), (3.0, 3.0), (1.0, 3.0), (1.0, 1.0)]),
            ],
            linestrings: vec![pts(&[(0.0, 0.0), (1.0, 1.0)])],
        };
        let mut tri = Triangulation::new();
        let ctx = IngestionContext::ingest(&mut tri, &input);
        assert_eq!(ctx.edges_inserted(), 9);
        let types: Vec<_> = ctx.chains().iter().map(|c| c.edge_type).collect();
        assert_eq!(types, vec![EdgeType::Boundary, EdgeType::Hole, EdgeType::Road]);
        assert_eq!(ctx.rings().len(), 2);

        let outer = &ctx.chains()[0].vertices;
        assert_eq!(ctx.table().edge_type(outer[1], outer[0]), Some(EdgeType::Boundary));
        let road = &ctx.chains()[2].vertices;
        assert_eq!(ctx.table().edge_type(road[0], road[1]), Some(EdgeType::Road));
    }

    #[test]
    fn crossing_road_is_not_recorded() {
        let mut tri = Triangulation::new();
        let mut ctx = IngestionContext::new();
        ctx.insert_chain(&mut tri, &pts(&[(0.0, 0.0), (2.0, 2.0)]), EdgeType::Road);
        let added = ctx.insert_chain(&mut tri, &pts(&[(0.0, 2.0), (2.0, 0.0)]), EdgeType::Road);
        assert_eq!(added, 0);
        assert_eq!(ctx.table().len(), 1);
        assert_eq!(ctx.edges_inserted(), 1);
    }
}
