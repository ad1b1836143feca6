//! Identity finalization and graph emission.

use spade::handles::FixedVertexHandle;

use crate::geometry::predicates::squared_distance;
use crate::io::{OutputEdge, OutputGraph, OutputVertex};
use crate::kernel::Triangulation;
use crate::pipeline::ingest::Chain;
use crate::topology::provenance::ProvenanceTable;
use crate::topology::vertex_id::VertexIdAllocator;

/// Gives every unidentified vertex the next free identity, in the kernel's
/// vertex order. That order is a property of the kernel and not part of
/// the output contract. Returns the number of vertices identified.
pub fn assign_missing_ids(tri: &mut Triangulation, ids: &mut VertexIdAllocator) -> usize {
    let missing: Vec<_> = tri
        .vertices()
        .filter(|&v| !tri.vertex_id(v).is_assigned())
        .collect();
    for &v in &missing {
        tri.set_vertex_id(v, ids.allocate());
    }
    missing.len()
}

/// True when the vertex identities, in output order, are exactly `0..N`.
pub fn ids_are_contiguous(tri: &Triangulation) -> bool {
    tri.vertices()
        .enumerate()
        .all(|(index, v)| tri.vertex_id(v).get() == index as i64)
}

fn output_vertices(tri: &Triangulation) -> Vec<OutputVertex> {
    if !ids_are_contiguous(tri) {
        log::error!("Watch out! Vertex ids are not consecutive from 0.");
    }
    tri.vertices()
        .map(|v| {
            let p = tri.position(v);
            OutputVertex {
                id: tri.vertex_id(v),
                x: p.x,
                y: p.y,
            }
        })
        .collect()
}

fn output_edge(
    tri: &Triangulation,
    table: &ProvenanceTable<FixedVertexHandle>,
    a: FixedVertexHandle,
    b: FixedVertexHandle,
) -> OutputEdge {
    OutputEdge {
        from: tri.vertex_id(a),
        to: tri.vertex_id(b),
        squared_distance: squared_distance(tri.position(a), tri.position(b)),
        edge_type: table.type_or_mesh(a, b),
    }
}

/// All vertices, and every edge with at least one incident face in the domain.
pub fn domain_graph(
    tri: &Triangulation,
    table: &ProvenanceTable<FixedVertexHandle>,
) -> OutputGraph {
    let edges = tri
        .edges()
        .filter(|edge| edge.faces.iter().flatten().any(|&f| tri.is_in_domain(f)))
        .map(|edge| output_edge(tri, table, edge.from, edge.to))
        .collect();
    OutputGraph {
        vertices: output_vertices(tri),
        edges,
    }
}

/// All vertices, and the input chains' own edges in input order.
pub fn chain_graph(
    tri: &Triangulation,
    chains: &[Chain],
    table: &ProvenanceTable<FixedVertexHandle>,
) -> OutputGraph {
    let edges = chains
        .iter()
        .flat_map(|chain| chain.edges())
        .map(|(a, b)| output_edge(tri, table, a, b))
        .collect();
    OutputGraph {
        vertices: output_vertices(tri),
        edges,
    }
}
