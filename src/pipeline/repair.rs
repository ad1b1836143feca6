//! Label repair after structural transforms.
//!
//! Conforming transforms and mesh refinement split input edges by inserting
//! new vertices on them. Those vertices carry [`VertexId::UNASSIGNED`], so
//! the sub-edges touching them are absent from the provenance table. Each
//! such edge is matched geometrically against every recorded edge: when the
//! two segments overlap along a segment (not just a point), the sub-edge
//! inherits the recorded type.
//!
//! The scan is `O(candidate edges × table size)`. Candidates are limited to
//! edges incident to new vertices, which keeps it cheap in practice; large
//! inputs would want a bounding-box index over the table.
//!
//! [`VertexId::UNASSIGNED`]: crate::topology::vertex_id::VertexId::UNASSIGNED

use std::hash::Hash;

use spade::handles::FixedVertexHandle;

use crate::geometry::Point;
use crate::geometry::predicates::segment_intersection;
use crate::kernel::Triangulation;
use crate::topology::edge_type::EdgeType;
use crate::topology::provenance::ProvenanceTable;

/// Returns the type of the first recorded edge (in table order) that
/// overlaps the segment `needle` along a segment of positive length.
pub fn find_overlapping_type<H, F>(
    needle: (Point, Point),
    table: &ProvenanceTable<H>,
    position: F,
) -> Option<EdgeType>
where
    H: Copy + Ord + Hash,
    F: Fn(H) -> Point,
{
    table.iter().find_map(|(key, edge_type)| {
        let (a, b) = key.endpoints();
        segment_intersection(needle.0, needle.1, position(a), position(b))
            .is_segment()
            .then_some(edge_type)
    })
}

/// Recovers types for edges incident to unidentified vertices.
///
/// Returns the delta table; edges with no overlapping recorded edge are
/// left out and will resolve to [`EdgeType::Mesh`].
pub fn recover_labels(
    tri: &Triangulation,
    table: &ProvenanceTable<FixedVertexHandle>,
) -> ProvenanceTable<FixedVertexHandle> {
    let mut delta = ProvenanceTable::new();
    for edge in tri.edges() {
        if tri.vertex_id(edge.from).is_assigned() && tri.vertex_id(edge.to).is_assigned() {
            continue;
        }
        let needle = (tri.position(edge.from), tri.position(edge.to));
        if let Some(edge_type) = find_overlapping_type(needle, table, |v| tri.position(v)) {
            delta.record(edge.from, edge.to, edge_type);
        }
    }
    delta
}

/// Runs [`recover_labels`] and merges the result into `table` without
/// overwriting existing entries. Returns the number of entries added.
pub fn repair_labels(tri: &Triangulation, table: &mut ProvenanceTable<FixedVertexHandle>) -> usize {
    log::info!("Repairing labels");
    let delta = recover_labels(tri, table);
    let added = table.merge(delta);
    log::info!("Done repairing edges: {added} recovered");
    added
}
