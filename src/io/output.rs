//! Line-oriented graph writer.
//!
//! ```text
//! <vertex count>
//! <edge count>
//! id;x;y                                   (one per vertex)
//! id_a;id_b;squared_distance;free_for;1;type;   (one per edge)
//! ```
//! Floating-point fields use fixed notation with 7 decimals.

use std::io::{self, Write};

use crate::topology::edge_type::EdgeType;
use crate::topology::vertex_id::VertexId;

/// Marker written in the bidirectional column; every edge is two-way.
const BIDIRECTIONAL: &str = "1";

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutputVertex {
    pub id: VertexId,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OutputEdge {
    pub from: VertexId,
    pub to: VertexId,
    pub squared_distance: f64,
    pub edge_type: EdgeType,
}

/// The labeled planar graph produced by the pipeline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OutputGraph {
    pub vertices: Vec<OutputVertex>,
    pub edges: Vec<OutputEdge>,
}

impl OutputGraph {
    /// Number of edges of each type, in `boundary, hole, road, mesh` order.
    pub fn type_counts(&self) -> [usize; 4] {
        let mut counts = [0; 4];
        for edge in &self.edges {
            let slot = match edge.edge_type {
                EdgeType::Boundary => 0,
                EdgeType::Hole => 1,
                EdgeType::Road => 2,
                EdgeType::Mesh => 3,
            };
            counts[slot] += 1;
        }
        counts
    }
}

/// Writes `graph`, putting `free_for` in every edge's free-for column.
pub fn write_graph<W: Write>(out: &mut W, graph: &OutputGraph, free_for: &str) -> io::Result<()> {
    writeln!(out, "{}", graph.vertices.len())?;
    writeln!(out, "{}", graph.edges.len())?;
    for v in &graph.vertices {
        writeln!(out, "{};{:.7};{:.7}", v.id, v.x, v.y)?;
    }
    for e in &graph.edges {
        writeln!(
            out,
            "{};{};{:.7};{};{};{};",
            e.from, e.to, e.squared_distance, free_for, BIDIRECTIONAL, e.edge_type
        )?;
    }
    Ok(())
}
