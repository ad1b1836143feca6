//! Vertex identities, edge categories and the provenance table.

pub mod edge_type;
pub mod provenance;
pub mod vertex_id;
