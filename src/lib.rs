//! # tessa
//!
//! tessa turns a polygon with holes, plus optional road line-strings, into
//! a labeled planar graph for use as a road or terrain network. It builds a
//! constrained Delaunay triangulation honoring the input, optionally
//! refines it (conforming Delaunay, quality mesh, conforming Gabriel),
//! classifies faces as inside or outside the input domain, and keeps
//! every output edge traceable to its origin: `boundary`, `hole`, `road`,
//! or `mesh`.
//!
//! ## Pipeline
//! - [`pipeline::ingest`]: input chains become vertices with stable
//!   identities and constraint edges recorded in a provenance table.
//! - [`domain`]: face classification against the ring geometry, and seed
//!   points for holes.
//! - [`pipeline::repair`]: recovers the origin of input edges split by a
//!   transform.
//! - [`pipeline::finalize`]: identity backfill and graph emission.
//!
//! ## Usage
//! ```rust
//! use tessa::pipeline::{PipelineOptions, process};
//!
//! let mut out = Vec::new();
//! process("POLYGON((0 0,4 0,4 4,0 4,0 0))", &PipelineOptions::default(), &mut out)?;
//! let text = String::from_utf8(out).unwrap();
//! assert!(text.starts_with("4\n4\n"));
//! # Ok::<(), tessa::mesh_error::MeshError>(())
//! ```

pub mod domain;
pub mod geometry;
pub mod io;
pub mod kernel;
pub mod mesh_error;
pub mod pipeline;
pub mod topology;

/// A convenient prelude to import the most-used types:
pub mod prelude {
    pub use crate::domain::{Domain, classify_faces, hole_seeds, synthesize_seed};
    pub use crate::geometry::Point;
    pub use crate::geometry::predicates::{BoundedSide, SegmentIntersection};
    pub use crate::io::{GeometryInput, OutputGraph, parse_wkt, write_graph};
    pub use crate::kernel::{KernelFault, MeshCriteria, TransformOutcome, Triangulation};
    pub use crate::mesh_error::MeshError;
    pub use crate::pipeline::{
        IngestionContext, Operation, Pipeline, PipelineOptions, process, process_input,
    };
    pub use crate::topology::edge_type::EdgeType;
    pub use crate::topology::provenance::{EdgeKey, ProvenanceTable};
    pub use crate::topology::vertex_id::VertexId;
}
