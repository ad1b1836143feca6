//! Input model, WKT-like reader and graph writer.
//!
//! Reading produces a [`GeometryInput`]: the rings of a single polygon
//! (ring 0 is the outer boundary, the rest are holes) and an optional list
//! of open line-strings. Rings are taken as given and are not closed
//! implicitly.

pub mod output;
pub mod wkt;

pub use output::{OutputEdge, OutputGraph, OutputVertex, write_graph};
pub use wkt::parse_wkt;

use crate::geometry::Point;

/// Parsed input geometry.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct GeometryInput {
    /// Polygon rings; ring 0 is the outer boundary.
    pub polygon: Vec<Vec<Point>>,
    /// Open road line-strings.
    pub linestrings: Vec<Vec<Point>>,
}
