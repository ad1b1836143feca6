//! Geometric kernel: constrained Delaunay triangulation and its transforms.
//!
//! The triangulation itself is delegated to `spade`; this module fixes the
//! small surface the rest of the crate relies on (insertion with identity
//! reuse, constraint insertion, the three structural transforms, and
//! enumeration of vertices, edges and faces with a per-face domain flag).
//!
//! Every structural transform reports a [`TransformOutcome`] or a
//! [`KernelFault`]. A fault means the transform was rejected and the
//! triangulation is unchanged; [`TransformOutcome::Partial`] means it was
//! applied but did not run to completion.

pub mod triangulation;

pub use triangulation::{KernelEdge, KernelFace, KernelVertex, Triangulation};

use thiserror::Error;

/// Default shape bound `B` (≈ 20.7° minimum angle).
pub const DEFAULT_SHAPE_BOUND: f64 = 0.125;

/// Faults reported by the kernel.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum KernelFault {
    /// The point cannot be represented by the triangulation (NaN, too large or too small).
    #[error("cannot insert point ({x}, {y}): {reason}")]
    InvalidPoint { x: f64, y: f64, reason: String },
    /// The constraint would cross an existing constraint edge.
    #[error("constraint ({0:?}) - ({1:?}) intersects an existing constraint")]
    IntersectingConstraint(crate::geometry::Point, crate::geometry::Point),
    /// Mesh criteria outside their valid range.
    #[error("invalid mesh criteria: {0}")]
    InvalidCriteria(String),
}

/// Result of a structural transform that was not rejected.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TransformOutcome {
    /// The transform ran to completion.
    Applied { vertices_added: usize },
    /// The transform stopped early (vertex budget exhausted); the
    /// triangulation is valid but may not satisfy the requested criteria.
    Partial { vertices_added: usize },
}

impl TransformOutcome {
    /// Number of vertices the transform inserted.
    pub fn vertices_added(&self) -> usize {
        match *self {
            TransformOutcome::Applied { vertices_added }
            | TransformOutcome::Partial { vertices_added } => vertices_added,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, TransformOutcome::Applied { .. })
    }
}

/// Delaunay mesh criteria.
///
/// `shape_bound` is `B = sin²(min_angle)`; `size_bound` is the maximum edge
/// length, with `0` meaning no size criterion. `vertex_budget` caps the
/// number of vertices refinement may add; when unset the kernel derives a
/// budget from the input size and the size bound.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeshCriteria {
    pub shape_bound: f64,
    pub size_bound: f64,
    #[serde(default)]
    pub vertex_budget: Option<usize>,
}

impl Default for MeshCriteria {
    fn default() -> Self {
        MeshCriteria {
            shape_bound: DEFAULT_SHAPE_BOUND,
            size_bound: 0.0,
            vertex_budget: None,
        }
    }
}

impl MeshCriteria {
    pub fn new(shape_bound: f64, size_bound: f64) -> Self {
        MeshCriteria {
            shape_bound,
            size_bound,
            vertex_budget: None,
        }
    }

    /// Caps refinement at `budget` added vertices.
    pub fn with_vertex_budget(mut self, budget: usize) -> Self {
        self.vertex_budget = Some(budget);
        self
    }

    /// Rejects negative or non-finite bounds.
    pub fn validate(&self) -> Result<(), KernelFault> {
        if !self.shape_bound.is_finite() || self.shape_bound < 0.0 {
            return Err(KernelFault::InvalidCriteria(format!(
                "shape bound B must be a non-negative number, got {}",
                self.shape_bound
            )));
        }
        if !self.size_bound.is_finite() || self.size_bound < 0.0 {
            return Err(KernelFault::InvalidCriteria(format!(
                "size bound S must be a non-negative number, got {}",
                self.size_bound
            )));
        }
        Ok(())
    }

    /// Minimum angle in degrees implied by the shape bound.
    pub fn min_angle_deg(&self) -> f64 {
        self.shape_bound.min(1.0).sqrt().asin().to_degrees()
    }

    /// Maximum triangle area implied by the size bound: the area of an
    /// equilateral triangle with side `size_bound`. `None` when disabled.
    pub fn max_area(&self) -> Option<f64> {
        (self.size_bound > 0.0).then(|| 3f64.sqrt() / 4.0 * self.size_bound * self.size_bound)
    }
}
