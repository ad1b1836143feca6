//! Semantic edge categories.

use std::fmt;

/// Origin of an output edge.
#[derive(
    Clone, Copy, Debug, Default, Eq, Hash, PartialEq, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum EdgeType {
    /// Segment of the outer ring.
    Boundary,
    /// Segment of a hole ring.
    Hole,
    /// Segment of an open line-string.
    Road,
    /// No known origin: introduced by triangulation or refinement.
    #[default]
    Mesh,
}

impl EdgeType {
    /// Type for the ring at `index` of a polygon: ring 0 is the outer boundary.
    pub fn for_ring(index: usize) -> Self {
        if index == 0 {
            EdgeType::Boundary
        } else {
            EdgeType::Hole
        }
    }

    /// Name used in the output format.
    pub fn name(self) -> &'static str {
        match self {
            EdgeType::Boundary => "boundary",
            EdgeType::Hole => "hole",
            EdgeType::Road => "road",
            EdgeType::Mesh => "mesh",
        }
    }

    /// Inverse of [`EdgeType::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "boundary" => Some(EdgeType::Boundary),
            "hole" => Some(EdgeType::Hole),
            "road" => Some(EdgeType::Road),
            "mesh" => Some(EdgeType::Mesh),
            _ => None,
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_types() {
        assert_eq!(EdgeType::for_ring(0), EdgeType::Boundary);
        assert_eq!(EdgeType::for_ring(1), EdgeType::Hole);
        assert_eq!(EdgeType::for_ring(5), EdgeType::Hole);
    }

    #[test]
    fn names_round_trip() {
        for ty in [EdgeType::Boundary, EdgeType::Hole, EdgeType::Road, EdgeType::Mesh] {
            assert_eq!(EdgeType::from_name(ty.name()), Some(ty));
        }
        assert_eq!(EdgeType::from_name("unknown"), None);
    }

    #[test]
    fn serde_uses_output_names() {
        assert_eq!(serde_json::to_string(&EdgeType::Road).unwrap(), "\"road\"");
    }

    #[test]
    fn unknown_origin_defaults_to_mesh() {
        assert_eq!(EdgeType::default(), EdgeType::Mesh);
    }
}
