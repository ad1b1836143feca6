//! Edge provenance storage.
//!
//! The table maps an *unordered* pair of vertex handles to the
//! [`EdgeType`] of the input chain the edge came from. Keys are stored
//! canonicalized (smaller handle first), so `(a, b)` and `(b, a)` resolve
//! with a single lookup.
//!
//! Entries are never removed and never overwritten: the first type
//! recorded for a pair wins. Iteration follows insertion order, which makes
//! the brute-force repair scan deterministic.

use hashbrown::HashMap;
use std::hash::Hash;

use crate::topology::edge_type::EdgeType;

/// Order-insensitive key for an edge between two vertex handles.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, PartialOrd, Ord)]
pub struct EdgeKey<H> {
    lo: H,
    hi: H,
}

impl<H: Copy + Ord> EdgeKey<H> {
    /// Canonicalizes the pair so that `new(a, b) == new(b, a)`.
    pub fn new(a: H, b: H) -> Self {
        if a <= b {
            EdgeKey { lo: a, hi: b }
        } else {
            EdgeKey { lo: b, hi: a }
        }
    }

    /// Both endpoints, smaller first.
    pub fn endpoints(&self) -> (H, H) {
        (self.lo, self.hi)
    }

    /// True when both endpoints are the same handle (zero-length edge).
    pub fn is_degenerate(&self) -> bool {
        self.lo == self.hi
    }
}

/// Mapping from unordered vertex pair to semantic edge type.
#[derive(Clone, Debug)]
pub struct ProvenanceTable<H> {
    types: HashMap<EdgeKey<H>, EdgeType>,
    order: Vec<EdgeKey<H>>,
}

impl<H> Default for ProvenanceTable<H> {
    fn default() -> Self {
        Self {
            types: HashMap::new(),
            order: Vec::new(),
        }
    }
}

impl<H> ProvenanceTable<H>
where
    H: Copy + Ord + Hash,
{
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `(a, b) -> ty` unless the pair is already known.
    ///
    /// Returns `true` when a new entry was added.
    pub fn record(&mut self, a: H, b: H, ty: EdgeType) -> bool {
        let key = EdgeKey::new(a, b);
        if self.types.contains_key(&key) {
            return false;
        }
        self.types.insert(key, ty);
        self.order.push(key);
        true
    }

    /// Returns the recorded type of the edge `(a, b)` in either orientation.
    pub fn edge_type(&self, a: H, b: H) -> Option<EdgeType> {
        self.types.get(&EdgeKey::new(a, b)).copied()
    }

    /// Like [`ProvenanceTable::edge_type`], defaulting to [`EdgeType::Mesh`]
    /// for edges with no known origin.
    pub fn type_or_mesh(&self, a: H, b: H) -> EdgeType {
        self.edge_type(a, b).unwrap_or(EdgeType::Mesh)
    }

    /// True when the pair has an entry.
    pub fn contains(&self, a: H, b: H) -> bool {
        self.types.contains_key(&EdgeKey::new(a, b))
    }

    /// Merges `delta` into `self` without overwriting existing entries.
    ///
    /// Returns the number of entries that were actually added.
    pub fn merge(&mut self, delta: ProvenanceTable<H>) -> usize {
        delta
            .iter()
            .filter(|&(key, ty)| {
                let (a, b) = key.endpoints();
                self.record(a, b, ty)
            })
            .count()
    }

    /// Iterate over `(key, type)` in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (EdgeKey<H>, EdgeType)> + '_ {
        self.order.iter().map(move |key| (*key, self.types[key]))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when the table has no entries.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl<H> PartialEq for ProvenanceTable<H>
where
    H: Copy + Ord + Hash,
{
    fn eq(&self, other: &Self) -> bool {
        self.types == other.types
    }
}
