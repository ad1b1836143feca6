//! `VertexId`: the stable output identity of a triangulation vertex
//!
//! Identities are handed out consecutively from 0 the first time a
//! geometrically distinct point is ingested. Vertices created later by the
//! kernel (conforming transforms, mesh refinement) start out holding
//! [`VertexId::UNASSIGNED`] until the finalization pass backfills them.

use std::fmt;

/// Output identity of a vertex; `-1` means "not yet assigned".
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct VertexId(i64);

impl VertexId {
    /// Sentinel for vertices that have not received an identity yet.
    pub const UNASSIGNED: VertexId = VertexId(-1);

    /// Creates an assigned identity from a dense index.
    #[inline]
    pub const fn new(index: usize) -> Self {
        VertexId(index as i64)
    }

    /// Returns the raw value, `-1` for the sentinel.
    #[inline]
    pub const fn get(self) -> i64 {
        self.0
    }

    /// True unless this is the sentinel.
    #[inline]
    pub const fn is_assigned(self) -> bool {
        self.0 >= 0
    }
}

impl Default for VertexId {
    fn default() -> Self {
        VertexId::UNASSIGNED
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VertexId").field(&self.0).finish()
    }
}

/// Prints only the raw integer, as it appears in the output format.
impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out consecutive identities starting at 0.
#[derive(Clone, Debug, Default)]
pub struct VertexIdAllocator {
    next: usize,
}

impl VertexIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next unused identity and advances the counter.
    pub fn allocate(&mut self) -> VertexId {
        let id = VertexId::new(self.next);
        self.next += 1;
        id
    }

    /// Number of identities handed out so far.
    pub fn allocated(&self) -> usize {
        self.next
    }
}
