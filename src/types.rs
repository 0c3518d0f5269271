//! Shared index types.
//!
//! Vertex ids are dense non-negative integers in `[0, n)`, matching the
//! graph's natural adjacency-list indexing.

/// Identifier of a vertex, dense in `[0, num_nodes)`.
pub type VertexId = usize;

/// Index into the contraction history (§3 "Contraction history").
pub type CycleIndex = usize;
