//! The matching itself (§3 "Matching"): a graph on the same vertex set
//! with every vertex of degree at most one. Represented densely as a
//! mate array rather than a second adjacency list, since degree-one is
//! an invariant we want the type to make easy to maintain, not merely
//! document.

use more_asserts::debug_assert_lt;

use crate::types::VertexId;

#[derive(Debug, Clone)]
pub struct Matching {
    mate: Vec<Option<VertexId>>,
}

impl Matching {
    pub fn new(num_nodes: usize) -> Self {
        Self {
            mate: vec![None; num_nodes],
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.mate.len()
    }

    pub fn mate(&self, v: VertexId) -> Option<VertexId> {
        self.mate[v]
    }

    pub fn is_exposed(&self, v: VertexId) -> bool {
        self.mate[v].is_none()
    }

    /// Adds edge `{u, v}` to the matching. Panics (via `debug_assert`) if
    /// either endpoint is already matched: callers are expected to
    /// maintain the degree-one invariant themselves.
    pub fn add_edge(&mut self, u: VertexId, v: VertexId) {
        debug_assert_lt!(u, self.mate.len(), "vertex {u} out of range");
        debug_assert_lt!(v, self.mate.len(), "vertex {v} out of range");
        debug_assert!(self.mate[u].is_none(), "vertex {u} already matched");
        debug_assert!(self.mate[v].is_none(), "vertex {v} already matched");
        self.mate[u] = Some(v);
        self.mate[v] = Some(u);
    }

    pub fn size(&self) -> usize {
        self.mate.iter().filter(|m| m.is_some()).count() / 2
    }

    /// Matched edges `(u, v)` with `u < v`, in ascending order of `u`.
    pub fn edges(&self) -> impl Iterator<Item = (VertexId, VertexId)> + '_ {
        self.mate
            .iter()
            .enumerate()
            .filter_map(|(u, mate)| mate.filter(|&v| v > u).map(|v| (u, v)))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn tracks_size_and_exposure() {
        let mut m = Matching::new(4);
        assert_eq!(m.size(), 0);
        m.add_edge(0, 1);
        assert_eq!(m.size(), 1);
        assert!(!m.is_exposed(0));
        assert!(m.is_exposed(2));
        assert_eq!(m.edges().collect::<Vec<_>>(), vec![(0, 1)]);
    }
}
