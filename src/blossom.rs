//! Contraction history (§3 "Contraction history") and blossom detection
//! (C4, §4.4): given a tree edge that closes an odd cycle between two
//! outer vertices in different pseudonodes, reconstructs the cycle and
//! contracts it.

use std::collections::HashMap;

use crate::error::Error;
use crate::search::Search;
use crate::types::{CycleIndex, VertexId};

#[derive(Default)]
pub struct ContractionHistory {
    cycles: Vec<Vec<(VertexId, VertexId)>>,
    first_cycle: HashMap<VertexId, CycleIndex>,
    larger_cycle: HashMap<CycleIndex, CycleIndex>,
}

impl ContractionHistory {
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    pub fn cycle(&self, idx: CycleIndex) -> &[(VertexId, VertexId)] {
        &self.cycles[idx]
    }

    pub fn first_cycle_of(&self, v: VertexId) -> Option<CycleIndex> {
        self.first_cycle.get(&v).copied()
    }

    pub fn larger_cycle_of(&self, idx: CycleIndex) -> Option<CycleIndex> {
        self.larger_cycle.get(&idx).copied()
    }
}

impl Search<'_> {
    /// Reconstructs the odd cycle closed by edge `(v1, v2)` (§4.4) and
    /// contracts it into a fresh pseudonode. `v1` and `v2` must both be
    /// outer vertices in different pseudonodes.
    pub(crate) fn contract_blossom(
        &mut self,
        v1: VertexId,
        v2: VertexId,
    ) -> Result<(), Error> {
        let (mut v1, mut v2) = (v1, v2);
        let (initial_v1, initial_v2) = (v1, v2);
        let mut part1: Vec<(VertexId, VertexId)> = Vec::new();
        let mut part2: Vec<(VertexId, VertexId)> = Vec::new();

        while self.root_of(v1) != self.root_of(v2) {
            let (d1, d2) = (self.dist_of(v1), self.dist_of(v2));
            if d1 > d2 {
                let r1 = self.root_of(v1);
                let p1 = self.pred_of(v1).ok_or_else(|| {
                    Error::Internal("outer vertex has no predecessor during contraction".into())
                })?;
                part1.push((r1, p1));
                v1 = p1;
            } else {
                let r2 = self.root_of(v2);
                let p2 = self.pred_of(v2).ok_or_else(|| {
                    Error::Internal("outer vertex has no predecessor during contraction".into())
                })?;
                part2.push((p2, r2));
                v2 = p2;
            }
        }
        let lca = self.root_of(v1);

        let mut cycle: Vec<(VertexId, VertexId)> = Vec::with_capacity(part1.len() + part2.len() + 1);
        cycle.extend(part2.into_iter().rev());
        cycle.push((initial_v2, initial_v1));
        cycle.extend(part1);

        if cycle.len() % 2 == 0 {
            return Err(Error::Internal(format!(
                "blossom cycle has even length {}",
                cycle.len()
            )));
        }

        let cycle_idx = self.history.len();
        self.history.cycles.push(cycle.clone());

        let mut p_repr: Option<VertexId> = None;
        for (x, _) in &cycle {
            let x = *x;
            if !self.forest.is_member(x) {
                self.history.first_cycle.entry(x).or_insert(cycle_idx);
                p_repr = Some(match p_repr {
                    None => {
                        self.forest.add_singleton(x, lca, cycle_idx);
                        x
                    }
                    Some(p) => self.forest.merge(p, x, lca, cycle_idx),
                });
            } else {
                let q_idx = self.forest.cycle_idx_of(x);
                self.history.larger_cycle.insert(q_idx, cycle_idx);
                p_repr = Some(match p_repr {
                    None => self.forest.merge(x, x, lca, cycle_idx),
                    Some(p) => self.forest.merge(p, x, lca, cycle_idx),
                });
            }
        }

        // Every cycle member that was odd-distance (inner) is now outer
        // through the pseudonode's root_vertex; scan adjacent edges for
        // each one newly promoted.
        for (x, _) in &cycle {
            let x = *x;
            if let Some(dist) = self.node_dist[x] {
                if dist % 2 == 1 {
                    self.add_adjacent_edges(x);
                }
            }
        }
        // The LCA itself was already outer and already scanned when it
        // first became covered; nothing further to do for it here.
        Ok(())
    }
}

#[cfg(test)]
impl ContractionHistory {
    pub(crate) fn test_push_cycle(&mut self, cycle: Vec<(VertexId, VertexId)>) -> CycleIndex {
        let idx = self.cycles.len();
        self.cycles.push(cycle);
        idx
    }

    pub(crate) fn test_set_first_cycle(&mut self, v: VertexId, idx: CycleIndex) {
        self.first_cycle.insert(v, idx);
    }

    pub(crate) fn test_set_larger_cycle(&mut self, idx: CycleIndex, larger: CycleIndex) {
        self.larger_cycle.insert(idx, larger);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::Graph;
    use crate::matching::Matching;

    #[test]
    fn history_accessors_round_trip_a_pushed_cycle() {
        let mut history = ContractionHistory::default();
        assert_eq!(history.len(), 0);
        let idx = history.test_push_cycle(vec![(0, 1), (1, 2), (2, 0)]);
        history.test_set_first_cycle(1, idx);
        history.test_set_larger_cycle(idx, idx + 1);

        assert_eq!(history.len(), 1);
        assert_eq!(history.cycle(idx), &[(0, 1), (1, 2), (2, 0)]);
        assert_eq!(history.first_cycle_of(1), Some(idx));
        assert_eq!(history.first_cycle_of(0), None);
        assert_eq!(history.larger_cycle_of(idx), Some(idx + 1));
    }

    #[test]
    fn contract_blossom_closes_an_odd_cycle_through_the_root() {
        let graph = Graph::new(3);
        let matching = Matching::new(3);
        let removed = vec![false; 3];
        let mut search = Search::new(&graph, &matching, &removed);

        // Root 0, with two outer children 1 and 2 both reached at
        // distance 2 directly from the root: edge (1, 2) closes a
        // length-3 cycle through the root.
        search.node_dist[0] = Some(0);
        search.predecessor[0] = Some(0);
        search.node_dist[1] = Some(2);
        search.predecessor[1] = Some(0);
        search.node_dist[2] = Some(2);
        search.predecessor[2] = Some(0);

        search.contract_blossom(1, 2).unwrap();

        assert_eq!(search.history.len(), 1);
        assert_eq!(search.history.cycle(0), &[(0, 2), (2, 1), (1, 0)]);
        let root = search.root_of(0);
        assert_eq!(search.root_of(1), root);
        assert_eq!(search.root_of(2), root);
        assert_eq!(root, 0);
    }
}
