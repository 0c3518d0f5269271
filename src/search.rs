//! Alternating-tree state (C3) and the match extender (C5): a single
//! outer search rooted at one exposed vertex, per §4.3 and §4.5.

use log::trace;

use crate::blossom::ContractionHistory;
use crate::error::Error;
use crate::graph::Graph;
use crate::matching::Matching;
use crate::pseudoforest::PseudoForest;
use crate::types::VertexId;

/// One frontier edge `(u, w)` with `u` already outer.
type FrontierEdge = (VertexId, VertexId);

/// LIFO edge frontier with a distinguished "good edge" fast path
/// (§3 "edges_to_consider", §9 "the good-edge iterator"): an edge
/// leading to an exposed neighbor is popped before anything else,
/// regardless of when it was pushed.
#[derive(Default)]
struct Frontier {
    stack: Vec<FrontierEdge>,
    good_edge: Option<usize>,
}

impl Frontier {
    fn push(&mut self, edge: FrontierEdge) {
        self.stack.push(edge);
    }

    fn push_good(&mut self, edge: FrontierEdge) {
        self.stack.push(edge);
        self.good_edge = Some(self.stack.len() - 1);
    }

    fn pop(&mut self) -> Option<FrontierEdge> {
        if self.stack.is_empty() {
            return None;
        }
        let idx = self.good_edge.take().unwrap_or(self.stack.len() - 1);
        Some(self.stack.remove(idx))
    }
}

/// The result of one match-extender search from a single root (§4.7).
pub enum Outcome {
    /// An augmenting path was found ending at this exposed vertex.
    Extended(VertexId),
    /// No augmenting path exists from the root; `covered` lists every
    /// vertex visited by the search, to be permanently removed.
    Frustrated { covered: Vec<VertexId> },
}

pub struct Search<'g> {
    pub(crate) graph: &'g Graph,
    pub(crate) matching: &'g Matching,
    pub(crate) removed: &'g [bool],
    pub(crate) forest: PseudoForest,
    pub(crate) node_dist: Vec<Option<usize>>,
    pub(crate) predecessor: Vec<Option<VertexId>>,
    pub(crate) covered: Vec<bool>,
    pub(crate) history: ContractionHistory,
    frontier: Frontier,
}

impl<'g> Search<'g> {
    pub fn new(graph: &'g Graph, matching: &'g Matching, removed: &'g [bool]) -> Self {
        let n = graph.num_nodes();
        Self {
            graph,
            matching,
            removed,
            forest: PseudoForest::new(n),
            node_dist: vec![None; n],
            predecessor: vec![None; n],
            covered: vec![false; n],
            history: ContractionHistory::default(),
            frontier: Frontier::default(),
        }
    }

    pub(crate) fn root_of(&mut self, v: VertexId) -> VertexId {
        self.forest.root_of(v)
    }

    pub(crate) fn dist_of(&mut self, v: VertexId) -> usize {
        let r = self.root_of(v);
        self.node_dist[r].expect("dist_of called on vertex outside the tree")
    }

    pub(crate) fn pred_of(&mut self, v: VertexId) -> Option<VertexId> {
        let r = self.root_of(v);
        self.predecessor[r]
    }

    /// Runs the search rooted at `root`, per the top-level dispatch of
    /// §4.3: pull frontier edges, classify, and either augment, extend,
    /// or contract, until the frontier is exhausted or a path is found.
    pub fn run(&mut self, root: VertexId) -> Result<Outcome, Error> {
        self.node_dist[root] = Some(0);
        self.predecessor[root] = Some(root);
        self.covered[root] = true;
        self.add_adjacent_edges(root);

        while let Some((u, w)) = self.frontier.pop() {
            if self.removed[w] {
                continue;
            }
            if self.root_of(w) == self.root_of(u) {
                continue;
            }

            if !self.covered[w] {
                if self.matching.is_exposed(w) {
                    self.node_dist[w] = Some(self.dist_of(u) + 1);
                    self.predecessor[w] = Some(u);
                    self.covered[w] = true;
                    trace!("search from root reached augmenting endpoint {w}");
                    return Ok(Outcome::Extended(w));
                }
                // w unvisited and matched: extend by two edges.
                self.node_dist[w] = Some(self.dist_of(u) + 1);
                self.predecessor[w] = Some(u);
                self.covered[w] = true;
                let mate = self
                    .matching
                    .mate(w)
                    .ok_or_else(|| Error::Internal(format!("vertex {w} expected to be matched")))?;
                self.node_dist[mate] = Some(self.dist_of(w) + 1);
                self.predecessor[mate] = Some(w);
                self.covered[mate] = true;
                self.add_adjacent_edges(mate);
            } else if self.dist_of(w) % 2 == 0 {
                // w covered, outer, different pseudonode: blossom.
                self.contract_blossom(u, w)?;
            }
            // w covered and inner, or same pseudonode: discard.
        }

        let covered = (0..self.graph.num_nodes())
            .filter(|&v| self.covered[v])
            .collect();
        #[cfg(debug_assertions)]
        self.assert_gallai_edmonds_postcondition();
        trace!("search from root exhausted frontier without an augmenting path");
        Ok(Outcome::Frustrated { covered })
    }

    /// Open question — frustration detection (§9): checks that every
    /// covered outer vertex's neighbors are either inner or inside its
    /// own pseudonode, i.e. that the frontier was genuinely exhausted
    /// rather than abandoned early by a bug in the extender.
    #[cfg(debug_assertions)]
    fn assert_gallai_edmonds_postcondition(&mut self) {
        for u in 0..self.graph.num_nodes() {
            if !self.covered[u] || self.dist_of(u) % 2 != 0 {
                continue;
            }
            let neighbors: Vec<VertexId> = self.graph.neighbors(u).to_vec();
            for w in neighbors {
                if self.removed[w] || self.root_of(w) == self.root_of(u) {
                    continue;
                }
                let ok = self.covered[w] && self.dist_of(w) % 2 == 1;
                debug_assert!(
                    ok,
                    "frustration post-condition violated: outer vertex {u} has an unabsorbed neighbor {w}"
                );
            }
        }
    }

    /// Scans `u`'s neighbors in three passes to seed the frontier with
    /// deterministic priority (§4.5).
    pub(crate) fn add_adjacent_edges(&mut self, u: VertexId) {
        let neighbors: Vec<VertexId> = self.graph.neighbors(u).to_vec();

        // Pass 1: covered, outer, different pseudonode (blossom candidates).
        for &w in &neighbors {
            if self.removed[w] || self.root_of(w) == self.root_of(u) {
                continue;
            }
            if self.covered[w] && self.dist_of(w) % 2 == 0 {
                self.frontier.push((u, w));
            }
        }
        // Pass 2: uncovered, matched.
        for &w in &neighbors {
            if self.removed[w] || self.root_of(w) == self.root_of(u) {
                continue;
            }
            if !self.covered[w] && self.matching.mate(w).is_some() {
                self.frontier.push((u, w));
            }
        }
        // Pass 3: uncovered, exposed (good edge).
        for &w in &neighbors {
            if self.removed[w] || self.root_of(w) == self.root_of(u) {
                continue;
            }
            if !self.covered[w] && self.matching.is_exposed(w) {
                self.frontier.push_good((u, w));
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn frontier_is_lifo_without_good_edges() {
        let mut frontier = Frontier::default();
        frontier.push((0, 1));
        frontier.push((0, 2));
        frontier.push((0, 3));
        assert_eq!(frontier.pop(), Some((0, 3)));
        assert_eq!(frontier.pop(), Some((0, 2)));
        assert_eq!(frontier.pop(), Some((0, 1)));
        assert_eq!(frontier.pop(), None);
    }

    #[test]
    fn good_edge_is_popped_before_anything_pushed_after_it() {
        let mut frontier = Frontier::default();
        frontier.push((0, 1));
        frontier.push_good((0, 2));
        frontier.push((0, 3));
        frontier.push((0, 4));
        assert_eq!(frontier.pop(), Some((0, 2)));
        // once consumed, the frontier reverts to plain LIFO order.
        assert_eq!(frontier.pop(), Some((0, 4)));
        assert_eq!(frontier.pop(), Some((0, 3)));
        assert_eq!(frontier.pop(), Some((0, 1)));
    }

    #[test]
    fn a_later_good_edge_overwrites_an_earlier_one() {
        let mut frontier = Frontier::default();
        frontier.push_good((0, 1));
        frontier.push((0, 2));
        frontier.push_good((0, 3));
        assert_eq!(frontier.pop(), Some((0, 3)));
        assert_eq!(frontier.pop(), Some((0, 2)));
        assert_eq!(frontier.pop(), Some((0, 1)));
    }

    #[test]
    fn search_on_single_edge_extends_immediately() {
        let mut graph = Graph::new(2);
        graph.add_edge(0, 1);
        let matching = Matching::new(2);
        let removed = vec![false, false];
        let mut search = Search::new(&graph, &matching, &removed);
        match search.run(0).unwrap() {
            Outcome::Extended(endpoint) => assert_eq!(endpoint, 1),
            Outcome::Frustrated { .. } => panic!("expected an augmenting path"),
        }
    }

    #[test]
    fn search_on_isolated_vertex_is_frustrated() {
        let graph = Graph::new(2);
        let matching = Matching::new(2);
        let removed = vec![false, false];
        let mut search = Search::new(&graph, &matching, &removed);
        match search.run(0).unwrap() {
            Outcome::Frustrated { covered } => assert_eq!(covered, vec![0]),
            Outcome::Extended(_) => panic!("expected frustration"),
        }
    }
}
