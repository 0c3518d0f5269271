//! Path augmentation and blossom unshrinking (C6, §4.6): turns a
//! completed search that found an augmenting path into the enlarged
//! matching.

use crate::error::Error;
use crate::matching::Matching;
use crate::search::Search;
use crate::types::{CycleIndex, VertexId};

/// Builds the enlarged matching N from the old matching M, given the
/// search that found an augmenting path from `root` to `endpoint`.
pub fn build_new_matching(
    search: &mut Search,
    old: &Matching,
    root: VertexId,
    endpoint: VertexId,
) -> Result<Matching, Error> {
    let mut new_matching = Matching::new(old.num_nodes());

    let mut c = endpoint;
    loop {
        if search.dist_of(c) % 2 != 1 {
            return Err(Error::Internal(format!(
                "augmenting-path vertex {c} expected odd distance"
            )));
        }
        let c_root = search.root_of(c);
        let p = search
            .pred_of(c)
            .ok_or_else(|| Error::Internal(format!("vertex {c} has no predecessor")))?;
        new_matching.add_edge(c_root, p);

        unshrink_chain(search, &mut new_matching, p, search.history.len())?;

        if search.root_of(p) == root {
            break;
        }
        c = search
            .pred_of(p)
            .ok_or_else(|| Error::Internal(format!("vertex {p} has no predecessor")))?;
    }

    // Open question — residual-matching copy on success (§9): only
    // copy an old edge when neither endpoint was touched by the path
    // flip, rather than relying on path coverage holding by construction.
    for (a, b) in old.edges() {
        if new_matching.is_exposed(a) && new_matching.is_exposed(b) {
            new_matching.add_edge(a, b);
        }
    }

    Ok(new_matching)
}

/// Walks the chain of blossoms enclosing `v`, from the smallest up to
/// (but not including) `bound`, expanding each one.
fn unshrink_chain(
    search: &mut Search,
    new_matching: &mut Matching,
    v: VertexId,
    bound: CycleIndex,
) -> Result<(), Error> {
    let Some(mut cur) = search.history.first_cycle_of(v) else {
        return Ok(());
    };
    while cur < bound {
        unshrink_cycle(search, new_matching, cur)?;
        match search.history.larger_cycle_of(cur) {
            Some(next) => cur = next,
            None => break,
        }
    }
    Ok(())
}

/// Expands a single contracted cycle: finds the pivot (the member
/// already matched outside the blossom) and adds every second edge
/// from there in both directions, matching every other member inside
/// the blossom.
fn unshrink_cycle(
    search: &mut Search,
    new_matching: &mut Matching,
    cycle_idx: CycleIndex,
) -> Result<(), Error> {
    let cycle = search.history.cycle(cycle_idx).to_vec();

    let mut pivot_idx = None;
    for (i, &(a, b)) in cycle.iter().enumerate() {
        if !new_matching.is_exposed(a) {
            pivot_idx = Some(i);
            break;
        }
        if !new_matching.is_exposed(b) {
            pivot_idx = Some((i + 1) % cycle.len());
            break;
        }
    }
    let pivot_idx = pivot_idx.ok_or_else(|| {
        Error::Internal(format!(
            "cycle {cycle_idx} has no member already matched outside the blossom"
        ))
    })?;

    for idx in (pivot_idx % 2..pivot_idx).step_by(2) {
        let (a, b) = cycle[idx];
        new_matching.add_edge(a, b);
        unshrink_chain(search, new_matching, a, cycle_idx)?;
        unshrink_chain(search, new_matching, b, cycle_idx)?;
    }
    for idx in (pivot_idx + 1..cycle.len()).step_by(2) {
        let (a, b) = cycle[idx];
        new_matching.add_edge(a, b);
        unshrink_chain(search, new_matching, a, cycle_idx)?;
        unshrink_chain(search, new_matching, b, cycle_idx)?;
    }

    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn unshrink_cycle_matches_every_other_member_from_the_pivot() {
        let graph = Graph::new(6);
        let matching = Matching::new(6);
        let removed = vec![false; 6];
        let mut search = Search::new(&graph, &matching, &removed);
        let cycle_idx = search
            .history
            .test_push_cycle(vec![(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);

        let mut new_matching = Matching::new(6);
        new_matching.add_edge(0, 5); // pivot: already matched outside the blossom

        unshrink_cycle(&mut search, &mut new_matching, cycle_idx).unwrap();

        assert_eq!(new_matching.mate(0), Some(5));
        assert_eq!(new_matching.mate(1), Some(2));
        assert_eq!(new_matching.mate(3), Some(4));
    }

    #[test]
    fn unshrink_cycle_errors_when_no_member_is_matched_outside() {
        let graph = Graph::new(3);
        let matching = Matching::new(3);
        let removed = vec![false; 3];
        let mut search = Search::new(&graph, &matching, &removed);
        let cycle_idx = search.history.test_push_cycle(vec![(0, 1), (1, 2), (2, 0)]);

        let mut new_matching = Matching::new(3);
        let result = unshrink_cycle(&mut search, &mut new_matching, cycle_idx);
        assert!(matches!(result, Err(Error::Internal(_))));
    }

    #[test]
    fn unshrink_chain_is_a_no_op_outside_any_blossom() {
        let graph = Graph::new(3);
        let matching = Matching::new(3);
        let removed = vec![false; 3];
        let mut search = Search::new(&graph, &matching, &removed);
        let mut new_matching = Matching::new(3);
        unshrink_chain(&mut search, &mut new_matching, 1, 0).unwrap();
        assert_eq!(new_matching.mate(1), None);
    }

    #[test]
    fn unshrink_chain_expands_a_nested_blossom_below_the_bound() {
        let graph = Graph::new(6);
        let matching = Matching::new(6);
        let removed = vec![false; 6];
        let mut search = Search::new(&graph, &matching, &removed);
        let inner_idx = search
            .history
            .test_push_cycle(vec![(1, 2), (2, 3), (3, 1)]);
        search.history.test_set_first_cycle(1, inner_idx);

        let mut new_matching = Matching::new(6);
        new_matching.add_edge(1, 5); // 1 already matched outside the nested blossom

        unshrink_chain(&mut search, &mut new_matching, 1, inner_idx + 1).unwrap();

        assert_eq!(new_matching.mate(2), Some(3));
    }
}
