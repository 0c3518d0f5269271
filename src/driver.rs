//! Driver loop (C7, §4.7): repeatedly runs the match extender from each
//! exposed, non-removed vertex until none remain.

use log::{debug, trace};

use crate::augment::build_new_matching;
use crate::error::Error;
use crate::graph::Graph;
use crate::matching::Matching;
use crate::search::{Outcome, Search};
use crate::types::VertexId;

/// Computes a maximum-cardinality matching of `graph`.
pub fn solve(graph: &Graph) -> Result<Matching, Error> {
    let n = graph.num_nodes();
    let mut matching = greedy_seed(graph);
    let mut removed = vec![false; n];
    let mut num_removed = 0usize;

    while num_removed < n {
        debug!(
            "matching size {}, {} vertices removed",
            matching.size(),
            num_removed
        );

        let Some(root) = next_root(graph, &matching, &removed) else {
            trace!("no exposed vertex remains");
            break;
        };

        let mut search = Search::new(graph, &matching, &removed);
        match search.run(root)? {
            Outcome::Frustrated { covered } => {
                trace!("root {root} frustrated, removing {} vertices", covered.len());
                for v in covered {
                    if !removed[v] {
                        removed[v] = true;
                        num_removed += 1;
                    }
                }
            }
            Outcome::Extended(endpoint) => {
                let new_matching = build_new_matching(&mut search, &matching, root, endpoint)?;
                if new_matching.size() <= matching.size() {
                    return Err(Error::Internal(
                        "augmentation failed to increase matching size".into(),
                    ));
                }
                trace!("root {root} extended matching to size {}", new_matching.size());
                matching = new_matching;
            }
        }
    }

    Ok(matching)
}

/// Scans vertices in id order, matching each unmatched one with its
/// first unmatched neighbor. Purely an optimization: correctness only
/// requires that the matching start valid, possibly empty.
fn greedy_seed(graph: &Graph) -> Matching {
    let mut matching = Matching::new(graph.num_nodes());
    for v in 0..graph.num_nodes() {
        if !matching.is_exposed(v) {
            continue;
        }
        if let Some(&w) = graph
            .neighbors(v)
            .iter()
            .find(|&&w| matching.is_exposed(w))
        {
            matching.add_edge(v, w);
        }
    }
    matching
}

fn next_root(graph: &Graph, matching: &Matching, removed: &[bool]) -> Option<VertexId> {
    (0..graph.num_nodes()).find(|&v| !removed[v] && matching.is_exposed(v))
}
