//! DIMACS graph-file parsing (C8, §4.8): a thin collaborator that turns
//! the on-disk text format into a [`Graph`], reporting malformed lines
//! with their line numbers.

use std::io::BufRead;

use log::debug;

use crate::error::Error;
use crate::graph::Graph;

/// Parses a DIMACS-style `p edge n m` / `e u v` file already opened as a
/// line reader. `path` is used only for diagnostics.
pub fn parse<R: BufRead>(reader: R, path: &str) -> Result<Graph, Error> {
    let mut graph: Option<Graph> = None;
    let mut num_nodes = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.map_err(|source| Error::Io {
            path: path.to_string(),
            source,
        })?;
        let line = line.trim();
        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        // Only the line's first 2/3 tokens are meaningful; anything past
        // them (a weighted-DIMACS weight field, stray trailing junk) is
        // ignored rather than rejected, per the "trailing content on a
        // line is ignored" rule.
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.get(0..2) == Some(["p", "edge"].as_slice()) {
            if graph.is_some() {
                return Err(Error::Format {
                    line: line_no,
                    message: "duplicate 'p edge' line".to_string(),
                });
            }
            let n = tokens.get(2).ok_or_else(|| Error::Format {
                line: line_no,
                message: "'p edge' line missing vertex count".to_string(),
            })?;
            num_nodes = n.parse().map_err(|_| Error::Format {
                line: line_no,
                message: format!("invalid vertex count '{n}'"),
            })?;
            graph = Some(Graph::new(num_nodes));
        } else if tokens.first() == Some(&"e") {
            let Some(&[u, v]) = tokens.get(1..3) else {
                return Err(Error::Format {
                    line: line_no,
                    message: "'e' line missing vertex ids".to_string(),
                });
            };
            let Some(g) = graph.as_mut() else {
                return Err(Error::Format {
                    line: line_no,
                    message: "edge line appears before 'p edge' line".to_string(),
                });
            };
            let u: usize = u.parse().map_err(|_| Error::Format {
                line: line_no,
                message: format!("invalid vertex id '{u}'"),
            })?;
            let v: usize = v.parse().map_err(|_| Error::Format {
                line: line_no,
                message: format!("invalid vertex id '{v}'"),
            })?;
            if u == 0 || u > num_nodes || v == 0 || v > num_nodes {
                return Err(Error::Format {
                    line: line_no,
                    message: format!("vertex id out of range [1, {num_nodes}]"),
                });
            }
            g.add_edge(u - 1, v - 1);
        } else {
            return Err(Error::Format {
                line: line_no,
                message: format!("unrecognized line '{line}'"),
            });
        }
    }

    let graph = graph.ok_or_else(|| Error::Format {
        line: 0,
        message: "missing 'p edge n m' line".to_string(),
    })?;
    debug!(
        "parsed DIMACS graph: {} vertices, {} edges",
        graph.num_nodes(),
        graph.num_edges()
    );
    Ok(graph)
}
