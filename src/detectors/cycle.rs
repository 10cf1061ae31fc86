//! Elementary directed cycle enumeration, length 3..5.
//!
//! Grounded on `other_examples/…polysettle-clearing-engine__src-graph-cycle_detection.rs`'s
//! `find_cycles`/`dfs_find_cycles`: a DFS from each node that only follows
//! edges to nodes lexicographically greater than the start, which finds
//! every elementary *walk* exactly once, rooted at its smallest member.
//! Adapted with a length cap and a wall-clock budget in place of the
//! teacher's unbounded simple-cycle search. The lexicographic-root
//! constraint only dedups rotations of one walk; two opposite-direction
//! cycles over the same node set (A->B->C->A and A->C->B->A) still come out
//! as two walks, so a final `dedup_by_node_set` pass collapses those,
//! matching the same by-node-set rule `smurfing::dedup_by_member_set` and
//! `shell::dedup_by_node_set` already apply to their own ring types.

use crate::config::AnalyzerConfig;
use crate::graph::Graph;
use std::collections::HashSet;
use std::time::Instant;

/// An elementary cycle, canonical rotation starting at its lexicographically
/// smallest node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cycle {
    pub members: Vec<String>,
}

impl Cycle {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn tag(&self) -> String {
        format!("cycle_length_{}", self.members.len())
    }
}

/// Result of cycle enumeration: the cycles found, plus whether the time
/// budget was exhausted before the search finished (§4.2's soft warning).
#[derive(Debug, Default)]
pub struct CycleOutput {
    pub cycles: Vec<Cycle>,
    pub budget_exceeded: bool,
}

/// Enumerate elementary cycles of length in `config.cycle_length_bounds`.
pub fn detect(graph: &Graph, config: &AnalyzerConfig) -> CycleOutput {
    let (min_len, max_len) = config.cycle_length_bounds;
    let deadline = Instant::now() + config.cycle_time_budget;
    let mut output = CycleOutput::default();

    for start in graph.nodes() {
        if Instant::now() >= deadline {
            output.budget_exceeded = true;
            break;
        }

        let mut path: Vec<String> = vec![start.clone()];
        let mut path_set: HashSet<String> = HashSet::new();
        path_set.insert(start.clone());

        dfs(
            graph,
            start,
            start,
            &mut path,
            &mut path_set,
            min_len,
            max_len,
            deadline,
            &mut output,
        );

        if output.budget_exceeded {
            break;
        }
    }

    output.cycles = dedup_by_node_set(output.cycles);
    output
}

/// Collapse cycles that share the same unordered node set (e.g. the two
/// opposite-direction traversals of one bidirectional triangle) into a
/// single ring, keeping whichever was discovered first.
fn dedup_by_node_set(cycles: Vec<Cycle>) -> Vec<Cycle> {
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    cycles
        .into_iter()
        .filter(|cycle| {
            let mut members = cycle.members.clone();
            members.sort();
            seen.insert(members)
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn dfs(
    graph: &Graph,
    current: &str,
    start: &str,
    path: &mut Vec<String>,
    path_set: &mut HashSet<String>,
    min_len: usize,
    max_len: usize,
    deadline: Instant,
    output: &mut CycleOutput,
) {
    if Instant::now() >= deadline {
        output.budget_exceeded = true;
        return;
    }

    if path.len() >= max_len {
        return;
    }

    for (next, _edge) in graph.successors(current) {
        if next == start {
            if path.len() >= min_len {
                output.cycles.push(Cycle {
                    members: path.clone(),
                });
            }
            continue;
        }

        if next.as_str() > start && !path_set.contains(next) {
            path.push(next.clone());
            path_set.insert(next.clone());

            dfs(
                graph, next, start, path, path_set, min_len, max_len, deadline, output,
            );

            path.pop();
            path_set.remove(next);

            if output.budget_exceeded {
                return;
            }
        }
    }
}
