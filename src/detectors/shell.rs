//! Four-node layered shell chains: source -> shell -> shell -> sink.
//!
//! Grounded on `original_source/backend/algorithms.py`'s
//! `detect_shell_accounts` (candidate nodes by total transaction count,
//! successor-chasing through the graph to build 4-node chains), generalized
//! to spec.md's exact candidacy test (degree bounds plus a value-throughput
//! ratio rather than a bare count range) and the added time-monotonicity /
//! velocity-cap gate on the three edges.

use crate::config::AnalyzerConfig;
use crate::graph::Graph;
use std::collections::HashSet;

/// An ordered 4-node layered shell chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellChain {
    pub source: String,
    pub shell_one: String,
    pub shell_two: String,
    pub sink: String,
}

impl ShellChain {
    pub fn members(&self) -> Vec<String> {
        vec![
            self.source.clone(),
            self.shell_one.clone(),
            self.shell_two.clone(),
            self.sink.clone(),
        ]
    }

    fn node_set(&self) -> HashSet<String> {
        self.members().into_iter().collect()
    }
}

/// A node is a shell candidate when its total transaction count is small
/// (2..=6) and its inbound/outbound value ratio shows pass-through behavior.
fn is_shell_candidate(graph: &Graph, node: &str, config: &AnalyzerConfig) -> bool {
    let out_count = graph.out_count_of(node);
    let in_count = graph.in_count_of(node);
    if out_count < 1 || in_count < 1 {
        return false;
    }
    let total = out_count + in_count;
    let (lo, hi) = config.shell_degree_bounds;
    if total < lo as u64 || total > hi as u64 {
        return false;
    }
    let sent = graph.total_sent_of(node);
    if sent <= 0.0 {
        return false;
    }
    let ratio = graph.total_received_of(node) / sent;
    let (rlo, rhi) = config.shell_ratio_bounds;
    ratio >= rlo && ratio <= rhi
}

/// Detect all layered shell chains over the aggregated graph.
pub fn detect(graph: &Graph, config: &AnalyzerConfig) -> Vec<ShellChain> {
    let candidates: HashSet<&str> = graph
        .nodes()
        .iter()
        .map(String::as_str)
        .filter(|n| is_shell_candidate(graph, n, config))
        .collect();

    let mut chains = Vec::new();

    for n in graph.nodes() {
        for (h1, edge1) in graph.successors(n) {
            if !candidates.contains(h1.as_str()) {
                continue;
            }
            for (h2, edge2) in graph.successors(h1) {
                if !candidates.contains(h2.as_str()) {
                    continue;
                }
                if edge2.timestamp < edge1.timestamp {
                    continue;
                }
                for (e, edge3) in graph.successors(h2) {
                    if edge3.timestamp < edge2.timestamp {
                        continue;
                    }
                    if edge3.timestamp - edge1.timestamp > config.shell_chain_window {
                        continue;
                    }
                    chains.push(ShellChain {
                        source: n.clone(),
                        shell_one: h1.clone(),
                        shell_two: h2.clone(),
                        sink: e.clone(),
                    });
                }
            }
        }
    }

    dedup_by_node_set(chains)
}

fn dedup_by_node_set(chains: Vec<ShellChain>) -> Vec<ShellChain> {
    let mut seen: HashSet<Vec<String>> = HashSet::new();
    chains
        .into_iter()
        .filter(|chain| {
            let mut members: Vec<String> = chain.node_set().into_iter().collect();
            members.sort();
            seen.insert(members)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::RawRecord;
    use chrono::{TimeZone, Utc};

    fn record(sender: &str, receiver: &str, amount: f64, hour: i64) -> RawRecord {
        RawRecord {
            transaction_id: format!("{sender}-{receiver}-{hour}"),
            sender_id: sender.to_string(),
            receiver_id: receiver.to_string(),
            amount,
            timestamp: Utc.timestamp_opt(hour * 3600, 0).unwrap(),
        }
    }

    #[test]
    fn detects_shell_chain() {
        let records = vec![
            record("SRC", "A", 50000.0, 30),
            record("A", "B", 50000.0, 31),
            record("B", "C", 50000.0, 32),
            record("C", "DST", 50000.0, 33),
        ];
        let graph = Graph::build(&records);
        let chains = detect(&graph, &AnalyzerConfig::default());
        assert!(!chains.is_empty());
        for chain in &chains {
            assert_eq!(chain.members().len(), 4);
        }
    }

    #[test]
    fn rejects_out_of_window_chain() {
        let records = vec![
            record("SRC", "A", 50000.0, 0),
            record("A", "B", 50000.0, 24 * 10),
            record("B", "C", 50000.0, 24 * 20),
            record("C", "DST", 50000.0, 24 * 30),
        ];
        let graph = Graph::build(&records);
        let chains = detect(&graph, &AnalyzerConfig::default());
        assert!(chains.is_empty());
    }

    #[test]
    fn rejects_non_shell_candidate_with_unbalanced_ratio() {
        // B only ever receives, never sends onward - fails total_sent > 0.
        let records = vec![
            record("SRC", "A", 50000.0, 0),
            record("A", "B", 50000.0, 1),
        ];
        let graph = Graph::build(&records);
        let chains = detect(&graph, &AnalyzerConfig::default());
        assert!(chains.is_empty());
    }
}
