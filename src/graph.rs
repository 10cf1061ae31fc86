//! The aggregated directed transaction graph, plus the raw per-account
//! statistics tables the temporal detectors need.
//!
//! Grounded on `network_analysis::TransactionGraph::add_transaction`
//! (teacher), generalized to also aggregate one edge per ordered pair
//! (sum of amount, max of timestamp) and to keep raw per-role counts
//! (`out_count`/`in_count`/`total_sent`/`total_received`) separately, since
//! detectors that reason temporally need the un-aggregated record set.

use crate::record::RawRecord;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

/// An aggregated edge between an ordered pair of accounts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub amount: f64,
    pub timestamp: DateTime<Utc>,
}

/// The aggregated directed transaction graph and its auxiliary stat tables.
pub struct Graph {
    /// Outgoing adjacency: sender -> aggregated edge per distinct receiver.
    adjacency: HashMap<String, BTreeMap<String, Edge>>,
    /// Incoming edge count per node, derived from `adjacency` (aggregated,
    /// i.e. distinct senders, not raw record count).
    in_degree: HashMap<String, u64>,
    pub out_count: HashMap<String, u64>,
    pub in_count: HashMap<String, u64>,
    pub total_sent: HashMap<String, f64>,
    pub total_received: HashMap<String, f64>,
    nodes: Vec<String>,
}

impl Graph {
    /// Build the aggregated graph and statistics tables from a normalized
    /// (but not yet deduplicated) record list.
    pub fn build(records: &[RawRecord]) -> Self {
        let mut adjacency: HashMap<String, BTreeMap<String, Edge>> = HashMap::new();
        let mut out_count: HashMap<String, u64> = HashMap::new();
        let mut in_count: HashMap<String, u64> = HashMap::new();
        let mut total_sent: HashMap<String, f64> = HashMap::new();
        let mut total_received: HashMap<String, f64> = HashMap::new();
        let mut node_set: BTreeMap<String, ()> = BTreeMap::new();

        for r in records {
            node_set.insert(r.sender_id.clone(), ());
            node_set.insert(r.receiver_id.clone(), ());

            *out_count.entry(r.sender_id.clone()).or_insert(0) += 1;
            *in_count.entry(r.receiver_id.clone()).or_insert(0) += 1;
            *total_sent.entry(r.sender_id.clone()).or_insert(0.0) += r.amount;
            *total_received.entry(r.receiver_id.clone()).or_insert(0.0) += r.amount;

            let entry = adjacency
                .entry(r.sender_id.clone())
                .or_default()
                .entry(r.receiver_id.clone())
                .or_insert(Edge {
                    amount: 0.0,
                    timestamp: r.timestamp,
                });
            entry.amount += r.amount;
            if r.timestamp > entry.timestamp {
                entry.timestamp = r.timestamp;
            }
        }

        let mut in_degree: HashMap<String, u64> = HashMap::new();
        for edges in adjacency.values() {
            for receiver in edges.keys() {
                *in_degree.entry(receiver.clone()).or_insert(0) += 1;
            }
        }

        let nodes: Vec<String> = node_set.into_keys().collect();

        Graph {
            adjacency,
            in_degree,
            out_count,
            in_count,
            total_sent,
            total_received,
            nodes,
        }
    }

    /// All account ids in the graph, in stable lexicographic order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Aggregated out-neighbors of `node`, in lexicographic order.
    pub fn successors(&self, node: &str) -> impl Iterator<Item = (&String, &Edge)> {
        self.adjacency.get(node).into_iter().flat_map(|m| m.iter())
    }

    pub fn edge(&self, from: &str, to: &str) -> Option<&Edge> {
        self.adjacency.get(from)?.get(to)
    }

    pub fn in_degree(&self, node: &str) -> u64 {
        *self.in_degree.get(node).unwrap_or(&0)
    }

    pub fn out_count_of(&self, node: &str) -> u64 {
        *self.out_count.get(node).unwrap_or(&0)
    }

    pub fn in_count_of(&self, node: &str) -> u64 {
        *self.in_count.get(node).unwrap_or(&0)
    }

    pub fn total_sent_of(&self, node: &str) -> f64 {
        *self.total_sent.get(node).unwrap_or(&0.0)
    }

    pub fn total_received_of(&self, node: &str) -> f64 {
        *self.total_received.get(node).unwrap_or(&0.0)
    }

    /// Mean in-degree over all nodes with at least one incoming edge's
    /// source — i.e. the mean over the full node set, per spec.
    pub fn mean_in_degree(&self) -> f64 {
        if self.nodes.is_empty() {
            return 0.0;
        }
        let total: u64 = self.nodes.iter().map(|n| self.in_degree(n)).sum();
        total as f64 / self.nodes.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

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
    fn aggregates_multi_edges() {
        let records = vec![
            record("A", "B", 100.0, 1),
            record("A", "B", 200.0, 2),
        ];
        let graph = Graph::build(&records);
        let edge = graph.edge("A", "B").unwrap();
        assert_eq!(edge.amount, 300.0);
        assert_eq!(edge.timestamp, Utc.timestamp_opt(2 * 3600, 0).unwrap());
    }

    #[test]
    fn tracks_raw_counts_separately_from_aggregated_degree() {
        let records = vec![
            record("A", "B", 100.0, 1),
            record("A", "B", 200.0, 2),
        ];
        let graph = Graph::build(&records);
        assert_eq!(graph.out_count_of("A"), 2);
        assert_eq!(graph.in_degree("B"), 1);
    }

    #[test]
    fn mean_in_degree_over_empty_graph_is_zero() {
        let graph = Graph::build(&[]);
        assert_eq!(graph.mean_in_degree(), 0.0);
    }
}
