//! Degree-anomaly hubs: accounts whose in-degree dwarfs the graph mean.
//!
//! Grounded on `network_analysis::TransactionNode::is_funnel`'s
//! "many incoming" shape, generalized from a fixed count (>=5) to a
//! graph-relative threshold against the mean in-degree.

use crate::config::AnalyzerConfig;
use crate::graph::Graph;

/// A single account flagged as a degree-anomaly hub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DegreeFlag {
    pub account_id: String,
}

/// Detect nodes whose in-degree exceeds both the absolute floor and the
/// configured multiple of the mean in-degree. Returns nothing for an
/// empty graph.
pub fn detect(graph: &Graph, config: &AnalyzerConfig) -> Vec<DegreeFlag> {
    if graph.node_count() == 0 {
        return Vec::new();
    }
    let mean = graph.mean_in_degree();
    let mut flags: Vec<DegreeFlag> = graph
        .nodes()
        .iter()
        .filter(|n| {
            let in_degree = graph.in_degree(n) as f64;
            in_degree > config.degree_anomaly_multiple * mean
                && in_degree > config.degree_anomaly_floor as f64
        })
        .map(|n| DegreeFlag {
            account_id: n.clone(),
        })
        .collect();
    flags.sort_by(|a, b| a.account_id.cmp(&b.account_id));
    flags
}
