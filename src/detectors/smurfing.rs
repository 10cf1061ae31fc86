//! Fan-in / fan-out smurfing rings, detected over the raw (un-aggregated)
//! record set within a temporal window.
//!
//! Grounded on `original_source/backend/algorithms.py`'s `detect_smurfing`
//! (group by receiver/sender, gate on distinct-counterparty count and
//! timestamp span) and `network_analysis::TransactionGraph::is_funnel`'s
//! "many incoming, few outgoing" shape for the structural intuition, with
//! the false-positive guard (`total_sent`/`total_received` must be nonzero)
//! and deterministic first-seen member ordering from spec.md §4.3/§9.

use crate::config::AnalyzerConfig;
use crate::graph::Graph;
use crate::record::RawRecord;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FanRingKind {
    FanIn,
    FanOut,
}

/// A fan-in or fan-out ring: one aggregator plus its distinct counterparties,
/// in first-seen (by timestamp) order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanRing {
    pub aggregator: String,
    pub counterparties: Vec<String>,
    pub kind: FanRingKind,
}

impl FanRing {
    pub fn members(&self) -> Vec<String> {
        let mut members = vec![self.aggregator.clone()];
        members.extend(self.counterparties.iter().cloned());
        members
    }

    pub fn tag(&self) -> &'static str {
        match self.kind {
            FanRingKind::FanIn => "fan_in_smurfing",
            FanRingKind::FanOut => "fan_out_smurfing",
        }
    }

    fn member_set(&self) -> HashSet<String> {
        self.members().into_iter().collect()
    }
}

/// Detect all fan-in and fan-out rings.
pub fn detect(graph: &Graph, records: &[RawRecord], config: &AnalyzerConfig) -> Vec<FanRing> {
    let mut rings = Vec::new();
    rings.extend(detect_fan_in(graph, records, config));
    rings.extend(detect_fan_out(graph, records, config));
    dedup_by_member_set(rings)
}

fn detect_fan_in(graph: &Graph, records: &[RawRecord], config: &AnalyzerConfig) -> Vec<FanRing> {
    let mut groups: HashMap<&str, Vec<&RawRecord>> = HashMap::new();
    for r in records {
        if r.sender_id == r.receiver_id {
            continue;
        }
        groups.entry(r.receiver_id.as_str()).or_default().push(r);
    }

    let mut rings = Vec::new();
    for (receiver, group) in groups {
        let senders = first_seen_order(group.iter().map(|r| r.sender_id.as_str()));
        if senders.len() < config.smurf_threshold {
            continue;
        }
        if !within_window(&group, config) {
            continue;
        }
        if graph.total_sent_of(receiver) <= 0.0 {
            continue;
        }
        rings.push(FanRing {
            aggregator: receiver.to_string(),
            counterparties: senders,
            kind: FanRingKind::FanIn,
        });
    }
    rings
}

fn detect_fan_out(graph: &Graph, records: &[RawRecord], config: &AnalyzerConfig) -> Vec<FanRing> {
    let mut groups: HashMap<&str, Vec<&RawRecord>> = HashMap::new();
    for r in records {
        if r.sender_id == r.receiver_id {
            continue;
        }
        groups.entry(r.sender_id.as_str()).or_default().push(r);
    }

    let mut rings = Vec::new();
    for (sender, group) in groups {
        let receivers = first_seen_order(group.iter().map(|r| r.receiver_id.as_str()));
        if receivers.len() < config.smurf_threshold {
            continue;
        }
        if !within_window(&group, config) {
            continue;
        }
        if graph.total_received_of(sender) <= 0.0 {
            continue;
        }
        rings.push(FanRing {
            aggregator: sender.to_string(),
            counterparties: receivers,
            kind: FanRingKind::FanOut,
        });
    }
    rings
}

/// Distinct values in first-seen order. Callers pass records already sorted
/// by timestamp, so this doubles as "first-seen by timestamp".
fn first_seen_order<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut ordered = Vec::new();
    for v in values {
        if seen.insert(v) {
            ordered.push(v.to_string());
        }
    }
    ordered
}

fn within_window(group: &[&RawRecord], config: &AnalyzerConfig) -> bool {
    let min_ts = group.iter().map(|r| r.timestamp).min();
    let max_ts = group.iter().map(|r| r.timestamp).max();
    match (min_ts, max_ts) {
        (Some(min), Some(max)) => max - min <= config.smurf_window,
        _ => false,
    }
}

fn dedup_by_member_set(rings: Vec<FanRing>) -> Vec<FanRing> {
    let mut seen: HashSet<(FanRingKindKey, Vec<String>)> = HashSet::new();
    rings
        .into_iter()
        .filter(|ring| {
            let mut members: Vec<String> = ring.member_set().into_iter().collect();
            members.sort();
            seen.insert((FanRingKindKey::from(ring.kind), members))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum FanRingKindKey {
    In,
    Out,
}

impl From<FanRingKind> for FanRingKindKey {
    fn from(kind: FanRingKind) -> Self {
        match kind {
            FanRingKind::FanIn => FanRingKindKey::In,
            FanRingKind::FanOut => FanRingKindKey::Out,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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
    fn detects_fan_in_ring() {
        let mut records: Vec<RawRecord> = (0..12)
            .map(|i| record(&format!("S{i}"), "AGG", 900.0, i))
            .collect();
        records.push(record("AGG", "OFF", 10000.0, 15));
        records.sort_by_key(|r| r.timestamp);

        let graph = Graph::build(&records);
        let rings = detect(&graph, &records, &AnalyzerConfig::default());

        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].kind, FanRingKind::FanIn);
        assert_eq!(rings[0].aggregator, "AGG");
        assert_eq!(rings[0].counterparties.len(), 12);
    }

    #[test]
    fn detects_fan_out_ring() {
        let mut records = vec![record("CORP", "DISP", 10000.0, 20)];
        records.extend((0..12).map(|i| record("DISP", &format!("R{i}"), 800.0, 21 + i)));
        records.sort_by_key(|r| r.timestamp);

        let graph = Graph::build(&records);
        let rings = detect(&graph, &records, &AnalyzerConfig::default());

        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0].kind, FanRingKind::FanOut);
        assert_eq!(rings[0].aggregator, "DISP");
        assert_eq!(rings[0].counterparties.len(), 12);
    }

    #[test]
    fn merchant_with_no_outflow_is_not_flagged() {
        let records: Vec<RawRecord> = (0..50)
            .map(|i| record(&format!("BUYER{i}"), "M", 35.0, i))
            .collect();

        let graph = Graph::build(&records);
        let rings = detect(&graph, &records, &AnalyzerConfig::default());

        assert!(rings.is_empty());
    }

    #[test]
    fn window_violation_suppresses_ring() {
        let records: Vec<RawRecord> = (0..12)
            .map(|i| record(&format!("S{i}"), "AGG", 900.0, i * 24 * 10))
            .collect();
        let graph = Graph::build(&records);
        let rings = detect(&graph, &records, &AnalyzerConfig::default());
        assert!(rings.is_empty());
    }
}
