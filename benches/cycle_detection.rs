//! Benchmarks elementary cycle enumeration against a dense synthetic graph.
//!
//! Revives the teacher crate's declared-but-unimplemented `validator_benchmark`
//! bench target, in the same `criterion` harness-off style.

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fraud_ring_analyzer::config::AnalyzerConfig;
use fraud_ring_analyzer::detectors::cycle;
use fraud_ring_analyzer::graph::Graph;
use fraud_ring_analyzer::RawRecord;

fn dense_graph(node_count: usize) -> Graph {
    let mut records = Vec::new();
    for i in 0..node_count {
        for offset in 1..=3 {
            let j = (i + offset) % node_count;
            records.push(RawRecord {
                transaction_id: format!("T{i}-{j}"),
                sender_id: format!("N{i}"),
                receiver_id: format!("N{j}"),
                amount: 100.0,
                timestamp: Utc.timestamp_opt(i as i64, 0).unwrap(),
            });
        }
    }
    Graph::build(&records)
}

fn bench_cycle_detection(c: &mut Criterion) {
    let graph = dense_graph(60);
    let config = AnalyzerConfig::default();

    c.bench_function("cycle_detection_dense_60_nodes", |b| {
        b.iter(|| cycle::detect(black_box(&graph), black_box(&config)))
    });
}

criterion_group!(benches, bench_cycle_detection);
criterion_main!(benches);
