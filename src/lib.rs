//! Batch fraud-ring analysis over a transaction graph.
//!
//! Given a set of transaction records, [`analyze`] builds an aggregated
//! transaction graph, runs four independent structural/temporal detectors,
//! and fuses their output into a [`Report`] of scored suspicious accounts
//! and identified fraud rings. See the module docs for each stage
//! (`graph`, `detectors`, `fusion`, `report`) for the mechanics.

pub mod config;
pub mod detectors;
pub mod error;
pub mod fusion;
pub mod graph;
pub mod ingest;
pub mod record;
pub mod report;

pub use config::AnalyzerConfig;
pub use error::AnalyzerError;
pub use fusion::{FraudRing, PatternType, SuspiciousAccount};
pub use graph::Graph;
pub use record::{RawRecord, RawRecordRow};
pub use report::{Report, Summary};

use detectors::{cycle, degree, shell, smurfing, velocity};
use std::panic::UnwindSafe;
use std::time::Instant;

/// Run a detector stage, isolating the rest of the batch from a panic inside
/// it. A failing detector contributes no findings and its `Internal` error
/// is logged and recorded as a warning on the final report rather than
/// aborting the whole analysis.
fn run_isolated<T, F>(name: &'static str, f: F) -> (T, Option<String>)
where
    T: Default,
    F: FnOnce() -> T + UnwindSafe,
{
    match std::panic::catch_unwind(f) {
        Ok(result) => (result, None),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "detector panicked with no message".to_string());
            let error = AnalyzerError::Internal {
                component: name.to_string(),
                message,
            };
            log::error!("{error}");
            (T::default(), Some(error.to_string()))
        }
    }
}

/// Analyze a batch of records using default thresholds.
pub fn analyze(records: Vec<RawRecord>) -> Report {
    analyze_with_config(records, &AnalyzerConfig::default())
}

/// Analyze a batch of records with caller-supplied thresholds.
///
/// Records need not be pre-sorted; the graph builder and detectors operate
/// on whatever order they're given, and the final report is identical (as a
/// set) regardless of input row order.
pub fn analyze_with_config(records: Vec<RawRecord>, config: &AnalyzerConfig) -> Report {
    let start = Instant::now();
    let total_accounts = {
        let mut ids: Vec<&str> = Vec::with_capacity(records.len() * 2);
        for r in &records {
            ids.push(r.sender_id.as_str());
            ids.push(r.receiver_id.as_str());
        }
        ids.sort_unstable();
        ids.dedup();
        ids.len()
    };

    log::info!("building graph from {} records", records.len());
    let graph = Graph::build(&records);

    let mut warnings = Vec::new();

    let ((cycle_out, cycle_warn), (fan_rings, fan_warn)) = rayon::join(
        || run_isolated("cycle_detector", || cycle::detect(&graph, config)),
        || run_isolated("smurfing_detector", || smurfing::detect(&graph, &records, config)),
    );
    let ((shell_chains, shell_warn), ((velocity_flags, velocity_warn), (degree_flags, degree_warn))) =
        rayon::join(
            || run_isolated("shell_detector", || shell::detect(&graph, config)),
            || {
                rayon::join(
                    || run_isolated("velocity_detector", || velocity::detect(&records, config)),
                    || run_isolated("degree_detector", || degree::detect(&graph, config)),
                )
            },
        );

    for w in [cycle_warn, fan_warn, shell_warn, velocity_warn, degree_warn] {
        if let Some(w) = w {
            warnings.push(w);
        }
    }
    if cycle_out.budget_exceeded {
        warnings.push("cycle detection exceeded its time budget; results are partial".to_string());
    }

    let (fraud_rings, suspicious_accounts) = fusion::fuse(
        cycle_out.cycles,
        fan_rings,
        shell_chains,
        velocity_flags,
        degree_flags,
    );

    let processing_time_seconds = (start.elapsed().as_secs_f64() * 1000.0).round() / 1000.0;
    log::info!(
        "analysis complete: {} suspicious accounts, {} rings, {:.3}s",
        suspicious_accounts.len(),
        fraud_rings.len(),
        processing_time_seconds
    );

    report::build(
        suspicious_accounts,
        fraud_rings,
        total_accounts,
        processing_time_seconds,
        warnings,
    )
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
    fn analyzes_empty_batch() {
        let report = analyze(vec![]);
        assert_eq!(report.summary.total_accounts_analyzed, 0);
        assert!(report.suspicious_accounts.is_empty());
        assert!(report.fraud_rings.is_empty());
    }

    #[test]
    fn flags_a_simple_triangle_as_a_ring() {
        let records = vec![
            record("A", "B", 5000.0, 1),
            record("B", "C", 5000.0, 2),
            record("C", "A", 5000.0, 3),
        ];
        let report = analyze(records);
        assert_eq!(report.fraud_rings.len(), 1);
        assert_eq!(report.fraud_rings[0].pattern_type, PatternType::Cycle);
        assert_eq!(report.fraud_rings[0].ring_id, "RING_001");
        assert_eq!(report.summary.total_accounts_analyzed, 3);
    }

    #[test]
    fn row_order_does_not_affect_the_account_set() {
        let forward = vec![
            record("A", "B", 5000.0, 1),
            record("B", "C", 5000.0, 2),
            record("C", "A", 5000.0, 3),
        ];
        let mut reversed = forward.clone();
        reversed.reverse();

        let a = analyze(forward);
        let b = analyze(reversed);

        let mut ids_a: Vec<&str> = a.suspicious_accounts.iter().map(|s| s.account_id.as_str()).collect();
        let mut ids_b: Vec<&str> = b.suspicious_accounts.iter().map(|s| s.account_id.as_str()).collect();
        ids_a.sort();
        ids_b.sort();
        assert_eq!(ids_a, ids_b);
    }
}
