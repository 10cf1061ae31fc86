//! Velocity bursts: three outgoing transactions from one sender inside a
//! short window.
//!
//! Grounded on `fraud_patterns::FraudDetector::check_velocity`, which
//! windows an account's transaction history by wall-clock span rather than
//! a fixed count-per-hour bucket. Generalized from a single incoming
//! transaction's streaming check into a whole-batch sliding-window scan.

use crate::config::AnalyzerConfig;
use crate::record::RawRecord;
use std::collections::HashMap;

/// A single account flagged for a high-velocity outgoing burst.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VelocityFlag {
    pub account_id: String,
}

/// Detect accounts with three consecutive outgoing records inside the
/// configured window. Only the first qualifying window per account matters.
pub fn detect(records: &[RawRecord], config: &AnalyzerConfig) -> Vec<VelocityFlag> {
    let mut by_sender: HashMap<&str, Vec<_>> = HashMap::new();
    for r in records {
        by_sender.entry(r.sender_id.as_str()).or_default().push(r.timestamp);
    }

    let mut flags = Vec::new();
    let burst = config.velocity_burst_size;
    for (sender, mut timestamps) in by_sender {
        if timestamps.len() < burst {
            continue;
        }
        timestamps.sort();
        let triggered = timestamps
            .windows(burst)
            .any(|w| *w.last().unwrap() - *w.first().unwrap() <= config.velocity_window);
        if triggered {
            flags.push(VelocityFlag {
                account_id: sender.to_string(),
            });
        }
    }
    flags.sort_by(|a, b| a.account_id.cmp(&b.account_id));
    flags
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn record(sender: &str, hour: i64) -> RawRecord {
        RawRecord {
            transaction_id: format!("{sender}-{hour}"),
            sender_id: sender.to_string(),
            receiver_id: "X".to_string(),
            amount: 100.0,
            timestamp: Utc.timestamp_opt(hour * 3600, 0).unwrap(),
        }
    }

    #[test]
    fn flags_burst_within_window() {
        let records = vec![record("A", 0), record("A", 2), record("A", 5)];
        let flags = detect(&records, &AnalyzerConfig::default());
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].account_id, "A");
    }

    #[test]
    fn ignores_spread_out_transactions() {
        let records = vec![record("A", 0), record("A", 20), record("A", 40)];
        let flags = detect(&records, &AnalyzerConfig::default());
        assert!(flags.is_empty());
    }

    #[test]
    fn requires_at_least_three_transactions() {
        let records = vec![record("A", 0), record("A", 1)];
        let flags = detect(&records, &AnalyzerConfig::default());
        assert!(flags.is_empty());
    }
}
