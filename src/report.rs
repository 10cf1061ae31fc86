//! The Reporter: deterministic assembly of the final fraud report.

use crate::fusion::{FraudRing, SuspiciousAccount};
use serde::{Deserialize, Serialize};

/// Batch-level summary statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Summary {
    pub total_accounts_analyzed: usize,
    pub suspicious_accounts_flagged: usize,
    pub fraud_rings_detected: usize,
    pub processing_time_seconds: f64,
    /// Non-fatal conditions encountered during analysis (budget exhaustion,
    /// an isolated detector failure). Empty on a clean run.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}

/// The final fraud report, as described in spec.md §6.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub suspicious_accounts: Vec<SuspiciousAccount>,
    pub fraud_rings: Vec<FraudRing>,
    pub summary: Summary,
}

impl Report {
    /// Serialize to pretty-printed JSON, matching the wire shape of §6.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Assemble the final report from fused rings/accounts and batch metadata.
pub fn build(
    suspicious_accounts: Vec<SuspiciousAccount>,
    fraud_rings: Vec<FraudRing>,
    total_accounts_analyzed: usize,
    processing_time_seconds: f64,
    warnings: Vec<String>,
) -> Report {
    let summary = Summary {
        total_accounts_analyzed,
        suspicious_accounts_flagged: suspicious_accounts.len(),
        fraud_rings_detected: fraud_rings.len(),
        processing_time_seconds,
        warnings,
    };
    Report {
        suspicious_accounts,
        fraud_rings,
        summary,
    }
}
