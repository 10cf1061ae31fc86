//! Tunable thresholds for the detection pipeline.
//!
//! Mirrors the teacher crate's `ValidatorConfig`/`FraudThresholds` shape: a
//! plain `Default`-able struct of knobs, overridable via
//! [`crate::analyze_with_config`].

use chrono::Duration;

/// Thresholds and windows used by the four detectors and the cycle cap.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Minimum distinct counterparties for a fan-in/fan-out ring (`T_smurf`).
    pub smurf_threshold: usize,
    /// Temporal window a smurfing ring's records must fit within (`W_smurf`).
    pub smurf_window: Duration,
    /// Inclusive bounds on `total_received / total_sent` for a shell candidate.
    pub shell_ratio_bounds: (f64, f64),
    /// Inclusive bounds on `out_count + in_count` for a shell candidate.
    pub shell_degree_bounds: (usize, usize),
    /// Maximum span between a shell chain's first and last edge timestamp.
    pub shell_chain_window: Duration,
    /// Number of consecutive outgoing records that define a velocity burst.
    pub velocity_burst_size: usize,
    /// Maximum span of a velocity burst window.
    pub velocity_window: Duration,
    /// In-degree must exceed this multiple of the mean in-degree.
    pub degree_anomaly_multiple: f64,
    /// In-degree must also exceed this absolute floor.
    pub degree_anomaly_floor: u64,
    /// Wall-clock budget for cycle enumeration before returning partial results.
    pub cycle_time_budget: std::time::Duration,
    /// Minimum/maximum cycle length of interest.
    pub cycle_length_bounds: (usize, usize),
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            smurf_threshold: 4,
            smurf_window: Duration::days(7),
            shell_ratio_bounds: (0.40, 2.50),
            shell_degree_bounds: (2, 6),
            shell_chain_window: Duration::days(5),
            velocity_burst_size: 3,
            velocity_window: Duration::hours(12),
            degree_anomaly_multiple: 3.0,
            degree_anomaly_floor: 3,
            cycle_time_budget: std::time::Duration::from_secs(2),
            cycle_length_bounds: (3, 5),
        }
    }
}
