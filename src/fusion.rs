//! Fusion & Scoring: the only stage that assigns ring identifiers and
//! account risk scores.
//!
//! Grounded on `original_source/backend/main.py`'s suspect-node scoring
//! loop (accumulate per-pattern deltas over a node set, record the first
//! ring id, sort by score descending), reimplemented with spec.md's exact
//! point values, fixed ring enumeration order, and a 99.0 score cap instead
//! of the prototype's ad hoc `min(score, 100)`.

use crate::detectors::{Cycle, DegreeFlag, FanRing, FanRingKind, ShellChain, VelocityFlag};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    Cycle,
    FanInSmurfing,
    FanOutSmurfing,
    LayeredShell,
}

impl PatternType {
    fn ring_score(self) -> f64 {
        match self {
            PatternType::Cycle => 95.0,
            PatternType::FanInSmurfing | PatternType::FanOutSmurfing => 88.5,
            PatternType::LayeredShell => 92.0,
        }
    }
}

/// A fused, identified fraud ring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudRing {
    pub ring_id: String,
    pub member_accounts: Vec<String>,
    pub pattern_type: PatternType,
    pub risk_score: f64,
}

/// A fused, scored suspicious account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuspiciousAccount {
    pub account_id: String,
    pub suspicion_score: f64,
    pub detected_patterns: Vec<String>,
    pub ring_id: String,
}

const SCORE_CAP: f64 = 99.0;
const CYCLE_DELTA: f64 = 45.0;
const FAN_DELTA: f64 = 35.0;
const SHELL_DELTA: f64 = 40.0;
const VELOCITY_DELTA: f64 = 20.0;
const DEGREE_DELTA: f64 = 25.0;

struct Accumulator {
    score: f64,
    patterns: BTreeSet<String>,
    ring_id: Option<String>,
}

impl Accumulator {
    fn new() -> Self {
        Self {
            score: 0.0,
            patterns: BTreeSet::new(),
            ring_id: None,
        }
    }

    fn touch(&mut self, delta: f64, tag: &str, ring_id: Option<&str>) {
        self.score = (self.score + delta).min(SCORE_CAP);
        self.patterns.insert(tag.to_string());
        if self.ring_id.is_none() {
            if let Some(id) = ring_id {
                self.ring_id = Some(id.to_string());
            }
        }
    }
}

/// Combine detector outputs into identified rings and scored accounts.
///
/// Rings are enumerated in a fixed order — cycles, fan-in, fan-out, shell
/// chains — so identifier assignment is deterministic regardless of how the
/// detectors themselves were scheduled.
pub fn fuse(
    cycles: Vec<Cycle>,
    fan_rings: Vec<FanRing>,
    shell_chains: Vec<ShellChain>,
    velocity_flags: Vec<VelocityFlag>,
    degree_flags: Vec<DegreeFlag>,
) -> (Vec<FraudRing>, Vec<SuspiciousAccount>) {
    let mut cycles = cycles;
    cycles.sort_by(|a, b| a.members.cmp(&b.members));

    let mut fan_in: Vec<&FanRing> = fan_rings
        .iter()
        .filter(|r| r.kind == FanRingKind::FanIn)
        .collect();
    fan_in.sort_by_key(|r| r.aggregator.clone());

    let mut fan_out: Vec<&FanRing> = fan_rings
        .iter()
        .filter(|r| r.kind == FanRingKind::FanOut)
        .collect();
    fan_out.sort_by_key(|r| r.aggregator.clone());

    let mut shell_chains = shell_chains;
    shell_chains.sort_by(|a, b| a.members().cmp(&b.members()));

    let mut rings = Vec::new();
    let mut accumulators: HashMap<String, Accumulator> = HashMap::new();
    let mut next_id: usize = 1;

    for cycle in &cycles {
        let ring_id = format!("RING_{:03}", next_id);
        next_id += 1;
        let tag = cycle.tag();
        for account in &cycle.members {
            accumulators
                .entry(account.clone())
                .or_insert_with(Accumulator::new)
                .touch(CYCLE_DELTA, &tag, Some(&ring_id));
        }
        rings.push(FraudRing {
            ring_id,
            member_accounts: cycle.members.clone(),
            pattern_type: PatternType::Cycle,
            risk_score: PatternType::Cycle.ring_score(),
        });
    }

    for ring in &fan_in {
        let ring_id = format!("RING_{:03}", next_id);
        next_id += 1;
        let members = ring.members();
        for account in &members {
            accumulators
                .entry(account.clone())
                .or_insert_with(Accumulator::new)
                .touch(FAN_DELTA, ring.tag(), Some(&ring_id));
        }
        rings.push(FraudRing {
            ring_id,
            member_accounts: members,
            pattern_type: PatternType::FanInSmurfing,
            risk_score: PatternType::FanInSmurfing.ring_score(),
        });
    }

    for ring in &fan_out {
        let ring_id = format!("RING_{:03}", next_id);
        next_id += 1;
        let members = ring.members();
        for account in &members {
            accumulators
                .entry(account.clone())
                .or_insert_with(Accumulator::new)
                .touch(FAN_DELTA, ring.tag(), Some(&ring_id));
        }
        rings.push(FraudRing {
            ring_id,
            member_accounts: members,
            pattern_type: PatternType::FanOutSmurfing,
            risk_score: PatternType::FanOutSmurfing.ring_score(),
        });
    }

    for chain in &shell_chains {
        let ring_id = format!("RING_{:03}", next_id);
        next_id += 1;
        let members = chain.members();
        for account in &members {
            accumulators
                .entry(account.clone())
                .or_insert_with(Accumulator::new)
                .touch(SHELL_DELTA, "layered_shell", Some(&ring_id));
        }
        rings.push(FraudRing {
            ring_id,
            member_accounts: members,
            pattern_type: PatternType::LayeredShell,
            risk_score: PatternType::LayeredShell.ring_score(),
        });
    }

    for flag in &velocity_flags {
        accumulators
            .entry(flag.account_id.clone())
            .or_insert_with(Accumulator::new)
            .touch(VELOCITY_DELTA, "high_velocity_burst", None);
    }

    for flag in &degree_flags {
        accumulators
            .entry(flag.account_id.clone())
            .or_insert_with(Accumulator::new)
            .touch(DEGREE_DELTA, "degree_anomaly_hub", None);
    }

    let mut accounts: Vec<SuspiciousAccount> = accumulators
        .into_iter()
        .map(|(account_id, acc)| SuspiciousAccount {
            account_id,
            suspicion_score: acc.score,
            detected_patterns: acc.patterns.into_iter().collect(),
            ring_id: acc.ring_id.unwrap_or_else(|| "N/A".to_string()),
        })
        .collect();

    accounts.sort_by(|a, b| {
        b.suspicion_score
            .partial_cmp(&a.suspicion_score)
            .unwrap()
            .then_with(|| a.account_id.cmp(&b.account_id))
    });

    (rings, accounts)
}
