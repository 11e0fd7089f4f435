// ABOUTME: Training-load imbalance detection across antagonist muscle pairs
// ABOUTME: Flags quad:hamstring and push:pull ratios associated with elevated injury risk
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::volume::WeeklyVolumeSnapshot;
use adherence_core::constants::imbalance::{
    PUSH_PULL_HIGH_RATIO, PUSH_PULL_MEDIUM_RATIO, QUAD_HAMSTRING_HIGH_RATIO,
    QUAD_HAMSTRING_MEDIUM_RATIO,
};
use adherence_core::models::MuscleGroup;
use serde::{Deserialize, Serialize};

/// Antagonist pair that triggered a risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImbalanceType {
    /// Quadriceps dominate hamstrings
    QuadHamstringImbalance,
    /// Pressing dominates pulling
    PushPullImbalance,
}

/// Risk severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskSeverity {
    /// Ratio above the caution limit
    Medium,
    /// Ratio above the danger limit
    High,
}

/// Ratio-based imbalance found in one check
///
/// Re-derived every week; carries no identity between checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceRisk {
    /// Pair that triggered the risk
    #[serde(rename = "type")]
    pub imbalance_type: ImbalanceType,
    /// Severity
    pub severity: RiskSeverity,
    /// Dominant volume divided by antagonist volume, rounded to two decimals
    pub ratio: f64,
    /// Numerator volume (quads or push)
    pub dominant_volume: u32,
    /// Denominator volume (hamstrings or pull)
    pub antagonist_volume: u32,
    /// What the user should change
    pub recommendation: String,
}

/// Detects dangerous antagonist volume ratios
pub struct ImbalanceRiskDetector;

impl ImbalanceRiskDetector {
    /// Check both antagonist pairs
    ///
    /// A pair with zero antagonist volume is skipped rather than reported.
    #[must_use]
    pub fn detect(snapshot: &WeeklyVolumeSnapshot) -> Vec<ImbalanceRisk> {
        let quad_volume = snapshot.get(MuscleGroup::Quadriceps);
        let ham_volume = snapshot.get(MuscleGroup::Hamstrings);
        let push_volume = snapshot.sum(&MuscleGroup::PUSH);
        let pull_volume = snapshot.sum(&MuscleGroup::PULL);

        [
            Self::quad_hamstring_risk(quad_volume, ham_volume),
            Self::push_pull_risk(push_volume, pull_volume),
        ]
        .into_iter()
        .flatten()
        .collect()
    }

    /// Quad:hamstring check; `None` when balanced or when hamstring volume is zero
    #[must_use]
    pub fn quad_hamstring_risk(quad_volume: u32, ham_volume: u32) -> Option<ImbalanceRisk> {
        let ratio = ratio(quad_volume, ham_volume)?;
        let severity = classify(ratio, QUAD_HAMSTRING_MEDIUM_RATIO, QUAD_HAMSTRING_HIGH_RATIO)?;
        let recommendation = match severity {
            RiskSeverity::High => format!(
                "Quad volume is {ratio:.1}x hamstring volume. Add hamstring work such as Romanian deadlifts and leg curls to reduce knee and hamstring strain risk."
            ),
            RiskSeverity::Medium => format!(
                "Quad volume is {ratio:.1}x hamstring volume. Consider adding a few hamstring sets each week."
            ),
        };

        Some(ImbalanceRisk {
            imbalance_type: ImbalanceType::QuadHamstringImbalance,
            severity,
            ratio: round_ratio(ratio),
            dominant_volume: quad_volume,
            antagonist_volume: ham_volume,
            recommendation,
        })
    }

    /// Push:pull check; `None` when balanced or when pull volume is zero
    #[must_use]
    pub fn push_pull_risk(push_volume: u32, pull_volume: u32) -> Option<ImbalanceRisk> {
        let ratio = ratio(push_volume, pull_volume)?;
        let severity = classify(ratio, PUSH_PULL_MEDIUM_RATIO, PUSH_PULL_HIGH_RATIO)?;
        let recommendation = match severity {
            RiskSeverity::High => format!(
                "Push volume is {ratio:.1}x pull volume. Add rows, pull-ups, and face pulls to protect shoulder health."
            ),
            RiskSeverity::Medium => format!(
                "Push volume is {ratio:.1}x pull volume. Balance pressing with additional pulling sets."
            ),
        };

        Some(ImbalanceRisk {
            imbalance_type: ImbalanceType::PushPullImbalance,
            severity,
            ratio: round_ratio(ratio),
            dominant_volume: push_volume,
            antagonist_volume: pull_volume,
            recommendation,
        })
    }
}

fn ratio(dominant: u32, antagonist: u32) -> Option<f64> {
    if antagonist == 0 {
        return None;
    }
    Some(f64::from(dominant) / f64::from(antagonist))
}

/// Higher severity subsumes the lower; at most one result per pair
fn classify(ratio: f64, medium_above: f64, high_above: f64) -> Option<RiskSeverity> {
    if ratio > high_above {
        Some(RiskSeverity::High)
    } else if ratio > medium_above {
        Some(RiskSeverity::Medium)
    } else {
        None
    }
}

fn round_ratio(ratio: f64) -> f64 {
    (ratio * 100.0).round() / 100.0
}
