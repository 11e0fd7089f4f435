// ABOUTME: Adherence evaluation comparing weekly volume against program targets
// ABOUTME: Applies priority-specific variance thresholds to find under-target muscle groups
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::volume::WeeklyVolumeSnapshot;
use adherence_core::constants::thresholds::{
    HIGH_PRIORITY_VARIANCE_PERCENT, LOW_PRIORITY_VARIANCE_PERCENT,
    MEDIUM_PRIORITY_VARIANCE_PERCENT,
};
use adherence_core::errors::{AppError, AppResult};
use adherence_core::models::{MuscleGroup, MuscleGroupTarget, Priority};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Variance percentage below which each priority tier is flagged
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdherenceThresholds {
    /// Threshold for high priority muscles
    pub high: f64,
    /// Threshold for medium priority muscles
    pub medium: f64,
    /// Threshold for low priority muscles
    pub low: f64,
}

impl Default for AdherenceThresholds {
    fn default() -> Self {
        Self {
            high: HIGH_PRIORITY_VARIANCE_PERCENT,
            medium: MEDIUM_PRIORITY_VARIANCE_PERCENT,
            low: LOW_PRIORITY_VARIANCE_PERCENT,
        }
    }
}

impl AdherenceThresholds {
    /// Threshold for a priority tier
    #[must_use]
    pub const fn for_priority(&self, priority: Priority) -> f64 {
        match priority {
            Priority::High => self.high,
            Priority::Medium => self.medium,
            Priority::Low => self.low,
        }
    }

    /// Check that thresholds are negative and ordered high > medium > low
    ///
    /// # Errors
    ///
    /// Returns a configuration error describing the violated constraint
    pub fn validate(&self) -> AppResult<()> {
        if self.high >= 0.0 || self.medium >= 0.0 || self.low >= 0.0 {
            return Err(AppError::config(
                "adherence thresholds must be negative percentages",
            ));
        }
        if !(self.high > self.medium && self.medium > self.low) {
            return Err(AppError::config(format!(
                "adherence thresholds must satisfy high > medium > low (got {}, {}, {})",
                self.high, self.medium, self.low
            )));
        }
        Ok(())
    }
}

/// Evaluation of one targeted muscle group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MuscleAdherence {
    /// Muscle group
    pub muscle_group: MuscleGroup,
    /// Priority tier from the program
    pub priority: Priority,
    /// Program target
    pub target_weekly_sets: u32,
    /// Measured volume
    pub actual_weekly_sets: u32,
    /// `(actual - target) / target * 100`, or 0 for a zero target
    pub variance_percentage: f64,
    /// Whether the variance is below the priority's threshold
    pub below_threshold: bool,
}

/// Result of comparing a snapshot to program targets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdherenceEvaluation {
    /// Every targeted muscle, in muscle-group order
    pub muscles: Vec<MuscleAdherence>,
}

impl AdherenceEvaluation {
    /// Muscles currently below their threshold
    pub fn below_threshold(&self) -> impl Iterator<Item = &MuscleAdherence> {
        self.muscles.iter().filter(|m| m.below_threshold)
    }

    /// Below-threshold muscles keyed by group
    #[must_use]
    pub fn below_threshold_by_group(&self) -> BTreeMap<MuscleGroup, &MuscleAdherence> {
        self.below_threshold().map(|m| (m.muscle_group, m)).collect()
    }
}

/// Compares weekly volume to program targets
///
/// Stateless with respect to flags: it recomputes the full below-threshold set
/// on every call and leaves open-flag bookkeeping to the lifecycle manager.
#[derive(Debug, Clone, Default)]
pub struct AdherenceEvaluator {
    thresholds: AdherenceThresholds,
}

impl AdherenceEvaluator {
    /// Evaluator with custom thresholds
    #[must_use]
    pub const fn new(thresholds: AdherenceThresholds) -> Self {
        Self { thresholds }
    }

    /// Thresholds in effect
    #[must_use]
    pub const fn thresholds(&self) -> &AdherenceThresholds {
        &self.thresholds
    }

    /// Signed percentage deviation of `actual` from `target`
    #[must_use]
    pub fn variance_percentage(actual: u32, target: u32) -> f64 {
        if target == 0 {
            return 0.0;
        }
        let actual = f64::from(actual);
        let target = f64::from(target);
        (actual - target) / target * 100.0
    }

    /// Evaluate every targeted muscle group
    #[must_use]
    pub fn evaluate(
        &self,
        snapshot: &WeeklyVolumeSnapshot,
        targets: &BTreeMap<MuscleGroup, MuscleGroupTarget>,
    ) -> AdherenceEvaluation {
        let muscles = targets
            .iter()
            .map(|(group, target)| {
                let actual = snapshot.get(*group);
                let variance = Self::variance_percentage(actual, target.target_weekly_sets);
                MuscleAdherence {
                    muscle_group: *group,
                    priority: target.priority,
                    target_weekly_sets: target.target_weekly_sets,
                    actual_weekly_sets: actual,
                    variance_percentage: variance,
                    below_threshold: variance < self.thresholds.for_priority(target.priority),
                }
            })
            .collect();

        AdherenceEvaluation { muscles }
    }
}
