// ABOUTME: Adherence intelligence engine: volume, targets, imbalance, flags, and ramp plans
// ABOUTME: Storage-free algorithms consumed by the weekly check orchestrator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Adherence Intelligence
//!
//! Every component in this crate is a pure function of its inputs and the
//! supplied clock value, so a weekly check re-run with the same data yields
//! the same decisions.

/// Per-muscle weekly set counting
pub mod volume;

/// Priority-weighted comparison of volume against program targets
pub mod adherence;

/// Antagonist-pair ratio checks
pub mod imbalance;

/// Monitoring, alerted, and resolved transitions for adherence flags
pub mod flag_lifecycle;

/// Multi-week linear volume ramps
pub mod adjustment;

pub use adherence::{AdherenceEvaluation, AdherenceEvaluator, AdherenceThresholds, MuscleAdherence};
pub use adjustment::{AdjustmentPlanner, PlanRequest};
pub use flag_lifecycle::{FlagLifecycleManager, FlagResolution, FlagTransitions, FlagUpdate, NewFlag};
pub use imbalance::{ImbalanceRisk, ImbalanceRiskDetector, ImbalanceType, RiskSeverity};
pub use volume::{VolumeAggregator, WeeklyVolumeSnapshot};
