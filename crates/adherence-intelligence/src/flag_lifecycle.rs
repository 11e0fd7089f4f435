// ABOUTME: Two-stage adherence flag lifecycle (monitoring -> alerted -> resolved)
// ABOUTME: Plans create/update/resolve transitions and decides which flags newly warrant an alert
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! A first week of shortfall is silent. Once a flag has been open for the
//! configured number of days and the muscle is still under target, the flag
//! escalates to `alerted` exactly once. Any check in which the muscle is back
//! within tolerance resolves the flag, whatever its status.

use crate::adherence::{AdherenceEvaluation, MuscleAdherence};
use adherence_core::constants::defaults::ALERT_AFTER_DAYS;
use adherence_core::models::{AdherenceFlag, FlagStatus, MuscleGroup, Priority};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;
use uuid::Uuid;

/// Flag to insert in `monitoring`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFlag {
    /// Muscle group newly under target
    pub muscle_group: MuscleGroup,
    /// Priority tier
    pub priority: Priority,
    /// Program target
    pub target_weekly_sets: u32,
    /// Measured volume
    pub actual_weekly_sets: u32,
    /// Signed deviation
    pub variance_percentage: f64,
    /// Day of first observation
    pub flagged_date: NaiveDate,
}

/// Refresh of an open flag, possibly escalating it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagUpdate {
    /// Flag being refreshed
    pub flag_id: Uuid,
    /// Muscle group
    pub muscle_group: MuscleGroup,
    /// Priority tier
    pub priority: Priority,
    /// Program target
    pub target_weekly_sets: u32,
    /// Measured volume
    pub actual_weekly_sets: u32,
    /// Signed deviation
    pub variance_percentage: f64,
    /// Day of first observation (unchanged)
    pub flagged_date: NaiveDate,
    /// Status after this check
    pub status: FlagStatus,
    /// Alert timestamp after this check
    pub alerted_at: Option<DateTime<Utc>>,
    /// Whether this check moved the flag from monitoring to alerted
    pub escalated: bool,
}

/// Closure of an open flag
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlagResolution {
    /// Flag being closed
    pub flag_id: Uuid,
    /// Muscle group
    pub muscle_group: MuscleGroup,
    /// Status before resolution
    pub previous_status: FlagStatus,
    /// Resolution timestamp
    pub resolved_at: DateTime<Utc>,
}

/// Every change one check applies to a user's flags
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlagTransitions {
    /// New `monitoring` flags
    pub to_create: Vec<NewFlag>,
    /// Refreshed open flags, including escalations
    pub to_update: Vec<FlagUpdate>,
    /// Flags to close
    pub to_resolve: Vec<FlagResolution>,
    /// Flags escalated by this check; the caller dispatches these
    pub alerts_to_send: Vec<FlagUpdate>,
}

impl FlagTransitions {
    /// Whether the check changes nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_resolve.is_empty()
    }
}

/// Decides flag transitions for one user's check
#[derive(Debug, Clone)]
pub struct FlagLifecycleManager {
    alert_after_days: i64,
}

impl Default for FlagLifecycleManager {
    fn default() -> Self {
        Self::new(ALERT_AFTER_DAYS)
    }
}

impl FlagLifecycleManager {
    /// Manager escalating after `alert_after_days` days in monitoring
    #[must_use]
    pub const fn new(alert_after_days: i64) -> Self {
        Self { alert_after_days }
    }

    /// Days a flag waits in monitoring before escalating
    #[must_use]
    pub const fn alert_after_days(&self) -> i64 {
        self.alert_after_days
    }

    /// Plan transitions for the user's open flags against this check's evaluation
    ///
    /// `open_flags` may contain resolved rows; they are ignored. When storage
    /// holds more than one open flag for a muscle, the oldest is kept and the
    /// rest are resolved.
    #[must_use]
    pub fn plan_transitions(
        &self,
        open_flags: &[AdherenceFlag],
        evaluation: &AdherenceEvaluation,
        now: DateTime<Utc>,
    ) -> FlagTransitions {
        let today = now.date_naive();
        let below = evaluation.below_threshold_by_group();
        let mut transitions = FlagTransitions::default();

        let canonical = Self::canonical_open_flags(open_flags, now, &mut transitions);

        for (group, flag) in &canonical {
            match below.get(group) {
                Some(measured) => {
                    let update = self.refresh(flag, measured, today, now);
                    if update.escalated {
                        transitions.alerts_to_send.push(update.clone());
                    }
                    transitions.to_update.push(update);
                }
                None => transitions.to_resolve.push(FlagResolution {
                    flag_id: flag.id,
                    muscle_group: *group,
                    previous_status: flag.status,
                    resolved_at: now,
                }),
            }
        }

        for (group, measured) in &below {
            if !canonical.contains_key(group) {
                transitions.to_create.push(NewFlag {
                    muscle_group: *group,
                    priority: measured.priority,
                    target_weekly_sets: measured.target_weekly_sets,
                    actual_weekly_sets: measured.actual_weekly_sets,
                    variance_percentage: measured.variance_percentage,
                    flagged_date: today,
                });
            }
        }

        transitions
    }

    fn refresh(
        &self,
        flag: &AdherenceFlag,
        measured: &MuscleAdherence,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> FlagUpdate {
        let escalated = flag.status == FlagStatus::Monitoring
            && flag.days_flagged(today) >= self.alert_after_days;

        let (status, alerted_at) = if escalated {
            (FlagStatus::Alerted, Some(now))
        } else {
            (flag.status, flag.alerted_at)
        };

        FlagUpdate {
            flag_id: flag.id,
            muscle_group: flag.muscle_group,
            priority: measured.priority,
            target_weekly_sets: measured.target_weekly_sets,
            actual_weekly_sets: measured.actual_weekly_sets,
            variance_percentage: measured.variance_percentage,
            flagged_date: flag.flagged_date,
            status,
            alerted_at,
            escalated,
        }
    }

    /// One open flag per muscle; extra open rows are scheduled for resolution
    fn canonical_open_flags<'a>(
        open_flags: &'a [AdherenceFlag],
        now: DateTime<Utc>,
        transitions: &mut FlagTransitions,
    ) -> BTreeMap<MuscleGroup, &'a AdherenceFlag> {
        let mut canonical: BTreeMap<MuscleGroup, &AdherenceFlag> = BTreeMap::new();

        let mut ordered: Vec<&AdherenceFlag> =
            open_flags.iter().filter(|f| f.status.is_open()).collect();
        ordered.sort_by_key(|f| (f.flagged_date, f.created_at));

        for flag in ordered {
            if canonical.contains_key(&flag.muscle_group) {
                warn!(
                    flag_id = %flag.id,
                    user_id = %flag.user_id,
                    muscle_group = %flag.muscle_group,
                    "Duplicate open adherence flag; resolving newer copy"
                );
                transitions.to_resolve.push(FlagResolution {
                    flag_id: flag.id,
                    muscle_group: flag.muscle_group,
                    previous_status: flag.status,
                    resolved_at: now,
                });
            } else {
                canonical.insert(flag.muscle_group, flag);
            }
        }

        canonical
    }
}
