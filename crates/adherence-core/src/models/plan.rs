// ABOUTME: Volume adjustment plan entity and its weekly ramp projection
// ABOUTME: Plans are user-initiated and independent of the adherence flag lifecycle
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::MuscleGroup;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle state of an adjustment plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanStatus {
    /// Being followed
    Active,
    /// Ramp finished
    Completed,
    /// Abandoned by the user
    Cancelled,
}

impl PlanStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "active" => Some(Self::Active),
            "completed" => Some(Self::Completed),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Linear multi-week schedule for closing a volume gap
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeAdjustmentPlan {
    /// Plan identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Muscle group being ramped
    pub muscle_group: MuscleGroup,
    /// Sets per week when the plan was created
    pub current_weekly_sets: u32,
    /// Sets per week at the end of the plan
    pub target_weekly_sets: u32,
    /// Change applied each week
    pub weekly_increment: u32,
    /// Plan length
    pub duration_weeks: u32,
    /// First day
    pub start_date: NaiveDate,
    /// `start_date` plus `duration_weeks` weeks
    pub end_date: NaiveDate,
    /// Lifecycle state
    pub status: PlanStatus,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl VolumeAdjustmentPlan {
    /// Set target for each week of the plan, week 1 first
    ///
    /// Steps by `weekly_increment` from the current volume toward the target,
    /// never overshooting it; the last week always lands on the target.
    #[must_use]
    pub fn weekly_schedule(&self) -> Vec<u32> {
        let current = i64::from(self.current_weekly_sets);
        let target = i64::from(self.target_weekly_sets);
        let step = if target >= current {
            i64::from(self.weekly_increment)
        } else {
            -i64::from(self.weekly_increment)
        };

        (1..=i64::from(self.duration_weeks))
            .map(|week| {
                let projected = if week == i64::from(self.duration_weeks) {
                    target
                } else if step >= 0 {
                    (current + step * week).min(target)
                } else {
                    (current + step * week).max(target)
                };
                u32::try_from(projected).unwrap_or(0)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(current: u32, target: u32, increment: u32, weeks: u32) -> VolumeAdjustmentPlan {
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        VolumeAdjustmentPlan {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            muscle_group: MuscleGroup::Chest,
            current_weekly_sets: current,
            target_weekly_sets: target,
            weekly_increment: increment,
            duration_weeks: weeks,
            start_date: start,
            end_date: start + chrono::Duration::weeks(i64::from(weeks)),
            status: PlanStatus::Active,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_schedule_ramps_up_linearly() {
        assert_eq!(plan(10, 18, 2, 4).weekly_schedule(), vec![12, 14, 16, 18]);
    }

    #[test]
    fn test_schedule_clamps_at_target() {
        // increment 1 is the floor even for a tiny gap
        assert_eq!(plan(10, 11, 1, 4).weekly_schedule(), vec![11, 11, 11, 11]);
    }

    #[test]
    fn test_schedule_last_week_hits_target_when_rounding_falls_short() {
        // 7 / 4 rounds to 2; three steps reach 16, the final week lands on 17
        assert_eq!(plan(10, 17, 2, 4).weekly_schedule(), vec![12, 14, 16, 17]);
    }

    #[test]
    fn test_schedule_ramps_down_when_target_below_current() {
        assert_eq!(plan(20, 14, 2, 3).weekly_schedule(), vec![18, 16, 14]);
    }

    #[test]
    fn test_status_parse_round_trip() {
        for status in [PlanStatus::Active, PlanStatus::Completed, PlanStatus::Cancelled] {
            assert_eq!(PlanStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(PlanStatus::parse("paused"), None);
    }
}
