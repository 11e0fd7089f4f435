// ABOUTME: Linear multi-week volume ramp planning
// ABOUTME: Spreads a weekly set gap across a plan so volume never jumps abruptly
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use adherence_core::constants::defaults::{
    ADJUSTMENT_PLAN_WEEKS, MAX_ADJUSTMENT_PLAN_WEEKS, MIN_WEEKLY_INCREMENT,
};
use adherence_core::errors::{AppError, AppResult, ErrorCode};
use adherence_core::models::{MuscleGroup, PlanStatus, VolumeAdjustmentPlan};
use chrono::{DateTime, Days, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Inputs for a new adjustment plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    /// Muscle group to ramp
    pub muscle_group: MuscleGroup,
    /// Sets per week today
    pub current_weekly_sets: i64,
    /// Desired sets per week
    pub target_weekly_sets: i64,
    /// Plan length; defaults to four weeks
    #[serde(default = "default_duration_weeks")]
    pub duration_weeks: i64,
}

const fn default_duration_weeks() -> i64 {
    ADJUSTMENT_PLAN_WEEKS as i64
}

impl PlanRequest {
    /// Request using the default duration
    #[must_use]
    pub const fn new(muscle_group: MuscleGroup, current: i64, target: i64) -> Self {
        Self {
            muscle_group,
            current_weekly_sets: current,
            target_weekly_sets: target,
            duration_weeks: default_duration_weeks(),
        }
    }

    /// Override the plan length
    #[must_use]
    pub const fn with_duration_weeks(mut self, weeks: i64) -> Self {
        self.duration_weeks = weeks;
        self
    }
}

/// Builds advisory volume ramps
pub struct AdjustmentPlanner;

impl AdjustmentPlanner {
    /// `max(1, round((target - current) / duration))`, rounding half to even
    #[must_use]
    pub fn weekly_increment(current: u32, target: u32, duration_weeks: u32) -> u32 {
        let gap = f64::from(target) - f64::from(current);
        let per_week = (gap / f64::from(duration_weeks.max(1))).round_ties_even();
        if per_week < f64::from(MIN_WEEKLY_INCREMENT) {
            MIN_WEEKLY_INCREMENT
        } else {
            // Safe: bounded above by the u32 gap
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            {
                per_week as u32
            }
        }
    }

    /// Validate a request and build an `active` plan starting today
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the duration is under one week or a set
    /// count is negative or out of range, and `ValueOutOfRange` when the
    /// duration exceeds [`MAX_ADJUSTMENT_PLAN_WEEKS`]
    pub fn plan(
        user_id: Uuid,
        request: &PlanRequest,
        now: DateTime<Utc>,
    ) -> AppResult<VolumeAdjustmentPlan> {
        let duration_weeks = u32::try_from(request.duration_weeks)
            .ok()
            .filter(|weeks| *weeks >= 1)
            .ok_or_else(|| {
                AppError::invalid_input(format!(
                    "duration_weeks must be at least 1 (got {})",
                    request.duration_weeks
                ))
            })?;
        if duration_weeks > MAX_ADJUSTMENT_PLAN_WEEKS {
            return Err(AppError::new(
                ErrorCode::ValueOutOfRange,
                format!(
                    "duration_weeks must be at most {MAX_ADJUSTMENT_PLAN_WEEKS} (got {duration_weeks})"
                ),
            ));
        }
        let current = non_negative_sets("current_weekly_sets", request.current_weekly_sets)?;
        let target = non_negative_sets("target_weekly_sets", request.target_weekly_sets)?;

        let start_date = now.date_naive();
        let end_date = start_date
            .checked_add_days(Days::new(u64::from(duration_weeks) * 7))
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::ValueOutOfRange,
                    format!("plan starting {start_date} ends past the supported calendar"),
                )
            })?;
        Ok(VolumeAdjustmentPlan {
            id: Uuid::new_v4(),
            user_id,
            muscle_group: request.muscle_group,
            current_weekly_sets: current,
            target_weekly_sets: target,
            weekly_increment: Self::weekly_increment(current, target, duration_weeks),
            duration_weeks,
            start_date,
            end_date,
            status: PlanStatus::Active,
            created_at: now,
        })
    }
}

fn non_negative_sets(field: &str, value: i64) -> AppResult<u32> {
    u32::try_from(value).map_err(|_| {
        AppError::invalid_input(format!("{field} must be a non-negative set count (got {value})"))
    })
}
