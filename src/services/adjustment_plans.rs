// ABOUTME: User-initiated volume adjustment plan operations
// ABOUTME: Validates requests, persists advisory ramps, and moves plans out of the active state
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::database::repositories::{AdjustmentPlanRepository, AdjustmentPlanRepositoryImpl};
use crate::database::Database;
use adherence_core::errors::{AppError, AppResult};
use adherence_core::models::{MuscleGroup, PlanStatus, VolumeAdjustmentPlan};
use adherence_intelligence::{AdjustmentPlanner, PlanRequest};
use chrono::{DateTime, Utc};
use tracing::info;
use uuid::Uuid;

/// Creates and manages adjustment plans
pub struct AdjustmentPlanService {
    plans: Arc<dyn AdjustmentPlanRepository>,
}

impl AdjustmentPlanService {
    /// Service over an explicit plan repository
    #[must_use]
    pub fn new(plans: Arc<dyn AdjustmentPlanRepository>) -> Self {
        Self { plans }
    }

    /// Service backed by the `SQLite` repository
    #[must_use]
    pub fn from_database(db: &Database) -> Self {
        Self::new(Arc::new(AdjustmentPlanRepositoryImpl::new(db.clone())))
    }

    /// Build and store a plan ramping `muscle_group` from `current` to `target`
    ///
    /// `duration_weeks` defaults to four. Creating a plan never touches the
    /// user's adherence flags.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` for an unknown muscle group, a negative set
    /// count, or a duration under one week; `ValueOutOfRange` for a duration
    /// over a year; a database error if the insert fails
    pub async fn create_adjustment_plan(
        &self,
        user_id: Uuid,
        muscle_group: &str,
        current: i64,
        target: i64,
        duration_weeks: Option<i64>,
    ) -> AppResult<VolumeAdjustmentPlan> {
        let group = MuscleGroup::parse(muscle_group).ok_or_else(|| {
            AppError::invalid_input(format!("Unknown muscle group '{muscle_group}'"))
                .with_user_id(user_id)
        })?;

        let mut request = PlanRequest::new(group, current, target);
        if let Some(weeks) = duration_weeks {
            request = request.with_duration_weeks(weeks);
        }
        self.create_from_request(user_id, &request, Utc::now()).await
    }

    /// Store a plan for an already-typed request
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when the request fails validation; a database
    /// error if the insert fails
    pub async fn create_from_request(
        &self,
        user_id: Uuid,
        request: &PlanRequest,
        now: DateTime<Utc>,
    ) -> AppResult<VolumeAdjustmentPlan> {
        let plan = AdjustmentPlanner::plan(user_id, request, now)
            .map_err(|e| e.with_user_id(user_id))?;
        self.plans
            .create_plan(&plan)
            .await
            .map_err(|e| AppError::from(e).with_user_id(user_id))?;

        info!(
            user.id = %user_id,
            plan.id = %plan.id,
            plan.muscle_group = %plan.muscle_group,
            plan.weekly_increment = plan.weekly_increment,
            "Volume adjustment plan created"
        );
        Ok(plan)
    }

    /// Plans for a user, newest first
    ///
    /// # Errors
    ///
    /// Returns a database error if the query fails
    pub async fn list_plans(
        &self,
        user_id: Uuid,
        status: Option<PlanStatus>,
    ) -> AppResult<Vec<VolumeAdjustmentPlan>> {
        Ok(self.plans.list_plans(user_id, status).await?)
    }

    /// Mark an active plan completed
    ///
    /// # Errors
    ///
    /// See [`Self::update_plan_status`]
    pub async fn complete_plan(&self, plan_id: Uuid) -> AppResult<VolumeAdjustmentPlan> {
        self.update_plan_status(plan_id, PlanStatus::Completed, Utc::now())
            .await
    }

    /// Mark an active plan cancelled
    ///
    /// # Errors
    ///
    /// See [`Self::update_plan_status`]
    pub async fn cancel_plan(&self, plan_id: Uuid) -> AppResult<VolumeAdjustmentPlan> {
        self.update_plan_status(plan_id, PlanStatus::Cancelled, Utc::now())
            .await
    }

    /// Move an active plan to `completed` or `cancelled`
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` for an unknown plan and `InvalidInput` when
    /// the plan is not active or the requested status is `active`
    pub async fn update_plan_status(
        &self,
        plan_id: Uuid,
        status: PlanStatus,
        now: DateTime<Utc>,
    ) -> AppResult<VolumeAdjustmentPlan> {
        if status == PlanStatus::Active {
            return Err(AppError::invalid_input("A plan cannot be re-activated")
                .with_resource_id(plan_id.to_string()));
        }

        let mut plan = self
            .plans
            .get_plan(plan_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Adjustment plan {plan_id}")))?;

        if plan.status != PlanStatus::Active {
            return Err(AppError::invalid_input(format!(
                "Plan is already {}",
                plan.status
            ))
            .with_resource_id(plan_id.to_string()));
        }

        self.plans.update_plan_status(plan_id, status, now).await?;

        info!(plan.id = %plan_id, plan.status = %status, "Volume adjustment plan closed");
        plan.status = status;
        Ok(plan)
    }
}
