// ABOUTME: Adjustment plan repository implementation backed by the SQLite plan manager
// ABOUTME: Implements AdjustmentPlanRepository by delegating to Database plan operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::AdjustmentPlanRepository;
use crate::database::{Database, DatabaseError};
use adherence_core::models::{PlanStatus, VolumeAdjustmentPlan};

/// `SQLite` implementation of `AdjustmentPlanRepository`
pub struct AdjustmentPlanRepositoryImpl {
    db: Database,
}

impl AdjustmentPlanRepositoryImpl {
    /// Create a new `AdjustmentPlanRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AdjustmentPlanRepository for AdjustmentPlanRepositoryImpl {
    async fn create_plan(&self, plan: &VolumeAdjustmentPlan) -> Result<(), DatabaseError> {
        self.db
            .plans()
            .create_plan(plan)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn get_plan(
        &self,
        plan_id: Uuid,
    ) -> Result<Option<VolumeAdjustmentPlan>, DatabaseError> {
        self.db
            .plans()
            .get_plan(plan_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn list_plans(
        &self,
        user_id: Uuid,
        status: Option<PlanStatus>,
    ) -> Result<Vec<VolumeAdjustmentPlan>, DatabaseError> {
        self.db
            .plans()
            .list_plans(user_id, status)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn update_plan_status(
        &self,
        plan_id: Uuid,
        status: PlanStatus,
        now: DateTime<Utc>,
    ) -> Result<(), DatabaseError> {
        let updated = self
            .db
            .plans()
            .update_plan_status(plan_id, status, now)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })?;

        if updated {
            Ok(())
        } else {
            Err(DatabaseError::NotFound {
                entity_type: "Adjustment plan",
                entity_id: plan_id.to_string(),
            })
        }
    }
}
