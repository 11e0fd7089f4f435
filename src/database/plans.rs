// ABOUTME: Database operations for user-initiated volume adjustment plans
// ABOUTME: Stores plans, lists them by status, and records completion or cancellation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    format_timestamp, invalid_column, parse_date, parse_timestamp, parse_uuid, to_u32, Database,
};
use adherence_core::errors::{AppError, AppResult};
use adherence_core::models::{MuscleGroup, PlanStatus, VolumeAdjustmentPlan};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

const PLAN_COLUMNS: &str = r"
    id, user_id, muscle_group, current_weekly_sets, target_weekly_sets, weekly_increment,
    duration_weeks, start_date, end_date, status, created_at
";

impl Database {
    pub(super) async fn migrate_plans(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS volume_adjustment_plans (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                muscle_group TEXT NOT NULL,
                current_weekly_sets INTEGER NOT NULL,
                target_weekly_sets INTEGER NOT NULL,
                weekly_increment INTEGER NOT NULL,
                duration_weeks INTEGER NOT NULL,
                start_date TEXT NOT NULL,
                end_date TEXT NOT NULL,
                status TEXT NOT NULL CHECK (status IN ('active', 'completed', 'cancelled')),
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_adjustment_plans_user_status ON volume_adjustment_plans(user_id, status)",
        ])
        .await
    }
}

/// Adjustment plan database operations
pub struct AdjustmentPlanManager {
    pool: SqlitePool,
}

impl AdjustmentPlanManager {
    /// Create a new plan manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Persist a new plan
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_plan(&self, plan: &VolumeAdjustmentPlan) -> AppResult<()> {
        let created_at = format_timestamp(plan.created_at);
        sqlx::query(
            r"
            INSERT INTO volume_adjustment_plans (
                id, user_id, muscle_group, current_weekly_sets, target_weekly_sets,
                weekly_increment, duration_weeks, start_date, end_date, status,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $11)
            ",
        )
        .bind(plan.id.to_string())
        .bind(plan.user_id.to_string())
        .bind(plan.muscle_group.as_str())
        .bind(i64::from(plan.current_weekly_sets))
        .bind(i64::from(plan.target_weekly_sets))
        .bind(i64::from(plan.weekly_increment))
        .bind(i64::from(plan.duration_weeks))
        .bind(plan.start_date.format("%Y-%m-%d").to_string())
        .bind(plan.end_date.format("%Y-%m-%d").to_string())
        .bind(plan.status.as_str())
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create adjustment plan: {e}")))?;

        Ok(())
    }

    /// Look up a plan by id
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored row is malformed
    pub async fn get_plan(&self, plan_id: Uuid) -> AppResult<Option<VolumeAdjustmentPlan>> {
        let query = format!("SELECT {PLAN_COLUMNS} FROM volume_adjustment_plans WHERE id = $1");
        let row = sqlx::query(&query)
            .bind(plan_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to get adjustment plan: {e}")))?;

        row.as_ref().map(row_to_plan).transpose()
    }

    /// Plans for a user, newest first, optionally filtered by status
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed
    pub async fn list_plans(
        &self,
        user_id: Uuid,
        status: Option<PlanStatus>,
    ) -> AppResult<Vec<VolumeAdjustmentPlan>> {
        let query = format!(
            "SELECT {PLAN_COLUMNS} FROM volume_adjustment_plans
             WHERE user_id = $1 AND ($2 IS NULL OR status = $2)
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(status.as_ref().map(PlanStatus::as_str))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list adjustment plans: {e}")))?;

        rows.iter().map(row_to_plan).collect()
    }

    /// Set a plan's status; returns whether a row changed
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails
    pub async fn update_plan_status(
        &self,
        plan_id: Uuid,
        status: PlanStatus,
        now: DateTime<Utc>,
    ) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE volume_adjustment_plans SET status = $1, updated_at = $2 WHERE id = $3",
        )
        .bind(status.as_str())
        .bind(format_timestamp(now))
        .bind(plan_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to update adjustment plan: {e}")))?;

        Ok(result.rows_affected() > 0)
    }
}

fn row_to_plan(row: &SqliteRow) -> AppResult<VolumeAdjustmentPlan> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let muscle_group: String = row.get("muscle_group");
    let start_date: String = row.get("start_date");
    let end_date: String = row.get("end_date");
    let status: String = row.get("status");
    let created_at: String = row.get("created_at");

    Ok(VolumeAdjustmentPlan {
        id: parse_uuid(&id, "volume_adjustment_plans.id")?,
        user_id: parse_uuid(&user_id, "volume_adjustment_plans.user_id")?,
        muscle_group: MuscleGroup::parse(&muscle_group).ok_or_else(|| {
            invalid_column(
                "volume_adjustment_plans.muscle_group",
                &muscle_group,
                &"unknown muscle group",
            )
        })?,
        current_weekly_sets: to_u32(row.get("current_weekly_sets"), "current_weekly_sets")?,
        target_weekly_sets: to_u32(row.get("target_weekly_sets"), "target_weekly_sets")?,
        weekly_increment: to_u32(row.get("weekly_increment"), "weekly_increment")?,
        duration_weeks: to_u32(row.get("duration_weeks"), "duration_weeks")?,
        start_date: parse_date(&start_date, "volume_adjustment_plans.start_date")?,
        end_date: parse_date(&end_date, "volume_adjustment_plans.end_date")?,
        status: PlanStatus::parse(&status).ok_or_else(|| {
            invalid_column("volume_adjustment_plans.status", &status, &"unknown status")
        })?,
        created_at: parse_timestamp(&created_at, "volume_adjustment_plans.created_at")?,
    })
}
