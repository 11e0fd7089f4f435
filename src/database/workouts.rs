// ABOUTME: Database operations for exercises, logged workouts, and their sets
// ABOUTME: Reads a user's workouts inside a training week and joins sets with exercise muscle metadata
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{format_timestamp, parse_timestamp, parse_uuid, Database};
use adherence_core::errors::{AppError, AppResult};
use adherence_core::models::{LoggedSet, TrainingWeek, WorkoutSummary};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, QueryBuilder, Row, Sqlite, SqlitePool};
use tracing::warn;
use uuid::Uuid;

impl Database {
    pub(super) async fn migrate_workouts(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS exercises (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                primary_muscles TEXT NOT NULL DEFAULT '[]',
                secondary_muscles TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS workouts (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                start_time TEXT NOT NULL,
                created_at TEXT NOT NULL
            )
            ",
            r"
            CREATE TABLE IF NOT EXISTS workout_sets (
                id TEXT PRIMARY KEY,
                workout_id TEXT NOT NULL REFERENCES workouts(id) ON DELETE CASCADE,
                exercise_id TEXT REFERENCES exercises(id) ON DELETE SET NULL,
                reps INTEGER,
                weight REAL,
                created_at TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_workouts_user_start ON workouts(user_id, start_time)",
            "CREATE INDEX IF NOT EXISTS idx_workout_sets_workout ON workout_sets(workout_id)",
        ])
        .await
    }
}

/// Workout and set database operations
pub struct WorkoutManager {
    pool: SqlitePool,
}

impl WorkoutManager {
    /// Create a new workout manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Register an exercise with its muscle metadata
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_exercise(
        &self,
        name: &str,
        primary_muscles: &[&str],
        secondary_muscles: &[&str],
    ) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r"
            INSERT INTO exercises (id, name, primary_muscles, secondary_muscles, created_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(id.to_string())
        .bind(name)
        .bind(serde_json::to_string(primary_muscles)?)
        .bind(serde_json::to_string(secondary_muscles)?)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create exercise: {e}")))?;

        Ok(id)
    }

    /// Record a workout session
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_workout(&self, user_id: Uuid, start_time: DateTime<Utc>) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r"
            INSERT INTO workouts (id, user_id, start_time, created_at)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(format_timestamp(start_time))
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create workout: {e}")))?;

        Ok(id)
    }

    /// Record one completed set
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails or the workout does not exist
    pub async fn log_set(
        &self,
        workout_id: Uuid,
        exercise_id: Uuid,
        reps: Option<u32>,
        weight: Option<f64>,
    ) -> AppResult<Uuid> {
        let id = Uuid::new_v4();
        sqlx::query(
            r"
            INSERT INTO workout_sets (id, workout_id, exercise_id, reps, weight, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(id.to_string())
        .bind(workout_id.to_string())
        .bind(exercise_id.to_string())
        .bind(reps.map(i64::from))
        .bind(weight)
        .bind(format_timestamp(Utc::now()))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to log set: {e}")))?;

        Ok(id)
    }

    /// Workouts whose start time falls in `[week start, day after week end)`
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed
    pub async fn list_workouts(
        &self,
        user_id: Uuid,
        week: &TrainingWeek,
    ) -> AppResult<Vec<WorkoutSummary>> {
        let rows = sqlx::query(
            r"
            SELECT id, start_time FROM workouts
            WHERE user_id = $1 AND start_time >= $2 AND start_time < $3
            ORDER BY start_time
            ",
        )
        .bind(user_id.to_string())
        .bind(format_timestamp(week.starts_at()))
        .bind(format_timestamp(week.ends_before()))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list workouts: {e}")))?;

        rows.iter()
            .map(|row| {
                let id: String = row.get("id");
                let start_time: String = row.get("start_time");
                Ok(WorkoutSummary {
                    id: parse_uuid(&id, "workouts.id")?,
                    start_time: parse_timestamp(&start_time, "workouts.start_time")?,
                })
            })
            .collect()
    }

    /// Sets of the given workouts with their exercise's muscle lists
    ///
    /// A set whose exercise is gone, or whose muscle metadata cannot be read,
    /// comes back with empty muscle lists.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_sets(&self, workout_ids: &[Uuid]) -> AppResult<Vec<LoggedSet>> {
        if workout_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder = QueryBuilder::<Sqlite>::new(
            r"
            SELECT ws.reps, ws.weight, e.primary_muscles, e.secondary_muscles
            FROM workout_sets ws
            LEFT JOIN exercises e ON e.id = ws.exercise_id
            WHERE ws.workout_id IN (",
        );
        let mut separated = builder.separated(", ");
        for id in workout_ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list sets: {e}")))?;

        Ok(rows.iter().map(row_to_set).collect())
    }
}

fn row_to_set(row: &SqliteRow) -> LoggedSet {
    let reps: Option<i64> = row.get("reps");
    LoggedSet {
        reps: reps.and_then(|r| u32::try_from(r).ok()),
        weight: row.get("weight"),
        primary_muscles: muscle_list(row.get("primary_muscles")),
        secondary_muscles: muscle_list(row.get("secondary_muscles")),
    }
}

fn muscle_list(raw: Option<String>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    serde_json::from_str(&raw).unwrap_or_else(|e| {
        warn!("Ignoring unreadable exercise muscle list '{raw}': {e}");
        Vec::new()
    })
}
