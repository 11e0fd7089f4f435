// ABOUTME: Database operations for adherence flags keyed by user and muscle group
// ABOUTME: Applies one check's create/update/resolve transitions atomically in a single transaction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{
    format_timestamp, invalid_column, parse_date, parse_optional_timestamp, parse_timestamp,
    parse_uuid, to_u32, Database,
};
use adherence_core::errors::{AppError, AppResult};
use adherence_core::models::{AdherenceFlag, FlagStatus, MuscleGroup, Priority};
use adherence_intelligence::FlagTransitions;
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use uuid::Uuid;

const FLAG_COLUMNS: &str = r"
    id, user_id, muscle_group, priority, target_weekly_sets, actual_weekly_sets,
    variance_percentage, flagged_date, status, alerted_at, resolved_at, created_at, updated_at
";

impl Database {
    pub(super) async fn migrate_flags(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS adherence_flags (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                muscle_group TEXT NOT NULL,
                priority TEXT NOT NULL,
                target_weekly_sets INTEGER NOT NULL,
                actual_weekly_sets INTEGER NOT NULL,
                variance_percentage REAL NOT NULL,
                flagged_date TEXT NOT NULL,
                status TEXT NOT NULL CHECK (status IN ('monitoring', 'alerted', 'resolved')),
                alerted_at TEXT,
                resolved_at TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            )
            ",
            // At most one open flag per user and muscle group
            r"
            CREATE UNIQUE INDEX IF NOT EXISTS idx_adherence_flags_open
            ON adherence_flags(user_id, muscle_group) WHERE status != 'resolved'
            ",
            "CREATE INDEX IF NOT EXISTS idx_adherence_flags_user_status ON adherence_flags(user_id, status)",
        ])
        .await
    }
}

/// Adherence flag database operations
pub struct AdherenceFlagManager {
    pool: SqlitePool,
}

impl AdherenceFlagManager {
    /// Create a new flag manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Flags for a user, optionally filtered by status, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed
    pub async fn list_flags(
        &self,
        user_id: Uuid,
        status: Option<FlagStatus>,
    ) -> AppResult<Vec<AdherenceFlag>> {
        let query = format!(
            "SELECT {FLAG_COLUMNS} FROM adherence_flags
             WHERE user_id = $1 AND ($2 IS NULL OR status = $2)
             ORDER BY flagged_date, created_at"
        );
        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .bind(status.as_ref().map(FlagStatus::as_str))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list flags: {e}")))?;

        rows.iter().map(row_to_flag).collect()
    }

    /// Monitoring and alerted flags for a user, oldest first
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored row is malformed
    pub async fn list_open_flags(&self, user_id: Uuid) -> AppResult<Vec<AdherenceFlag>> {
        let query = format!(
            "SELECT {FLAG_COLUMNS} FROM adherence_flags
             WHERE user_id = $1 AND status != 'resolved'
             ORDER BY flagged_date, created_at"
        );
        let rows = sqlx::query(&query)
            .bind(user_id.to_string())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to list open flags: {e}")))?;

        rows.iter().map(row_to_flag).collect()
    }

    /// Apply every transition of one check, all or nothing
    ///
    /// Resolutions run first so a duplicate being closed never collides with
    /// the open-flag uniqueness index. Returns the newly created flags.
    ///
    /// # Errors
    ///
    /// Returns an error if any statement fails; nothing is written in that case
    pub async fn apply_transitions(
        &self,
        user_id: Uuid,
        transitions: &FlagTransitions,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<AdherenceFlag>> {
        let stamp = format_timestamp(now);
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| AppError::database(format!("Failed to begin flag transaction: {e}")))?;

        for resolution in &transitions.to_resolve {
            sqlx::query(
                r"
                UPDATE adherence_flags
                SET status = 'resolved', resolved_at = $1, updated_at = $2
                WHERE id = $3 AND user_id = $4 AND status != 'resolved'
                ",
            )
            .bind(format_timestamp(resolution.resolved_at))
            .bind(&stamp)
            .bind(resolution.flag_id.to_string())
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to resolve flag: {e}")))?;
        }

        for update in &transitions.to_update {
            sqlx::query(
                r"
                UPDATE adherence_flags
                SET priority = $1, target_weekly_sets = $2, actual_weekly_sets = $3,
                    variance_percentage = $4, status = $5, alerted_at = $6, updated_at = $7
                WHERE id = $8 AND user_id = $9
                ",
            )
            .bind(update.priority.as_str())
            .bind(i64::from(update.target_weekly_sets))
            .bind(i64::from(update.actual_weekly_sets))
            .bind(update.variance_percentage)
            .bind(update.status.as_str())
            .bind(update.alerted_at.map(format_timestamp))
            .bind(&stamp)
            .bind(update.flag_id.to_string())
            .bind(user_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to update flag: {e}")))?;
        }

        let mut created = Vec::with_capacity(transitions.to_create.len());
        for new_flag in &transitions.to_create {
            let flag = AdherenceFlag {
                id: Uuid::new_v4(),
                user_id,
                muscle_group: new_flag.muscle_group,
                priority: new_flag.priority,
                target_weekly_sets: new_flag.target_weekly_sets,
                actual_weekly_sets: new_flag.actual_weekly_sets,
                variance_percentage: new_flag.variance_percentage,
                flagged_date: new_flag.flagged_date,
                status: FlagStatus::Monitoring,
                alerted_at: None,
                resolved_at: None,
                created_at: now,
                updated_at: now,
            };

            sqlx::query(
                r"
                INSERT INTO adherence_flags (
                    id, user_id, muscle_group, priority, target_weekly_sets, actual_weekly_sets,
                    variance_percentage, flagged_date, status, alerted_at, resolved_at,
                    created_at, updated_at
                ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, NULL, NULL, $10, $10)
                ",
            )
            .bind(flag.id.to_string())
            .bind(user_id.to_string())
            .bind(flag.muscle_group.as_str())
            .bind(flag.priority.as_str())
            .bind(i64::from(flag.target_weekly_sets))
            .bind(i64::from(flag.actual_weekly_sets))
            .bind(flag.variance_percentage)
            .bind(flag.flagged_date.format("%Y-%m-%d").to_string())
            .bind(flag.status.as_str())
            .bind(&stamp)
            .execute(&mut *tx)
            .await
            .map_err(|e| AppError::database(format!("Failed to create flag: {e}")))?;

            created.push(flag);
        }

        tx.commit()
            .await
            .map_err(|e| AppError::database(format!("Failed to commit flag transaction: {e}")))?;

        Ok(created)
    }
}

fn row_to_flag(row: &SqliteRow) -> AppResult<AdherenceFlag> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let muscle_group: String = row.get("muscle_group");
    let priority: String = row.get("priority");
    let flagged_date: String = row.get("flagged_date");
    let status: String = row.get("status");
    let created_at: String = row.get("created_at");
    let updated_at: String = row.get("updated_at");

    Ok(AdherenceFlag {
        id: parse_uuid(&id, "adherence_flags.id")?,
        user_id: parse_uuid(&user_id, "adherence_flags.user_id")?,
        muscle_group: MuscleGroup::parse(&muscle_group).ok_or_else(|| {
            invalid_column("adherence_flags.muscle_group", &muscle_group, &"unknown muscle group")
        })?,
        priority: Priority::parse(&priority),
        target_weekly_sets: to_u32(row.get("target_weekly_sets"), "adherence_flags.target_weekly_sets")?,
        actual_weekly_sets: to_u32(row.get("actual_weekly_sets"), "adherence_flags.actual_weekly_sets")?,
        variance_percentage: row.get("variance_percentage"),
        flagged_date: parse_date(&flagged_date, "adherence_flags.flagged_date")?,
        status: FlagStatus::parse(&status)
            .ok_or_else(|| invalid_column("adherence_flags.status", &status, &"unknown status"))?,
        alerted_at: parse_optional_timestamp(row.get("alerted_at"), "adherence_flags.alerted_at")?,
        resolved_at: parse_optional_timestamp(row.get("resolved_at"), "adherence_flags.resolved_at")?,
        created_at: parse_timestamp(&created_at, "adherence_flags.created_at")?,
        updated_at: parse_timestamp(&updated_at, "adherence_flags.updated_at")?,
    })
}
