// ABOUTME: Database operations for training programs and their weekly volume targets
// ABOUTME: Resolves a user's most recent active program and lists users due for a weekly check
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{format_timestamp, invalid_column, parse_timestamp, parse_uuid, Database};
use adherence_core::errors::{AppError, AppResult};
use adherence_core::models::ProgramRecord;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use std::collections::HashMap;
use tracing::warn;
use uuid::Uuid;

const ACTIVE: &str = "active";
const ARCHIVED: &str = "archived";

impl Database {
    pub(super) async fn migrate_programs(&self) -> AppResult<()> {
        self.execute_schema(&[
            r"
            CREATE TABLE IF NOT EXISTS programs (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'active',
                weekly_volume_targets TEXT NOT NULL DEFAULT '{}',
                body_part_emphasis TEXT NOT NULL DEFAULT '{}',
                created_at TEXT NOT NULL
            )
            ",
            "CREATE INDEX IF NOT EXISTS idx_programs_user_status ON programs(user_id, status, created_at)",
        ])
        .await
    }
}

/// Program database operations
pub struct ProgramManager {
    pool: SqlitePool,
}

impl ProgramManager {
    /// Create a new program manager
    #[must_use]
    pub const fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Store an active program
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails
    pub async fn create_program(
        &self,
        user_id: Uuid,
        weekly_volume_targets: HashMap<String, i64>,
        body_part_emphasis: HashMap<String, String>,
        created_at: DateTime<Utc>,
    ) -> AppResult<ProgramRecord> {
        let id = Uuid::new_v4();
        sqlx::query(
            r"
            INSERT INTO programs (id, user_id, status, weekly_volume_targets, body_part_emphasis, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(ACTIVE)
        .bind(serde_json::to_string(&weekly_volume_targets)?)
        .bind(serde_json::to_string(&body_part_emphasis)?)
        .bind(format_timestamp(created_at))
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to create program: {e}")))?;

        Ok(ProgramRecord {
            id,
            user_id,
            weekly_volume_targets,
            body_part_emphasis,
            created_at,
        })
    }

    /// Take a program out of rotation
    ///
    /// # Errors
    ///
    /// Returns `ResourceNotFound` if no such program exists
    pub async fn archive_program(&self, program_id: Uuid) -> AppResult<()> {
        let result = sqlx::query("UPDATE programs SET status = $1 WHERE id = $2")
            .bind(ARCHIVED)
            .bind(program_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::database(format!("Failed to archive program: {e}")))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Program {program_id}")));
        }
        Ok(())
    }

    /// Most recently created active program for the user
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored targets are unreadable
    pub async fn get_active_program(&self, user_id: Uuid) -> AppResult<Option<ProgramRecord>> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, weekly_volume_targets, body_part_emphasis, created_at
            FROM programs
            WHERE user_id = $1 AND status = $2
            ORDER BY created_at DESC
            LIMIT 1
            ",
        )
        .bind(user_id.to_string())
        .bind(ACTIVE)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to get active program: {e}")))?;

        row.as_ref().map(row_to_program).transpose()
    }

    /// Every user with at least one active program, in id order
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails
    pub async fn list_users_with_active_program(&self) -> AppResult<Vec<Uuid>> {
        let rows = sqlx::query(
            "SELECT DISTINCT user_id FROM programs WHERE status = $1 ORDER BY user_id",
        )
        .bind(ACTIVE)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::database(format!("Failed to list program users: {e}")))?;

        rows.iter()
            .map(|row| parse_uuid(&row.get::<String, _>("user_id"), "programs.user_id"))
            .collect()
    }
}

fn row_to_program(row: &SqliteRow) -> AppResult<ProgramRecord> {
    let id: String = row.get("id");
    let user_id: String = row.get("user_id");
    let targets: String = row.get("weekly_volume_targets");
    let emphasis: String = row.get("body_part_emphasis");
    let created_at: String = row.get("created_at");

    Ok(ProgramRecord {
        id: parse_uuid(&id, "programs.id")?,
        user_id: parse_uuid(&user_id, "programs.user_id")?,
        weekly_volume_targets: decode_targets(&targets)?,
        body_part_emphasis: decode_emphasis(&emphasis)?,
        created_at: parse_timestamp(&created_at, "programs.created_at")?,
    })
}

/// Whole-number targets; fractional values round half to even, non-numeric entries are dropped
fn decode_targets(raw: &str) -> AppResult<HashMap<String, i64>> {
    let entries: HashMap<String, Value> = serde_json::from_str(raw)
        .map_err(|e| invalid_column("programs.weekly_volume_targets", raw, &e))?;

    Ok(entries
        .into_iter()
        .filter_map(|(muscle, value)| {
            let sets = value
                .as_i64()
                .or_else(|| value.as_f64().map(|v| v.round_ties_even() as i64));
            if sets.is_none() {
                warn!("Ignoring non-numeric volume target {muscle} = {value}");
            }
            sets.map(|sets| (muscle, sets))
        })
        .collect())
}

fn decode_emphasis(raw: &str) -> AppResult<HashMap<String, String>> {
    let entries: HashMap<String, Value> = serde_json::from_str(raw)
        .map_err(|e| invalid_column("programs.body_part_emphasis", raw, &e))?;

    Ok(entries
        .into_iter()
        .filter_map(|(muscle, value)| value.as_str().map(|p| (muscle, p.to_owned())))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_targets_tolerates_fractional_and_junk_values() {
        let targets = decode_targets(r#"{"chest": 12, "back": 10.6, "calves": "lots"}"#).unwrap();
        assert_eq!(targets.get("chest"), Some(&12));
        assert_eq!(targets.get("back"), Some(&11));
        assert!(!targets.contains_key("calves"));
    }

    #[test]
    fn test_decode_targets_rejects_non_object() {
        assert!(decode_targets("[1, 2, 3]").is_err());
    }

    #[test]
    fn test_decode_emphasis_keeps_strings_only() {
        let emphasis = decode_emphasis(r#"{"chest": "high", "back": 3}"#).unwrap();
        assert_eq!(emphasis.get("chest").map(String::as_str), Some("high"));
        assert!(!emphasis.contains_key("back"));
    }
}
