// ABOUTME: SQLite connection pool, schema setup, and shared column codecs
// ABOUTME: Hands out per-table managers for workouts, programs, adherence flags, and plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Database Management
//!
//! Timestamps are stored as fixed-width RFC 3339 text (microseconds, `Z`
//! suffix) so that lexical comparison in SQL matches chronological order.
//! Identifiers are UUID text; muscle lists and target maps are JSON text.

/// Database error types
pub mod errors;
/// Adherence flag storage
pub mod flags;
/// Volume adjustment plan storage
pub mod plans;
/// Program storage
pub mod programs;
/// Repository traits consumed by the services
pub mod repositories;
/// Workout and set storage
pub mod workouts;

pub use errors::DatabaseError;
pub use flags::AdherenceFlagManager;
pub use plans::AdjustmentPlanManager;
pub use programs::ProgramManager;
pub use workouts::WorkoutManager;

use adherence_core::errors::{AppError, AppResult};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::{debug, info};
use uuid::Uuid;

/// Database handle shared by every manager
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect and apply the schema
    ///
    /// In-memory databases are pinned to a single long-lived connection so
    /// every query sees the same database.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid, the connection fails, or the
    /// schema cannot be created
    pub async fn connect(database_url: &str, max_connections: u32) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| AppError::config(format!("Invalid DATABASE_URL '{database_url}': {e}")))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if database_url.contains(":memory:") {
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(max_connections.max(1))
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(|e| AppError::database(format!("Failed to connect to database: {e}")))?;

        let db = Self { pool };
        db.migrate().await?;
        info!("Database ready at {database_url}");
        Ok(db)
    }

    /// Get a reference to the database pool for advanced operations
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create every table and index if missing
    ///
    /// # Errors
    ///
    /// Returns an error if any schema statement fails
    pub async fn migrate(&self) -> AppResult<()> {
        self.migrate_programs().await?;
        self.migrate_workouts().await?;
        self.migrate_flags().await?;
        self.migrate_plans().await?;
        debug!("Database schema up to date");
        Ok(())
    }

    /// Workout and set manager
    #[must_use]
    pub fn workouts(&self) -> WorkoutManager {
        WorkoutManager::new(self.pool.clone())
    }

    /// Program manager
    #[must_use]
    pub fn programs(&self) -> ProgramManager {
        ProgramManager::new(self.pool.clone())
    }

    /// Adherence flag manager
    #[must_use]
    pub fn flags(&self) -> AdherenceFlagManager {
        AdherenceFlagManager::new(self.pool.clone())
    }

    /// Adjustment plan manager
    #[must_use]
    pub fn plans(&self) -> AdjustmentPlanManager {
        AdjustmentPlanManager::new(self.pool.clone())
    }

    pub(crate) async fn execute_schema(&self, statements: &[&str]) -> AppResult<()> {
        for statement in statements {
            sqlx::query(statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::from(DatabaseError::MigrationError {
                        context: e.to_string(),
                    })
                })?;
        }
        Ok(())
    }
}

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str, column: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|at| at.with_timezone(&Utc))
        .map_err(|e| invalid_column(column, raw, &e))
}

pub(crate) fn parse_optional_timestamp(
    raw: Option<String>,
    column: &str,
) -> AppResult<Option<DateTime<Utc>>> {
    raw.map(|value| parse_timestamp(&value, column)).transpose()
}

pub(crate) fn parse_date(raw: &str, column: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| invalid_column(column, raw, &e))
}

pub(crate) fn parse_uuid(raw: &str, column: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw).map_err(|e| invalid_column(column, raw, &e))
}

pub(crate) fn to_u32(value: i64, column: &str) -> AppResult<u32> {
    u32::try_from(value).map_err(|e| invalid_column(column, &value.to_string(), &e))
}

pub(crate) fn invalid_column(column: &str, raw: &str, error: &dyn std::fmt::Display) -> AppError {
    DatabaseError::InvalidData {
        context: format!("{column} = '{raw}': {error}"),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamps_are_fixed_width_and_ordered() {
        let whole = Utc.with_ymd_and_hms(2025, 3, 10, 6, 0, 0).unwrap();
        let later = whole + chrono::Duration::milliseconds(250);

        let a = format_timestamp(whole);
        let b = format_timestamp(later);
        assert_eq!(a, "2025-03-10T06:00:00.000000Z");
        assert_eq!(a.len(), b.len());
        assert!(a < b);
        assert_eq!(parse_timestamp(&b, "created_at").unwrap(), later);
    }

    #[test]
    fn test_negative_count_is_invalid_data() {
        let error = to_u32(-3, "target_weekly_sets").unwrap_err();
        assert!(error.message.contains("target_weekly_sets"));
    }
}
