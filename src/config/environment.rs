// ABOUTME: Environment-based configuration for database access, adherence thresholds, and batch limits
// ABOUTME: Parses and validates every setting up front so invalid values fail before any check runs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use adherence_core::constants::defaults;
use adherence_core::constants::thresholds;
use adherence_core::errors::{AppError, AppResult};
use adherence_intelligence::AdherenceThresholds;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;
use tracing::info;

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Scheduled production runs
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Database connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// `SQLite` connection URL
    pub url: String,
    /// Pool size for file-backed databases
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: defaults::DATABASE_URL.to_owned(),
            max_connections: defaults::DATABASE_MAX_CONNECTIONS,
        }
    }
}

impl DatabaseConfig {
    /// Check if this is an in-memory database
    #[must_use]
    pub fn is_memory(&self) -> bool {
        self.url.contains(":memory:")
    }
}

/// Settings consumed by the weekly check services
#[derive(Debug, Clone, PartialEq)]
pub struct CheckSettings {
    /// Variance thresholds per priority tier
    pub thresholds: AdherenceThresholds,
    /// Days a flag stays in monitoring before alerting
    pub alert_after_days: i64,
    /// Users checked in parallel by the batch runner
    pub concurrency: usize,
    /// Time budget for a single user's check
    pub user_timeout: Duration,
}

impl Default for CheckSettings {
    fn default() -> Self {
        Self {
            thresholds: AdherenceThresholds::default(),
            alert_after_days: defaults::ALERT_AFTER_DAYS,
            concurrency: defaults::WEEKLY_CHECK_CONCURRENCY,
            user_timeout: Duration::from_secs(defaults::WEEKLY_CHECK_USER_TIMEOUT_SECS),
        }
    }
}

impl CheckSettings {
    /// Validate threshold ordering and batch limits
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` naming the offending setting
    pub fn validate(&self) -> AppResult<()> {
        self.thresholds.validate()?;
        if self.alert_after_days < 0 {
            return Err(AppError::config(format!(
                "ADHERENCE_ALERT_AFTER_DAYS must not be negative (got {})",
                self.alert_after_days
            )));
        }
        if self.concurrency == 0 {
            return Err(AppError::config(
                "WEEKLY_CHECK_CONCURRENCY must be at least 1",
            ));
        }
        if self.user_timeout.is_zero() {
            return Err(AppError::config(
                "WEEKLY_CHECK_USER_TIMEOUT_SECS must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Complete monitor configuration
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    /// Deployment environment
    pub environment: Environment,
    /// Database settings
    pub database: DatabaseConfig,
    /// Weekly check settings
    pub check: CheckSettings,
}

impl MonitorConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` when a variable cannot be parsed or the
    /// resulting settings fail validation
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        let config = Self {
            environment: Environment::from_str_or_default(&env_var_or(
                "ENVIRONMENT",
                "development",
            )),
            database: DatabaseConfig {
                url: env_var_or("DATABASE_URL", defaults::DATABASE_URL),
                max_connections: parse_env(
                    "DATABASE_MAX_CONNECTIONS",
                    defaults::DATABASE_MAX_CONNECTIONS,
                )?,
            },
            check: CheckSettings {
                thresholds: AdherenceThresholds {
                    high: parse_env(
                        "ADHERENCE_THRESHOLD_HIGH",
                        thresholds::HIGH_PRIORITY_VARIANCE_PERCENT,
                    )?,
                    medium: parse_env(
                        "ADHERENCE_THRESHOLD_MEDIUM",
                        thresholds::MEDIUM_PRIORITY_VARIANCE_PERCENT,
                    )?,
                    low: parse_env(
                        "ADHERENCE_THRESHOLD_LOW",
                        thresholds::LOW_PRIORITY_VARIANCE_PERCENT,
                    )?,
                },
                alert_after_days: parse_env("ADHERENCE_ALERT_AFTER_DAYS", defaults::ALERT_AFTER_DAYS)?,
                concurrency: parse_env(
                    "WEEKLY_CHECK_CONCURRENCY",
                    defaults::WEEKLY_CHECK_CONCURRENCY,
                )?,
                user_timeout: Duration::from_secs(parse_env(
                    "WEEKLY_CHECK_USER_TIMEOUT_SECS",
                    defaults::WEEKLY_CHECK_USER_TIMEOUT_SECS,
                )?),
            },
        };

        config.validate()?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `ConfigInvalid` naming the offending setting
    pub fn validate(&self) -> AppResult<()> {
        if self.database.url.trim().is_empty() {
            return Err(AppError::config("DATABASE_URL must not be empty"));
        }
        if self.database.max_connections == 0 {
            return Err(AppError::config(
                "DATABASE_MAX_CONNECTIONS must be at least 1",
            ));
        }
        self.check.validate()
    }

    /// Get a summary of the configuration for logging
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "Adherence Monitor Configuration:\n\
             - Environment: {}\n\
             - Database: {}\n\
             - Thresholds (high/medium/low): {}/{}/{}\n\
             - Alert After Days: {}\n\
             - Batch Concurrency: {}\n\
             - Per-User Timeout: {}s",
            self.environment,
            self.database.url,
            self.check.thresholds.high,
            self.check.thresholds.medium,
            self.check.thresholds.low,
            self.check.alert_after_days,
            self.check.concurrency,
            self.check.user_timeout.as_secs(),
        )
    }
}

fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_env<T>(key: &str, default: T) -> AppResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::config(format!("Invalid {key} value '{raw}': {e}"))),
        Err(_) => Ok(default),
    }
}
