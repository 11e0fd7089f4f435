// ABOUTME: Main library entry point for the training adherence monitor
// ABOUTME: Exposes configuration, storage, and the weekly adherence check services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Training Adherence Monitor
//!
//! Compares what a lifter actually trained in a week against the per-muscle
//! weekly set targets of their active program.
//!
//! ## Features
//!
//! - **Weekly volume**: effective sets per muscle group from logged workouts
//! - **Adherence flags**: priority-aware thresholds with a silent first week
//!   and a one-time escalation to `alerted`
//! - **Imbalance risks**: quad:hamstring and push:pull ratio checks
//! - **Adjustment plans**: gradual multi-week volume ramps
//!
//! ## Architecture
//!
//! - **`adherence-core`**: errors, constants, and domain models
//! - **`adherence-intelligence`**: pure aggregation, evaluation, and planning
//! - **Database**: `SQLite` managers behind repository traits
//! - **Services**: the weekly check pipeline and batch runner
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use training_adherence::config::MonitorConfig;
//! use training_adherence::database::Database;
//! use training_adherence::errors::AppResult;
//! use training_adherence::services::WeeklyCheckOrchestrator;
//! use uuid::Uuid;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = MonitorConfig::from_env()?;
//!     let db = Database::connect(&config.database.url, config.database.max_connections).await?;
//!     let orchestrator = WeeklyCheckOrchestrator::from_database(&db, &config.check);
//!
//!     let outcome = orchestrator.run_weekly_check(Uuid::new_v4()).await?;
//!     println!("{}", serde_json::to_string_pretty(&outcome)?);
//!     Ok(())
//! }
//! ```

/// Environment-driven configuration
pub mod config;

/// `SQLite` storage and repository traits
pub mod database;

/// Error types re-exported from `adherence-core`
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Domain models re-exported from `adherence-core`
pub mod models;

/// Weekly check, batch, and adjustment plan services
pub mod services;
