// ABOUTME: Domain service layer wiring repositories to the adherence intelligence
// ABOUTME: Provides the weekly check, batch runner, target resolution, and adjustment plan services
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Services depend on repository traits rather than `SQLite` directly, so the
//! same logic runs against the database, in-memory fakes, or failing stores.

/// User-initiated volume adjustment plans
pub mod adjustment_plans;

/// Multi-user weekly check execution
pub mod batch;

/// Program target resolution
pub mod target_resolver;

/// Weekly volume loading
pub mod volume;

/// Single-user weekly check orchestration
pub mod weekly_check;

pub use adjustment_plans::AdjustmentPlanService;
pub use batch::{BatchSummary, UserCheckFailure, WeeklyCheckRunner};
pub use target_resolver::TargetResolver;
pub use volume::VolumeLoader;
pub use weekly_check::{WeeklyCheckOrchestrator, WeeklyCheckOutcome, WeeklyCheckReport};
