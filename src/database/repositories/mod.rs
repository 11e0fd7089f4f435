// ABOUTME: Repository traits that decouple the weekly check services from SQLite
// ABOUTME: Each trait covers one table family and reports failures as DatabaseError
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Repositories
//!
//! Services hold these traits behind `Arc<dyn ...>` so tests can swap in
//! in-memory fakes or deliberately failing stores.

mod adjustment_plan_repository;
mod flag_repository;
mod program_repository;
mod workout_repository;

pub use adjustment_plan_repository::AdjustmentPlanRepositoryImpl;
pub use flag_repository::FlagRepositoryImpl;
pub use program_repository::ProgramRepositoryImpl;
pub use workout_repository::WorkoutRepositoryImpl;

use crate::database::DatabaseError;
use adherence_core::models::{
    AdherenceFlag, FlagStatus, LoggedSet, PlanStatus, ProgramRecord, TrainingWeek,
    VolumeAdjustmentPlan, WorkoutSummary,
};
use adherence_intelligence::FlagTransitions;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Read access to logged workouts
#[async_trait]
pub trait WorkoutRepository: Send + Sync {
    /// Workouts started inside the week
    async fn list_workouts(
        &self,
        user_id: Uuid,
        week: &TrainingWeek,
    ) -> Result<Vec<WorkoutSummary>, DatabaseError>;

    /// Sets belonging to the given workouts
    async fn list_sets(&self, workout_ids: &[Uuid]) -> Result<Vec<LoggedSet>, DatabaseError>;
}

/// Read access to programs
#[async_trait]
pub trait ProgramRepository: Send + Sync {
    /// Most recently created active program
    async fn get_active_program(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProgramRecord>, DatabaseError>;

    /// Users due for a weekly check
    async fn list_users_with_active_program(&self) -> Result<Vec<Uuid>, DatabaseError>;
}

/// Adherence flag persistence
#[async_trait]
pub trait FlagRepository: Send + Sync {
    /// Monitoring and alerted flags
    async fn list_open_flags(&self, user_id: Uuid) -> Result<Vec<AdherenceFlag>, DatabaseError>;

    /// All flags, optionally filtered by status
    async fn list_flags(
        &self,
        user_id: Uuid,
        status: Option<FlagStatus>,
    ) -> Result<Vec<AdherenceFlag>, DatabaseError>;

    /// Apply one check's transitions atomically; returns created flags
    async fn apply_transitions(
        &self,
        user_id: Uuid,
        transitions: &FlagTransitions,
        now: DateTime<Utc>,
    ) -> Result<Vec<AdherenceFlag>, DatabaseError>;
}

/// Adjustment plan persistence
#[async_trait]
pub trait AdjustmentPlanRepository: Send + Sync {
    /// Store a new plan
    async fn create_plan(&self, plan: &VolumeAdjustmentPlan) -> Result<(), DatabaseError>;

    /// Look up a plan
    async fn get_plan(&self, plan_id: Uuid)
        -> Result<Option<VolumeAdjustmentPlan>, DatabaseError>;

    /// Plans for a user, newest first
    async fn list_plans(
        &self,
        user_id: Uuid,
        status: Option<PlanStatus>,
    ) -> Result<Vec<VolumeAdjustmentPlan>, DatabaseError>;

    /// Change a plan's status; `NotFound` when no such plan exists
    async fn update_plan_status(
        &self,
        plan_id: Uuid,
        status: PlanStatus,
        now: DateTime<Utc>,
    ) -> Result<(), DatabaseError>;
}
