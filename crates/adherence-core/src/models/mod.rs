// ABOUTME: Core domain models for adherence and load imbalance monitoring
// ABOUTME: Re-exports muscle groups, program targets, workouts, flags, plans, and weeks
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

mod flag;
mod muscle_group;
mod plan;
mod program;
mod week;
mod workout;

pub use flag::{AdherenceFlag, FlagStatus};
pub use muscle_group::MuscleGroup;
pub use plan::{PlanStatus, VolumeAdjustmentPlan};
pub use program::{MuscleGroupTarget, Priority, ProgramRecord, ProgramTargets};
pub use week::TrainingWeek;
pub use workout::{LoggedSet, WorkoutSummary};
