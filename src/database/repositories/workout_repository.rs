// ABOUTME: Workout repository implementation backed by the SQLite workout manager
// ABOUTME: Implements WorkoutRepository by delegating to Database workout operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use uuid::Uuid;

use super::WorkoutRepository;
use crate::database::{Database, DatabaseError};
use adherence_core::models::{LoggedSet, TrainingWeek, WorkoutSummary};

/// `SQLite` implementation of `WorkoutRepository`
pub struct WorkoutRepositoryImpl {
    db: Database,
}

impl WorkoutRepositoryImpl {
    /// Create a new `WorkoutRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl WorkoutRepository for WorkoutRepositoryImpl {
    async fn list_workouts(
        &self,
        user_id: Uuid,
        week: &TrainingWeek,
    ) -> Result<Vec<WorkoutSummary>, DatabaseError> {
        self.db
            .workouts()
            .list_workouts(user_id, week)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn list_sets(&self, workout_ids: &[Uuid]) -> Result<Vec<LoggedSet>, DatabaseError> {
        self.db
            .workouts()
            .list_sets(workout_ids)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }
}
