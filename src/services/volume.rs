// ABOUTME: Loads a user's logged sets for a training week and aggregates them into set volume
// ABOUTME: Bridges workout storage and the pure volume aggregator
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use crate::database::repositories::WorkoutRepository;
use adherence_core::errors::{AppError, AppResult};
use adherence_core::models::TrainingWeek;
use adherence_intelligence::{VolumeAggregator, WeeklyVolumeSnapshot};
use tracing::debug;
use uuid::Uuid;

/// Computes weekly volume snapshots from stored workouts
pub struct VolumeLoader {
    workouts: Arc<dyn WorkoutRepository>,
}

impl VolumeLoader {
    /// Loader reading from the given workout store
    #[must_use]
    pub fn new(workouts: Arc<dyn WorkoutRepository>) -> Self {
        Self { workouts }
    }

    /// Effective sets per muscle group for the user's week
    ///
    /// A week without workouts yields an empty snapshot.
    ///
    /// # Errors
    ///
    /// Returns a database error if workouts or sets cannot be read
    pub async fn weekly_volume(
        &self,
        user_id: Uuid,
        week: &TrainingWeek,
    ) -> AppResult<WeeklyVolumeSnapshot> {
        let workouts = self
            .workouts
            .list_workouts(user_id, week)
            .await
            .map_err(|e| AppError::from(e).with_user_id(user_id))?;
        if workouts.is_empty() {
            debug!(user.id = %user_id, "No workouts logged between {} and {}", week.start, week.end);
            return Ok(WeeklyVolumeSnapshot::default());
        }

        let workout_ids: Vec<Uuid> = workouts.iter().map(|w| w.id).collect();
        let sets = self
            .workouts
            .list_sets(&workout_ids)
            .await
            .map_err(|e| AppError::from(e).with_user_id(user_id))?;

        debug!(
            user.id = %user_id,
            workouts = workouts.len(),
            sets = sets.len(),
            "Aggregating weekly volume"
        );
        Ok(VolumeAggregator::aggregate(&sets))
    }
}
