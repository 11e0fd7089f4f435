// ABOUTME: Logged workout and set records consumed by volume aggregation
// ABOUTME: Muscle lists stay as raw exercise metadata until the aggregator normalizes them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workout header as returned by the workout store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkoutSummary {
    /// Workout identifier
    pub id: Uuid,
    /// When the session started
    pub start_time: DateTime<Utc>,
}

/// One performed set joined with its exercise's muscle mapping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoggedSet {
    /// Repetitions performed
    pub reps: Option<u32>,
    /// Load used
    pub weight: Option<f64>,
    /// Exercise's primary muscles (free text)
    pub primary_muscles: Vec<String>,
    /// Exercise's secondary muscles (free text)
    pub secondary_muscles: Vec<String>,
}

impl LoggedSet {
    /// Convenience constructor for a set with only muscle metadata
    #[must_use]
    pub fn for_muscles(primary: &[&str], secondary: &[&str]) -> Self {
        Self {
            reps: None,
            weight: None,
            primary_muscles: primary.iter().map(|m| (*m).to_owned()).collect(),
            secondary_muscles: secondary.iter().map(|m| (*m).to_owned()).collect(),
        }
    }
}
