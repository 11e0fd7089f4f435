// ABOUTME: Adherence flag entity and its monitoring/alerted/resolved status
// ABOUTME: At most one non-resolved flag exists per user and muscle group
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::{MuscleGroup, Priority};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Lifecycle state of an adherence flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlagStatus {
    /// Shortfall observed, not yet surfaced to the user
    Monitoring,
    /// Sustained shortfall, user notified once
    Alerted,
    /// Muscle group back within tolerance (terminal)
    Resolved,
}

impl FlagStatus {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Monitoring => "monitoring",
            Self::Alerted => "alerted",
            Self::Resolved => "resolved",
        }
    }

    /// Parse from database string representation
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "monitoring" => Some(Self::Monitoring),
            "alerted" => Some(Self::Alerted),
            "resolved" => Some(Self::Resolved),
            _ => None,
        }
    }

    /// Whether the flag still participates in lifecycle evaluation
    #[must_use]
    pub const fn is_open(&self) -> bool {
        !matches!(self, Self::Resolved)
    }
}

impl fmt::Display for FlagStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Persistent under-target flag for one (user, muscle group)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdherenceFlag {
    /// Flag identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Muscle group under target
    pub muscle_group: MuscleGroup,
    /// Priority tier at the time of the latest evaluation
    pub priority: Priority,
    /// Program target
    pub target_weekly_sets: u32,
    /// Latest measured volume
    pub actual_weekly_sets: u32,
    /// Signed deviation from target; negative means under target
    pub variance_percentage: f64,
    /// Day the shortfall was first observed
    pub flagged_date: NaiveDate,
    /// Current lifecycle state
    pub status: FlagStatus,
    /// When the user was alerted
    pub alerted_at: Option<DateTime<Utc>>,
    /// When the shortfall cleared
    pub resolved_at: Option<DateTime<Utc>>,
    /// Creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last refresh timestamp
    pub updated_at: DateTime<Utc>,
}

impl AdherenceFlag {
    /// Calendar days between the first observation and `today`
    #[must_use]
    pub fn days_flagged(&self, today: NaiveDate) -> i64 {
        (today - self.flagged_date).num_days()
    }
}
