// ABOUTME: Program target models: priority tiers, per-muscle targets, and stored program rows
// ABOUTME: Programs are owned upstream; this subsystem only reads their volume targets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use super::MuscleGroup;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use uuid::Uuid;

/// Per-muscle importance tier; sets the tolerance for flagging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Tightest tolerance
    High,
    /// Default tier
    #[default]
    Medium,
    /// Loosest tolerance
    Low,
}

impl Priority {
    /// Convert to database string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }

    /// Parse from stored or program-supplied text
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "high" => Self::High,
            "low" => Self::Low,
            // Unrecognized emphasis values fall back to the default tier
            _ => Self::Medium,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weekly target for one muscle group in the active program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MuscleGroupTarget {
    /// Prescribed sets per week
    pub target_weekly_sets: u32,
    /// Priority tier
    pub priority: Priority,
}

/// Program row as returned by the program store
///
/// Keys are free text exactly as the program generator wrote them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramRecord {
    /// Program identifier
    pub id: Uuid,
    /// Owning user
    pub user_id: Uuid,
    /// Muscle name to weekly set target
    pub weekly_volume_targets: HashMap<String, i64>,
    /// Muscle name to priority text
    pub body_part_emphasis: HashMap<String, String>,
    /// Creation timestamp; the latest active program wins
    pub created_at: DateTime<Utc>,
}

/// Program targets after normalization into canonical muscle groups
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramTargets {
    /// Program identifier
    pub program_id: Uuid,
    /// Targets keyed by muscle group
    pub targets: BTreeMap<MuscleGroup, MuscleGroupTarget>,
}
