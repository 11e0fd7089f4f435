// ABOUTME: Weekly volume aggregation from logged sets into per-muscle set counts
// ABOUTME: Primary muscles earn a full set, secondary muscles half a set
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use adherence_core::constants::volume::{PRIMARY_MUSCLE_WEIGHT, SECONDARY_MUSCLE_WEIGHT};
use adherence_core::models::{LoggedSet, MuscleGroup};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Per-muscle weekly set counts
///
/// A muscle absent from the map has zero volume.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeeklyVolumeSnapshot {
    volumes: BTreeMap<MuscleGroup, u32>,
}

impl WeeklyVolumeSnapshot {
    /// Build a snapshot from explicit counts
    #[must_use]
    pub fn from_counts(counts: impl IntoIterator<Item = (MuscleGroup, u32)>) -> Self {
        let mut volumes = BTreeMap::new();
        for (group, sets) in counts {
            *volumes.entry(group).or_insert(0) += sets;
        }
        Self { volumes }
    }

    /// Sets for one muscle group (zero when absent)
    #[must_use]
    pub fn get(&self, group: MuscleGroup) -> u32 {
        self.volumes.get(&group).copied().unwrap_or(0)
    }

    /// Combined sets over several muscle groups
    #[must_use]
    pub fn sum(&self, groups: &[MuscleGroup]) -> u32 {
        groups.iter().map(|group| self.get(*group)).sum()
    }

    /// Whether no muscle received any volume
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.volumes.is_empty()
    }

    /// Iterate muscle groups with recorded volume
    pub fn iter(&self) -> impl Iterator<Item = (MuscleGroup, u32)> + '_ {
        self.volumes.iter().map(|(group, sets)| (*group, *sets))
    }
}

/// Turns logged sets into a [`WeeklyVolumeSnapshot`]
pub struct VolumeAggregator;

impl VolumeAggregator {
    /// Aggregate a week's sets
    ///
    /// Each set adds 1.0 to every distinct primary muscle and 0.5 to every
    /// distinct secondary muscle that is not also primary for that exercise.
    /// Sets with no recognizable muscles contribute nothing. Totals are rounded
    /// half-to-even.
    #[must_use]
    pub fn aggregate(sets: &[LoggedSet]) -> WeeklyVolumeSnapshot {
        let mut totals: BTreeMap<MuscleGroup, f64> = BTreeMap::new();

        for set in sets {
            let primary = Self::normalize(&set.primary_muscles);
            let secondary = Self::normalize(&set.secondary_muscles);

            for group in &primary {
                *totals.entry(*group).or_insert(0.0) += PRIMARY_MUSCLE_WEIGHT;
            }
            for group in secondary.difference(&primary) {
                *totals.entry(*group).or_insert(0.0) += SECONDARY_MUSCLE_WEIGHT;
            }
        }

        let volumes = totals
            .into_iter()
            .map(|(group, total)| (group, round_sets(total)))
            .collect();

        WeeklyVolumeSnapshot { volumes }
    }

    fn normalize(raw: &[String]) -> BTreeSet<MuscleGroup> {
        raw.iter()
            .filter_map(|name| {
                let parsed = MuscleGroup::parse(name);
                if parsed.is_none() {
                    debug!(muscle = %name, "Ignoring unrecognized muscle in exercise metadata");
                }
                parsed
            })
            .collect()
    }
}

/// Round a fractional set total to whole sets, ties to even
fn round_sets(total: f64) -> u32 {
    let rounded = total.round_ties_even();
    if rounded <= 0.0 {
        0
    } else {
        // Safe: totals are sums of small non-negative weights
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        {
            rounded as u32
        }
    }
}
