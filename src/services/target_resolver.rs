// ABOUTME: Resolves a user's active program into per-muscle weekly set targets and priorities
// ABOUTME: Normalizes free-text program keys onto the muscle-group enumeration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::database::repositories::ProgramRepository;
use adherence_core::errors::{AppError, AppResult};
use adherence_core::models::{MuscleGroup, MuscleGroupTarget, Priority, ProgramRecord, ProgramTargets};
use tracing::{debug, warn};
use uuid::Uuid;

/// Looks up program targets for a user
pub struct TargetResolver {
    programs: Arc<dyn ProgramRepository>,
}

impl TargetResolver {
    /// Resolver reading from the given program store
    #[must_use]
    pub fn new(programs: Arc<dyn ProgramRepository>) -> Self {
        Self { programs }
    }

    /// Targets of the user's most recent active program, or `None` without one
    ///
    /// # Errors
    ///
    /// Returns a database error if the program lookup fails
    pub async fn resolve(&self, user_id: Uuid) -> AppResult<Option<ProgramTargets>> {
        let program = self
            .programs
            .get_active_program(user_id)
            .await
            .map_err(|e| AppError::from(e).with_user_id(user_id))?;

        Ok(program.as_ref().map(Self::normalize))
    }

    /// Map a stored program onto typed targets
    ///
    /// Unknown muscle names and negative targets are skipped. When several
    /// aliases name the same group, the largest target and the highest
    /// priority win. Muscles without an emphasis entry are medium priority.
    #[must_use]
    pub fn normalize(program: &ProgramRecord) -> ProgramTargets {
        let mut emphasis: BTreeMap<MuscleGroup, Priority> = BTreeMap::new();
        for (raw, level) in &program.body_part_emphasis {
            let Some(group) = MuscleGroup::parse(raw) else {
                debug!(program.id = %program.id, "Ignoring emphasis for unknown muscle '{raw}'");
                continue;
            };
            let priority = Priority::parse(level);
            emphasis
                .entry(group)
                .and_modify(|current| *current = higher_priority(*current, priority))
                .or_insert(priority);
        }

        let mut targets: BTreeMap<MuscleGroup, MuscleGroupTarget> = BTreeMap::new();
        for (raw, sets) in &program.weekly_volume_targets {
            let Some(group) = MuscleGroup::parse(raw) else {
                warn!(program.id = %program.id, "Ignoring volume target for unknown muscle '{raw}'");
                continue;
            };
            let Ok(sets) = u32::try_from(*sets) else {
                warn!(program.id = %program.id, "Ignoring invalid volume target {raw} = {sets}");
                continue;
            };
            let priority = emphasis.get(&group).copied().unwrap_or_default();
            targets
                .entry(group)
                .and_modify(|target| target.target_weekly_sets = target.target_weekly_sets.max(sets))
                .or_insert(MuscleGroupTarget {
                    target_weekly_sets: sets,
                    priority,
                });
        }

        ProgramTargets {
            program_id: program.id,
            targets,
        }
    }
}

const fn rank(priority: Priority) -> u8 {
    match priority {
        Priority::High => 2,
        Priority::Medium => 1,
        Priority::Low => 0,
    }
}

const fn higher_priority(a: Priority, b: Priority) -> Priority {
    if rank(b) > rank(a) {
        b
    } else {
        a
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;

    fn program(targets: &[(&str, i64)], emphasis: &[(&str, &str)]) -> ProgramRecord {
        ProgramRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            weekly_volume_targets: targets
                .iter()
                .map(|(k, v)| ((*k).to_owned(), *v))
                .collect::<HashMap<_, _>>(),
            body_part_emphasis: emphasis
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect::<HashMap<_, _>>(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_missing_emphasis_defaults_to_medium() {
        let resolved = TargetResolver::normalize(&program(&[("chest", 20), ("back", 16)], &[("chest", "high")]));
        assert_eq!(resolved.targets[&MuscleGroup::Chest].priority, Priority::High);
        assert_eq!(resolved.targets[&MuscleGroup::Back].priority, Priority::Medium);
    }

    #[test]
    fn test_unknown_priority_defaults_to_medium() {
        let resolved = TargetResolver::normalize(&program(&[("calves", 8)], &[("calves", "critical")]));
        assert_eq!(resolved.targets[&MuscleGroup::Calves].priority, Priority::Medium);
    }

    #[test]
    fn test_aliases_collapse_to_one_group() {
        let resolved = TargetResolver::normalize(&program(
            &[("quads", 12), ("Quadriceps", 14)],
            &[("quads", "low"), ("quadriceps", "high")],
        ));
        assert_eq!(resolved.targets.len(), 1);
        let quads = resolved.targets[&MuscleGroup::Quadriceps];
        assert_eq!(quads.target_weekly_sets, 14);
        assert_eq!(quads.priority, Priority::High);
    }

    #[test]
    fn test_unknown_and_negative_targets_are_skipped() {
        let resolved = TargetResolver::normalize(&program(&[("wings", 10), ("chest", -4), ("back", 0)], &[]));
        assert_eq!(resolved.targets.len(), 1);
        assert_eq!(resolved.targets[&MuscleGroup::Back].target_weekly_sets, 0);
    }
}
