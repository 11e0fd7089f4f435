// ABOUTME: Weekly adherence check orchestration for a single user
// ABOUTME: Resolves targets, aggregates volume, evaluates adherence, applies flag transitions, and detects imbalances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Weekly Check
//!
//! One check is a straight pipeline: program targets, weekly volume, adherence
//! evaluation, flag transitions, imbalance detection. Re-running a check for
//! the same week and day re-derives the same below-threshold set, so the flag
//! transitions it applies are either no-ops or the same deterministic updates.
//!
//! Alert delivery is the caller's job; the report carries `alerts_to_send`
//! and `imbalance_risks` for a notification dispatcher.

use std::sync::Arc;

use crate::config::CheckSettings;
use crate::database::repositories::{
    FlagRepository, FlagRepositoryImpl, ProgramRepository, ProgramRepositoryImpl,
    WorkoutRepository, WorkoutRepositoryImpl,
};
use crate::database::Database;
use crate::logging::AppLogger;
use crate::services::target_resolver::TargetResolver;
use crate::services::volume::VolumeLoader;
use adherence_core::constants::messages::NO_PROGRAM_FOUND;
use adherence_core::errors::{AppError, AppResult};
use adherence_core::models::{AdherenceFlag, TrainingWeek};
use adherence_intelligence::{
    AdherenceEvaluator, FlagLifecycleManager, FlagResolution, FlagUpdate, ImbalanceRisk,
    ImbalanceRiskDetector, MuscleAdherence, WeeklyVolumeSnapshot,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

/// Composite result of one user's weekly check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyCheckReport {
    /// User checked
    pub user_id: Uuid,
    /// Program whose targets were used
    pub program_id: Uuid,
    /// Aggregation window
    pub week: TrainingWeek,
    /// Time of the check
    pub checked_at: DateTime<Utc>,
    /// Effective sets per muscle group
    pub volume: WeeklyVolumeSnapshot,
    /// Actual, target, and variance for every targeted muscle
    pub muscles: Vec<MuscleAdherence>,
    /// Flags opened by this check
    pub flags_created: Vec<AdherenceFlag>,
    /// Open flags refreshed by this check
    pub flags_updated: Vec<FlagUpdate>,
    /// Flags closed by this check
    pub flags_resolved: Vec<FlagResolution>,
    /// Flags that escalated to `alerted` in this check
    pub alerts_to_send: Vec<FlagUpdate>,
    /// Antagonist imbalances found this week
    pub imbalance_risks: Vec<ImbalanceRisk>,
    /// True iff there is an alert to send or an imbalance risk
    pub needs_user_action: bool,
}

/// Outcome of a weekly check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WeeklyCheckOutcome {
    /// The check ran against an active program
    Completed(Box<WeeklyCheckReport>),
    /// The user has no active program; nothing was evaluated or written
    NoProgram {
        /// User checked
        user_id: Uuid,
        /// Reason the check stopped
        error: String,
    },
}

impl WeeklyCheckOutcome {
    /// User the outcome belongs to
    #[must_use]
    pub fn user_id(&self) -> Uuid {
        match self {
            Self::Completed(report) => report.user_id,
            Self::NoProgram { user_id, .. } => *user_id,
        }
    }

    /// Report, when the check ran
    #[must_use]
    pub fn report(&self) -> Option<&WeeklyCheckReport> {
        match self {
            Self::Completed(report) => Some(report),
            Self::NoProgram { .. } => None,
        }
    }

    /// Consume the outcome and return the report, when the check ran
    #[must_use]
    pub fn into_report(self) -> Option<WeeklyCheckReport> {
        match self {
            Self::Completed(report) => Some(*report),
            Self::NoProgram { .. } => None,
        }
    }
}

/// Runs the weekly check pipeline against the repositories
pub struct WeeklyCheckOrchestrator {
    resolver: TargetResolver,
    volume: VolumeLoader,
    flags: Arc<dyn FlagRepository>,
    evaluator: AdherenceEvaluator,
    lifecycle: FlagLifecycleManager,
}

impl WeeklyCheckOrchestrator {
    /// Orchestrator over explicit repositories
    #[must_use]
    pub fn new(
        workouts: Arc<dyn WorkoutRepository>,
        programs: Arc<dyn ProgramRepository>,
        flags: Arc<dyn FlagRepository>,
        settings: &CheckSettings,
    ) -> Self {
        Self {
            resolver: TargetResolver::new(programs),
            volume: VolumeLoader::new(workouts),
            flags,
            evaluator: AdherenceEvaluator::new(settings.thresholds),
            lifecycle: FlagLifecycleManager::new(settings.alert_after_days),
        }
    }

    /// Orchestrator backed by the `SQLite` repositories
    #[must_use]
    pub fn from_database(db: &Database, settings: &CheckSettings) -> Self {
        Self::new(
            Arc::new(WorkoutRepositoryImpl::new(db.clone())),
            Arc::new(ProgramRepositoryImpl::new(db.clone())),
            Arc::new(FlagRepositoryImpl::new(db.clone())),
            settings,
        )
    }

    /// Check the user against the current week
    ///
    /// # Errors
    ///
    /// Returns an error if any repository call fails
    pub async fn run_weekly_check(&self, user_id: Uuid) -> AppResult<WeeklyCheckOutcome> {
        let now = Utc::now();
        self.run_weekly_check_for(user_id, TrainingWeek::containing(now.date_naive()), now)
            .await
    }

    /// Check the user against an explicit week and clock
    ///
    /// # Errors
    ///
    /// Returns an error if any repository call fails; flag changes are applied
    /// atomically, so a failed check leaves the user's flags untouched
    #[instrument(
        name = "weekly_check",
        skip(self),
        fields(user_id = %user_id, week_start = %week.start)
    )]
    pub async fn run_weekly_check_for(
        &self,
        user_id: Uuid,
        week: TrainingWeek,
        now: DateTime<Utc>,
    ) -> AppResult<WeeklyCheckOutcome> {
        let Some(program) = self.resolver.resolve(user_id).await? else {
            info!("No active program; skipping weekly check");
            return Ok(WeeklyCheckOutcome::NoProgram {
                user_id,
                error: NO_PROGRAM_FOUND.to_owned(),
            });
        };

        let volume = self.volume.weekly_volume(user_id, &week).await?;
        let evaluation = self.evaluator.evaluate(&volume, &program.targets);

        let open_flags = self
            .flags
            .list_open_flags(user_id)
            .await
            .map_err(|e| AppError::from(e).with_user_id(user_id))?;
        let transitions = self.lifecycle.plan_transitions(&open_flags, &evaluation, now);

        let flags_created = if transitions.is_empty() {
            Vec::new()
        } else {
            self.flags
                .apply_transitions(user_id, &transitions, now)
                .await
                .map_err(|e| AppError::from(e).with_user_id(user_id))?
        };

        let imbalance_risks = ImbalanceRiskDetector::detect(&volume);

        let today = now.date_naive();
        for alert in &transitions.alerts_to_send {
            AppLogger::log_alert(
                user_id,
                alert.flag_id,
                alert.muscle_group.as_str(),
                (today - alert.flagged_date).num_days(),
            );
        }
        AppLogger::log_weekly_check(
            user_id,
            program.program_id,
            flags_created.len(),
            transitions.to_update.len(),
            transitions.to_resolve.len(),
            imbalance_risks.len(),
        );

        let needs_user_action =
            !transitions.alerts_to_send.is_empty() || !imbalance_risks.is_empty();

        Ok(WeeklyCheckOutcome::Completed(Box::new(WeeklyCheckReport {
            user_id,
            program_id: program.program_id,
            week,
            checked_at: now,
            volume,
            muscles: evaluation.muscles,
            flags_created,
            flags_updated: transitions.to_update,
            flags_resolved: transitions.to_resolve,
            alerts_to_send: transitions.alerts_to_send,
            imbalance_risks,
            needs_user_action,
        })))
    }
}
