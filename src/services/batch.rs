// ABOUTME: Batch runner executing weekly checks across many users with bounded concurrency
// ABOUTME: Isolates per-user failures and enforces a per-user time budget so one user cannot stall the run
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::CheckSettings;
use crate::database::repositories::ProgramRepository;
use crate::logging::AppLogger;
use crate::services::weekly_check::{WeeklyCheckOrchestrator, WeeklyCheckOutcome, WeeklyCheckReport};
use adherence_core::errors::{AppError, AppResult, ErrorCode};
use adherence_core::models::TrainingWeek;
use chrono::{DateTime, Utc};
use futures_util::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{error, warn};
use uuid::Uuid;

/// A user whose check returned an error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCheckFailure {
    /// User checked
    pub user_id: Uuid,
    /// Error description
    pub error: String,
}

/// Aggregate result of a batch run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Checks that produced a report
    pub checked: usize,
    /// Users without an active program
    pub no_program: Vec<Uuid>,
    /// Users whose check failed
    pub failed: Vec<UserCheckFailure>,
    /// Users whose check exceeded the time budget
    pub timed_out: Vec<Uuid>,
    /// Reports, ordered by user id
    pub reports: Vec<WeeklyCheckReport>,
}

impl BatchSummary {
    /// Alerts across every report
    #[must_use]
    pub fn alert_count(&self) -> usize {
        self.reports.iter().map(|r| r.alerts_to_send.len()).sum()
    }

    /// Reports that need the user's attention
    pub fn needing_action(&self) -> impl Iterator<Item = &WeeklyCheckReport> {
        self.reports.iter().filter(|r| r.needs_user_action)
    }
}

/// Runs weekly checks for many users
pub struct WeeklyCheckRunner {
    orchestrator: Arc<WeeklyCheckOrchestrator>,
    concurrency: usize,
    user_timeout: Duration,
}

impl WeeklyCheckRunner {
    /// Runner using the batch limits from `settings`
    #[must_use]
    pub fn new(orchestrator: Arc<WeeklyCheckOrchestrator>, settings: &CheckSettings) -> Self {
        Self {
            orchestrator,
            concurrency: settings.concurrency.max(1),
            user_timeout: settings.user_timeout,
        }
    }

    /// Check every user with an active program against the current week
    ///
    /// # Errors
    ///
    /// Returns an error only if the eligible users cannot be listed
    pub async fn run_all(&self, programs: &dyn ProgramRepository) -> AppResult<BatchSummary> {
        let user_ids = programs.list_users_with_active_program().await?;
        Ok(self.run_batch(user_ids).await)
    }

    /// Check the given users against the current week
    pub async fn run_batch(&self, user_ids: Vec<Uuid>) -> BatchSummary {
        let now = Utc::now();
        self.run_batch_for(user_ids, TrainingWeek::containing(now.date_naive()), now)
            .await
    }

    /// Check the given users against an explicit week and clock
    ///
    /// Duplicate ids are checked once. A check that exceeds the time budget
    /// is dropped; its flag transaction rolls back with it.
    pub async fn run_batch_for(
        &self,
        user_ids: Vec<Uuid>,
        week: TrainingWeek,
        now: DateTime<Utc>,
    ) -> BatchSummary {
        let started = Instant::now();
        let mut seen = HashSet::new();
        let unique: Vec<Uuid> = user_ids.into_iter().filter(|id| seen.insert(*id)).collect();

        let orchestrator = &self.orchestrator;
        let budget = self.user_timeout;
        let results: Vec<(Uuid, AppResult<WeeklyCheckOutcome>)> = stream::iter(unique)
            .map(|user_id| async move {
                let check = orchestrator.run_weekly_check_for(user_id, week, now);
                let result = timeout(budget, check).await.unwrap_or_else(|_| {
                    Err(AppError::timeout(format!(
                        "Weekly check exceeded its {}s budget",
                        budget.as_secs_f64()
                    ))
                    .with_user_id(user_id))
                });
                (user_id, result)
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        let mut summary = BatchSummary::default();
        for (user_id, result) in results {
            match result {
                Ok(WeeklyCheckOutcome::Completed(report)) => {
                    summary.reports.push(*report);
                }
                Ok(WeeklyCheckOutcome::NoProgram { .. }) => {
                    summary.no_program.push(user_id);
                }
                Err(e) if e.code == ErrorCode::Timeout => {
                    warn!(user.id = %user_id, error = %e, "Weekly check timed out");
                    summary.timed_out.push(user_id);
                }
                Err(e) => {
                    error!(user.id = %user_id, error = %e, "Weekly check failed");
                    summary.failed.push(UserCheckFailure {
                        user_id,
                        error: e.to_string(),
                    });
                }
            }
        }

        summary.reports.sort_by_key(|r| r.user_id);
        summary.no_program.sort_unstable();
        summary.failed.sort_by_key(|f| f.user_id);
        summary.timed_out.sort_unstable();
        summary.checked = summary.reports.len();

        AppLogger::log_batch_summary(
            summary.checked,
            summary.no_program.len(),
            summary.failed.len(),
            summary.timed_out.len(),
            u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        );
        summary
    }
}
