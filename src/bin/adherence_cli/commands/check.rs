// ABOUTME: Weekly check commands for adherence-cli
// ABOUTME: Runs the check for one user or for every user with an active program
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use tracing::info;
use training_adherence::config::CheckSettings;
use training_adherence::database::repositories::ProgramRepositoryImpl;
use training_adherence::database::Database;
use training_adherence::errors::AppResult;
use training_adherence::models::TrainingWeek;
use training_adherence::services::{WeeklyCheckOrchestrator, WeeklyCheckRunner};
use uuid::Uuid;

use crate::helpers::display::{display_batch_summary, display_outcome, print_json};

/// Run the weekly check for one user
pub async fn run_one(
    database: &Database,
    settings: &CheckSettings,
    user_id: Uuid,
    week_of: Option<NaiveDate>,
    json: bool,
) -> AppResult<()> {
    let now = Utc::now();
    let week = TrainingWeek::containing(week_of.unwrap_or_else(|| now.date_naive()));
    info!("Running weekly check for {user_id} ({} to {})", week.start, week.end);

    let orchestrator = WeeklyCheckOrchestrator::from_database(database, settings);
    let outcome = orchestrator.run_weekly_check_for(user_id, week, now).await?;

    if json {
        print_json(&outcome)
    } else {
        display_outcome(&outcome);
        Ok(())
    }
}

/// Run the weekly check for every eligible user
pub async fn run_all(database: &Database, settings: &CheckSettings, json: bool) -> AppResult<()> {
    let orchestrator = Arc::new(WeeklyCheckOrchestrator::from_database(database, settings));
    let runner = WeeklyCheckRunner::new(orchestrator, settings);
    let programs = ProgramRepositoryImpl::new(database.clone());

    let summary = runner.run_all(&programs).await?;

    if json {
        print_json(&summary)
    } else {
        display_batch_summary(&summary);
        Ok(())
    }
}
