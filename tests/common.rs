// ABOUTME: Shared test utilities and setup functions for integration tests
// ABOUTME: Provides in-memory databases, seed helpers, fixed clocks, and fake or failing repositories
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `training_adherence`

use adherence_intelligence::FlagTransitions;
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, NaiveDate, NaiveTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;
use training_adherence::config::CheckSettings;
use training_adherence::database::repositories::{
    FlagRepository, ProgramRepository, WorkoutRepository,
};
use training_adherence::database::{Database, DatabaseError};
use training_adherence::models::{
    AdherenceFlag, FlagStatus, LoggedSet, MuscleGroup, ProgramRecord, TrainingWeek,
    WorkoutSummary,
};
use training_adherence::services::WeeklyCheckOrchestrator;
use uuid::Uuid;

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Standard test database setup
pub async fn create_test_database() -> Database {
    init_test_logging();
    Database::connect("sqlite::memory:", 1).await.unwrap()
}

/// Monday 2025-03-10
pub fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
}

/// The week starting `monday() + weeks`
pub fn week(weeks: i64) -> TrainingWeek {
    TrainingWeek::containing(monday() + ChronoDuration::weeks(weeks))
}

/// `date` at `hour:00` UTC
pub fn at(date: NaiveDate, hour: u32) -> DateTime<Utc> {
    date.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap())
        .and_utc()
}

/// Sunday evening of the given week, when the scheduled check runs
pub fn check_time(week: &TrainingWeek) -> DateTime<Utc> {
    at(week.end, 20)
}

/// Settings with a short per-user budget for timeout tests
pub fn fast_settings() -> CheckSettings {
    CheckSettings {
        user_timeout: Duration::from_millis(200),
        ..CheckSettings::default()
    }
}

/// Insert an active program
pub async fn seed_program(
    db: &Database,
    user_id: Uuid,
    targets: &[(&str, i64)],
    emphasis: &[(&str, &str)],
    created_at: DateTime<Utc>,
) -> ProgramRecord {
    db.programs()
        .create_program(
            user_id,
            targets.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect(),
            emphasis
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            created_at,
        )
        .await
        .unwrap()
}

/// Log one workout with `sets` sets of an exercise hitting `primary`
pub async fn seed_sets(
    db: &Database,
    user_id: Uuid,
    start_time: DateTime<Utc>,
    primary: &[&str],
    secondary: &[&str],
    sets: usize,
) {
    let workouts = db.workouts();
    let exercise = workouts
        .create_exercise("test exercise", primary, secondary)
        .await
        .unwrap();
    let workout = workouts.create_workout(user_id, start_time).await.unwrap();
    for _ in 0..sets {
        workouts
            .log_set(workout, exercise, Some(10), Some(60.0))
            .await
            .unwrap();
    }
}

/// Open (monitoring or alerted) flag for one muscle, oldest first
pub async fn open_flag(
    db: &Database,
    user_id: Uuid,
    muscle: MuscleGroup,
) -> Option<AdherenceFlag> {
    db.flags()
        .list_open_flags(user_id)
        .await
        .unwrap()
        .into_iter()
        .find(|flag| flag.muscle_group == muscle)
}

/// Orchestrator over the `SQLite` repositories with default settings
pub fn orchestrator(db: &Database) -> WeeklyCheckOrchestrator {
    WeeklyCheckOrchestrator::from_database(db, &CheckSettings::default())
}

// ── Fakes ────────────────────────────────────────────────────────────────

/// Workouts held in memory; every user's sets land in one workout per week
#[derive(Default)]
pub struct FakeWorkoutRepository {
    sets: Mutex<HashMap<Uuid, Vec<LoggedSet>>>,
}

impl FakeWorkoutRepository {
    pub fn with_sets(user_id: Uuid, sets: Vec<LoggedSet>) -> Self {
        let repo = Self::default();
        repo.sets.lock().unwrap().insert(user_id, sets);
        repo
    }

    pub fn add_sets(&self, user_id: Uuid, sets: Vec<LoggedSet>) {
        self.sets
            .lock()
            .unwrap()
            .entry(user_id)
            .or_default()
            .extend(sets);
    }
}

#[async_trait]
impl WorkoutRepository for FakeWorkoutRepository {
    async fn list_workouts(
        &self,
        user_id: Uuid,
        week: &TrainingWeek,
    ) -> Result<Vec<WorkoutSummary>, DatabaseError> {
        if self.sets.lock().unwrap().contains_key(&user_id) {
            Ok(vec![WorkoutSummary {
                id: user_id,
                start_time: week.starts_at(),
            }])
        } else {
            Ok(Vec::new())
        }
    }

    async fn list_sets(&self, workout_ids: &[Uuid]) -> Result<Vec<LoggedSet>, DatabaseError> {
        let sets = self.sets.lock().unwrap();
        Ok(workout_ids
            .iter()
            .filter_map(|id| sets.get(id))
            .flatten()
            .cloned()
            .collect())
    }
}

/// Programs held in memory, with optional failing or slow users
#[derive(Default)]
pub struct FakeProgramRepository {
    programs: Mutex<HashMap<Uuid, ProgramRecord>>,
    failing: Mutex<HashSet<Uuid>>,
    slow: Mutex<HashSet<Uuid>>,
}

impl FakeProgramRepository {
    pub fn add_program(&self, user_id: Uuid, targets: &[(&str, i64)], emphasis: &[(&str, &str)]) {
        let record = ProgramRecord {
            id: Uuid::new_v4(),
            user_id,
            weekly_volume_targets: targets.iter().map(|(k, v)| ((*k).to_owned(), *v)).collect(),
            body_part_emphasis: emphasis
                .iter()
                .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
                .collect(),
            created_at: Utc::now(),
        };
        self.programs.lock().unwrap().insert(user_id, record);
    }

    /// Lookups for this user fail with a query error
    pub fn fail_for(&self, user_id: Uuid) {
        self.failing.lock().unwrap().insert(user_id);
    }

    /// Lookups for this user hang for ten seconds
    pub fn stall_for(&self, user_id: Uuid) {
        self.slow.lock().unwrap().insert(user_id);
    }
}

#[async_trait]
impl ProgramRepository for FakeProgramRepository {
    async fn get_active_program(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProgramRecord>, DatabaseError> {
        if self.failing.lock().unwrap().contains(&user_id) {
            return Err(DatabaseError::QueryError {
                context: "connection reset by peer".to_owned(),
            });
        }
        let stalled = self.slow.lock().unwrap().contains(&user_id);
        if stalled {
            tokio::time::sleep(Duration::from_secs(10)).await;
        }
        Ok(self.programs.lock().unwrap().get(&user_id).cloned())
    }

    async fn list_users_with_active_program(&self) -> Result<Vec<Uuid>, DatabaseError> {
        let mut users: Vec<Uuid> = self.programs.lock().unwrap().keys().copied().collect();
        users.sort_unstable();
        Ok(users)
    }
}

/// Flags held in memory, applying transitions like the `SQLite` manager
#[derive(Default)]
pub struct FakeFlagRepository {
    flags: Mutex<Vec<AdherenceFlag>>,
}

impl FakeFlagRepository {
    pub fn with_flags(flags: Vec<AdherenceFlag>) -> Self {
        Self {
            flags: Mutex::new(flags),
        }
    }

    pub fn all(&self) -> Vec<AdherenceFlag> {
        self.flags.lock().unwrap().clone()
    }
}

#[async_trait]
impl FlagRepository for FakeFlagRepository {
    async fn list_open_flags(&self, user_id: Uuid) -> Result<Vec<AdherenceFlag>, DatabaseError> {
        Ok(self
            .flags
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id && f.status.is_open())
            .cloned()
            .collect())
    }

    async fn list_flags(
        &self,
        user_id: Uuid,
        status: Option<FlagStatus>,
    ) -> Result<Vec<AdherenceFlag>, DatabaseError> {
        Ok(self
            .flags
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id && status.is_none_or(|s| f.status == s))
            .cloned()
            .collect())
    }

    async fn apply_transitions(
        &self,
        user_id: Uuid,
        transitions: &FlagTransitions,
        now: DateTime<Utc>,
    ) -> Result<Vec<AdherenceFlag>, DatabaseError> {
        let mut flags = self.flags.lock().unwrap();
        for resolution in &transitions.to_resolve {
            if let Some(flag) = flags.iter_mut().find(|f| f.id == resolution.flag_id) {
                flag.status = FlagStatus::Resolved;
                flag.resolved_at = Some(resolution.resolved_at);
                flag.updated_at = now;
            }
        }
        for update in &transitions.to_update {
            if let Some(flag) = flags.iter_mut().find(|f| f.id == update.flag_id) {
                flag.priority = update.priority;
                flag.target_weekly_sets = update.target_weekly_sets;
                flag.actual_weekly_sets = update.actual_weekly_sets;
                flag.variance_percentage = update.variance_percentage;
                flag.status = update.status;
                flag.alerted_at = update.alerted_at;
                flag.updated_at = now;
            }
        }
        let created: Vec<AdherenceFlag> = transitions
            .to_create
            .iter()
            .map(|new_flag| AdherenceFlag {
                id: Uuid::new_v4(),
                user_id,
                muscle_group: new_flag.muscle_group,
                priority: new_flag.priority,
                target_weekly_sets: new_flag.target_weekly_sets,
                actual_weekly_sets: new_flag.actual_weekly_sets,
                variance_percentage: new_flag.variance_percentage,
                flagged_date: new_flag.flagged_date,
                status: FlagStatus::Monitoring,
                alerted_at: None,
                resolved_at: None,
                created_at: now,
                updated_at: now,
            })
            .collect();
        flags.extend(created.iter().cloned());
        Ok(created)
    }
}

/// Fake repositories bundled with an orchestrator over them
pub struct FakeStores {
    pub workouts: Arc<FakeWorkoutRepository>,
    pub programs: Arc<FakeProgramRepository>,
    pub flags: Arc<FakeFlagRepository>,
}

impl FakeStores {
    pub fn new() -> Self {
        init_test_logging();
        Self {
            workouts: Arc::new(FakeWorkoutRepository::default()),
            programs: Arc::new(FakeProgramRepository::default()),
            flags: Arc::new(FakeFlagRepository::default()),
        }
    }

    pub fn with_flags(flags: Vec<AdherenceFlag>) -> Self {
        Self {
            flags: Arc::new(FakeFlagRepository::with_flags(flags)),
            ..Self::new()
        }
    }

    pub fn orchestrator(&self, settings: &CheckSettings) -> WeeklyCheckOrchestrator {
        WeeklyCheckOrchestrator::new(
            self.workouts.clone(),
            self.programs.clone(),
            self.flags.clone(),
            settings,
        )
    }
}
