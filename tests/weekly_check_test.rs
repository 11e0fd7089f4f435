// ABOUTME: Integration tests for the weekly adherence check against SQLite
// ABOUTME: Covers flag creation, escalation, resolution, idempotent re-runs, and imbalance reporting
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
#![allow(missing_docs, clippy::unwrap_used, clippy::expect_used, clippy::panic)]

mod common;

use adherence_intelligence::{ImbalanceType, RiskSeverity};
use chrono::{Duration, NaiveTime};
use common::{
    at, check_time, create_test_database, monday, open_flag, orchestrator, seed_program, seed_sets,
    week,
};
use training_adherence::models::{FlagStatus, MuscleGroup, Priority, TrainingWeek};
use training_adherence::services::WeeklyCheckOutcome;
use uuid::Uuid;

#[tokio::test]
async fn test_high_priority_shortfall_opens_monitoring_flag() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    let w = week(0);
    seed_program(&db, user, &[("chest", 20)], &[("chest", "high")], at(w.start, 8)).await;
    seed_sets(&db, user, at(w.start, 18), &["chest"], &[], 14).await;

    let outcome = orchestrator(&db)
        .run_weekly_check_for(user, w, check_time(&w))
        .await
        .unwrap();
    let report = outcome.into_report().expect("user has a program");

    assert_eq!(report.volume.get(MuscleGroup::Chest), 14);
    assert_eq!(report.muscles.len(), 1);
    assert!((report.muscles[0].variance_percentage - -30.0).abs() < 1e-9);
    assert!(report.muscles[0].below_threshold);

    assert_eq!(report.flags_created.len(), 1);
    let flag = &report.flags_created[0];
    assert_eq!(flag.muscle_group, MuscleGroup::Chest);
    assert_eq!(flag.priority, Priority::High);
    assert_eq!(flag.status, FlagStatus::Monitoring);
    assert_eq!(flag.flagged_date, w.end);
    assert!(report.alerts_to_send.is_empty());
    assert!(!report.needs_user_action);

    let stored = db.flags().list_open_flags(user).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, flag.id);
    assert_eq!(stored[0].actual_weekly_sets, 14);
    assert_eq!(stored[0].target_weekly_sets, 20);
}

#[tokio::test]
async fn test_rerun_on_same_day_is_idempotent() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    let w = week(0);
    seed_program(&db, user, &[("chest", 20)], &[("chest", "high")], at(w.start, 8)).await;
    seed_sets(&db, user, at(w.start, 18), &["chest"], &[], 14).await;
    let checker = orchestrator(&db);

    let first = checker
        .run_weekly_check_for(user, w, check_time(&w))
        .await
        .unwrap()
        .into_report()
        .unwrap();
    let second = checker
        .run_weekly_check_for(user, w, check_time(&w) + Duration::minutes(5))
        .await
        .unwrap()
        .into_report()
        .unwrap();

    assert_eq!(first.flags_created.len(), 1);
    assert!(second.flags_created.is_empty());
    assert!(second.flags_resolved.is_empty());
    assert!(second.alerts_to_send.is_empty());
    assert_eq!(second.flags_updated.len(), 1);
    assert_eq!(second.flags_updated[0].flag_id, first.flags_created[0].id);
    assert_eq!(second.flags_updated[0].status, FlagStatus::Monitoring);

    let all = db.flags().list_flags(user, None).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn test_sustained_shortfall_escalates_exactly_once() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    seed_program(&db, user, &[("chest", 20)], &[("chest", "high")], at(week(0).start, 8)).await;
    for offset in 0..3 {
        seed_sets(&db, user, at(week(offset).start, 18), &["chest"], &[], 14).await;
    }
    let checker = orchestrator(&db);

    let first = checker
        .run_weekly_check_for(user, week(0), check_time(&week(0)))
        .await
        .unwrap()
        .into_report()
        .unwrap();
    let flag_id = first.flags_created[0].id;

    let second = checker
        .run_weekly_check_for(user, week(1), check_time(&week(1)))
        .await
        .unwrap()
        .into_report()
        .unwrap();
    assert_eq!(second.alerts_to_send.len(), 1);
    assert_eq!(second.alerts_to_send[0].flag_id, flag_id);
    assert_eq!(second.alerts_to_send[0].status, FlagStatus::Alerted);
    assert!(second.needs_user_action);

    let stored = open_flag(&db, user, MuscleGroup::Chest).await.unwrap();
    assert_eq!(stored.status, FlagStatus::Alerted);
    assert_eq!(stored.alerted_at, Some(check_time(&week(1))));

    let third = checker
        .run_weekly_check_for(user, week(2), check_time(&week(2)))
        .await
        .unwrap()
        .into_report()
        .unwrap();
    assert!(third.alerts_to_send.is_empty());
    assert_eq!(third.flags_updated[0].status, FlagStatus::Alerted);
    assert_eq!(third.flags_updated[0].alerted_at, Some(check_time(&week(1))));
    assert!(!third.needs_user_action);
}

#[tokio::test]
async fn test_flag_younger_than_a_week_stays_monitoring() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    let w = week(0);
    seed_program(&db, user, &[("chest", 20)], &[("chest", "high")], at(w.start, 8)).await;
    seed_sets(&db, user, at(w.start, 18), &["chest"], &[], 14).await;
    let checker = orchestrator(&db);

    checker.run_weekly_check_for(user, w, at(w.start, 20)).await.unwrap();
    let later = checker
        .run_weekly_check_for(user, w, check_time(&w))
        .await
        .unwrap()
        .into_report()
        .unwrap();

    assert!(later.alerts_to_send.is_empty());
    assert_eq!(later.flags_updated[0].status, FlagStatus::Monitoring);
}

#[tokio::test]
async fn test_recovered_volume_resolves_flag() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    seed_program(&db, user, &[("chest", 20)], &[("chest", "high")], at(week(0).start, 8)).await;
    seed_sets(&db, user, at(week(0).start, 18), &["chest"], &[], 14).await;
    seed_sets(&db, user, at(week(1).start, 18), &["chest"], &[], 19).await;
    let checker = orchestrator(&db);

    let first = checker
        .run_weekly_check_for(user, week(0), check_time(&week(0)))
        .await
        .unwrap()
        .into_report()
        .unwrap();
    let second = checker
        .run_weekly_check_for(user, week(1), check_time(&week(1)))
        .await
        .unwrap()
        .into_report()
        .unwrap();

    assert_eq!(second.flags_resolved.len(), 1);
    assert_eq!(second.flags_resolved[0].flag_id, first.flags_created[0].id);
    assert_eq!(second.flags_resolved[0].previous_status, FlagStatus::Monitoring);
    assert!(second.flags_created.is_empty());
    assert!(db.flags().list_open_flags(user).await.unwrap().is_empty());

    let resolved = db
        .flags()
        .list_flags(user, Some(FlagStatus::Resolved))
        .await
        .unwrap();
    assert_eq!(resolved.len(), 1);
    assert_eq!(resolved[0].resolved_at, Some(check_time(&week(1))));
}

#[tokio::test]
async fn test_new_shortfall_after_resolution_opens_fresh_flag() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    seed_program(&db, user, &[("back", 10)], &[], at(week(0).start, 8)).await;
    seed_sets(&db, user, at(week(0).start, 18), &["back"], &[], 5).await;
    seed_sets(&db, user, at(week(1).start, 18), &["back"], &[], 10).await;
    seed_sets(&db, user, at(week(2).start, 18), &["back"], &[], 5).await;
    let checker = orchestrator(&db);

    for offset in 0..3 {
        checker
            .run_weekly_check_for(user, week(offset), check_time(&week(offset)))
            .await
            .unwrap();
    }

    let all = db.flags().list_flags(user, None).await.unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0].status, FlagStatus::Resolved);
    assert_eq!(all[1].status, FlagStatus::Monitoring);
    assert_eq!(all[1].flagged_date, week(2).end);
}

#[tokio::test]
async fn test_user_without_program_gets_no_program_outcome() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    let w = week(0);
    seed_sets(&db, user, at(w.start, 18), &["chest"], &[], 3).await;

    let outcome = orchestrator(&db)
        .run_weekly_check_for(user, w, check_time(&w))
        .await
        .unwrap();

    assert!(matches!(outcome, WeeklyCheckOutcome::NoProgram { .. }));
    assert_eq!(outcome.user_id(), user);
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["error"], "No program found for user");
    assert!(db.flags().list_flags(user, None).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_archived_program_is_ignored() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    let w = week(0);
    let program = seed_program(&db, user, &[("chest", 20)], &[], at(w.start, 8)).await;
    db.programs().archive_program(program.id).await.unwrap();

    let outcome = orchestrator(&db)
        .run_weekly_check_for(user, w, check_time(&w))
        .await
        .unwrap();

    assert!(outcome.report().is_none());
}

#[tokio::test]
async fn test_most_recent_active_program_wins() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    let w = week(0);
    seed_program(&db, user, &[("chest", 10)], &[("chest", "low")], at(w.start, 7)).await;
    let newest =
        seed_program(&db, user, &[("chest", 20)], &[("chest", "high")], at(w.start, 9)).await;
    seed_sets(&db, user, at(w.start, 18), &["chest"], &[], 14).await;

    let report = orchestrator(&db)
        .run_weekly_check_for(user, w, check_time(&w))
        .await
        .unwrap()
        .into_report()
        .unwrap();

    assert_eq!(report.program_id, newest.id);
    assert_eq!(report.muscles[0].target_weekly_sets, 20);
    assert_eq!(report.muscles[0].priority, Priority::High);
    assert_eq!(report.flags_created.len(), 1);
}

#[tokio::test]
async fn test_week_boundaries_are_half_open() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    let w = week(0);
    seed_program(&db, user, &[("biceps", 10)], &[], at(w.start, 8)).await;
    let last_second = w
        .end
        .and_time(NaiveTime::from_hms_opt(23, 59, 59).unwrap())
        .and_utc();
    seed_sets(&db, user, w.starts_at(), &["biceps"], &[], 2).await;
    seed_sets(&db, user, last_second, &["biceps"], &[], 3).await;
    seed_sets(&db, user, w.ends_before(), &["biceps"], &[], 4).await;
    seed_sets(&db, user, w.starts_at() - Duration::seconds(1), &["biceps"], &[], 5).await;

    let report = orchestrator(&db)
        .run_weekly_check_for(user, w, check_time(&w))
        .await
        .unwrap()
        .into_report()
        .unwrap();

    assert_eq!(report.volume.get(MuscleGroup::Biceps), 5);
}

#[tokio::test]
async fn test_custom_window_spanning_two_iso_weeks() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    let thursday = monday() + Duration::days(3);
    let window = TrainingWeek::new(thursday, thursday + Duration::days(6)).unwrap();
    seed_program(&db, user, &[("biceps", 10)], &[], at(monday(), 8)).await;
    seed_sets(&db, user, at(monday(), 18), &["biceps"], &[], 5).await;
    seed_sets(&db, user, at(thursday, 18), &["biceps"], &[], 3).await;
    seed_sets(&db, user, at(thursday + Duration::days(5), 18), &["biceps"], &[], 4).await;
    seed_sets(&db, user, at(thursday + Duration::days(7), 18), &["biceps"], &[], 6).await;

    let report = orchestrator(&db)
        .run_weekly_check_for(user, window, at(window.end, 20))
        .await
        .unwrap()
        .into_report()
        .unwrap();

    assert_eq!(report.week, window);
    assert_eq!(report.volume.get(MuscleGroup::Biceps), 7);
    assert_eq!(report.muscles[0].actual_weekly_sets, 7);
}

#[tokio::test]
async fn test_secondary_muscles_count_half() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    let w = week(0);
    seed_program(&db, user, &[("triceps", 4)], &[], at(w.start, 8)).await;
    seed_sets(&db, user, at(w.start, 18), &["chest"], &["triceps"], 6).await;

    let report = orchestrator(&db)
        .run_weekly_check_for(user, w, check_time(&w))
        .await
        .unwrap()
        .into_report()
        .unwrap();

    assert_eq!(report.volume.get(MuscleGroup::Chest), 6);
    assert_eq!(report.volume.get(MuscleGroup::Triceps), 3);
    assert!(report.flags_created.is_empty());
}

#[tokio::test]
async fn test_empty_week_flags_every_target() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    let w = week(0);
    seed_program(
        &db,
        user,
        &[("chest", 12), ("quads", 10), ("grip strength", 6)],
        &[("quads", "low")],
        at(w.start, 8),
    )
    .await;

    let report = orchestrator(&db)
        .run_weekly_check_for(user, w, check_time(&w))
        .await
        .unwrap()
        .into_report()
        .unwrap();

    assert!(report.volume.is_empty());
    assert_eq!(report.muscles.len(), 2);
    let flagged: Vec<MuscleGroup> = report.flags_created.iter().map(|f| f.muscle_group).collect();
    assert_eq!(flagged, vec![MuscleGroup::Chest, MuscleGroup::Quadriceps]);
    assert!(report.imbalance_risks.is_empty());
}

#[tokio::test]
async fn test_imbalance_risk_needs_user_action_without_flags() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    let w = week(0);
    seed_program(&db, user, &[("quadriceps", 10), ("hamstrings", 10)], &[], at(w.start, 8)).await;
    seed_sets(&db, user, at(w.start, 18), &["quadriceps"], &[], 20).await;
    seed_sets(&db, user, at(w.start, 19), &["hamstrings"], &[], 8).await;

    let report = orchestrator(&db)
        .run_weekly_check_for(user, w, check_time(&w))
        .await
        .unwrap()
        .into_report()
        .unwrap();

    assert!(report.flags_created.is_empty());
    assert_eq!(report.imbalance_risks.len(), 1);
    let risk = &report.imbalance_risks[0];
    assert_eq!(risk.imbalance_type, ImbalanceType::QuadHamstringImbalance);
    assert_eq!(risk.severity, RiskSeverity::High);
    assert!((risk.ratio - 2.5).abs() < 1e-9);
    assert!(report.needs_user_action);
}

#[tokio::test]
async fn test_report_serializes_for_dispatch() {
    let db = create_test_database().await;
    let user = Uuid::new_v4();
    let w = week(0);
    seed_program(&db, user, &[("chest", 20)], &[("chest", "high")], at(w.start, 8)).await;
    seed_sets(&db, user, at(w.start, 18), &["chest"], &[], 14).await;

    let outcome = orchestrator(&db)
        .run_weekly_check_for(user, w, check_time(&w))
        .await
        .unwrap();
    let json = serde_json::to_value(&outcome).unwrap();

    assert_eq!(json["user_id"], user.to_string());
    assert_eq!(json["needs_user_action"], false);
    assert_eq!(json["volume"]["chest"], 14);
    assert_eq!(json["flags_created"][0]["status"], "monitoring");
    assert_eq!(json["flags_created"][0]["muscle_group"], "chest");
}
