// ABOUTME: Criterion benchmarks for the weekly check algorithms
// ABOUTME: Measures volume aggregation, adherence evaluation, and flag transition planning
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the storage-free parts of a weekly check.

#![allow(
    clippy::missing_docs_in_private_items,
    missing_docs,
    clippy::unwrap_used,
    clippy::cast_possible_wrap
)]

use adherence_intelligence::{
    AdherenceEvaluator, FlagLifecycleManager, ImbalanceRiskDetector, VolumeAggregator,
};
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::collections::BTreeMap;
use training_adherence::models::{
    AdherenceFlag, FlagStatus, LoggedSet, MuscleGroup, MuscleGroupTarget, Priority,
};
use uuid::Uuid;

/// A typical heavy week has a few hundred working sets
const SET_COUNTS: [usize; 3] = [50, 250, 1000];

const RAW_MUSCLES: [&str; 8] = [
    "chest", "Pecs", "quads", "hamstrings", "lats", "delts", "biceps", "mystery",
];

fn generate_sets(count: usize) -> Vec<LoggedSet> {
    (0..count)
        .map(|index| {
            let primary = RAW_MUSCLES[index % RAW_MUSCLES.len()];
            let secondary = RAW_MUSCLES[(index * 3 + 1) % RAW_MUSCLES.len()];
            LoggedSet::for_muscles(&[primary], &[secondary])
        })
        .collect()
}

fn full_targets() -> BTreeMap<MuscleGroup, MuscleGroupTarget> {
    MuscleGroup::ALL
        .iter()
        .enumerate()
        .map(|(index, group)| {
            let priority = match index % 3 {
                0 => Priority::High,
                1 => Priority::Medium,
                _ => Priority::Low,
            };
            (
                *group,
                MuscleGroupTarget {
                    target_weekly_sets: 8 + (index as u32 % 10),
                    priority,
                },
            )
        })
        .collect()
}

fn bench_volume_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("volume_aggregation");

    for count in SET_COUNTS {
        let sets = generate_sets(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("aggregate", count), &sets, |b, sets| {
            b.iter(|| VolumeAggregator::aggregate(black_box(sets)));
        });
    }

    group.finish();
}

fn bench_evaluation(c: &mut Criterion) {
    let snapshot = VolumeAggregator::aggregate(&generate_sets(250));
    let targets = full_targets();
    let evaluator = AdherenceEvaluator::default();

    c.bench_function("evaluate_all_muscles", |b| {
        b.iter(|| evaluator.evaluate(black_box(&snapshot), black_box(&targets)));
    });
    c.bench_function("detect_imbalances", |b| {
        b.iter(|| ImbalanceRiskDetector::detect(black_box(&snapshot)));
    });
}

fn bench_flag_transitions(c: &mut Criterion) {
    let user_id = Uuid::new_v4();
    let now = Utc.with_ymd_and_hms(2025, 3, 16, 20, 0, 0).unwrap();
    let snapshot = VolumeAggregator::aggregate(&generate_sets(60));
    let evaluation = AdherenceEvaluator::default().evaluate(&snapshot, &full_targets());
    let open_flags: Vec<AdherenceFlag> = MuscleGroup::ALL
        .iter()
        .enumerate()
        .map(|(index, group)| AdherenceFlag {
            id: Uuid::new_v4(),
            user_id,
            muscle_group: *group,
            priority: Priority::Medium,
            target_weekly_sets: 10,
            actual_weekly_sets: 4,
            variance_percentage: -60.0,
            flagged_date: (now - Duration::days(index as i64)).date_naive(),
            status: FlagStatus::Monitoring,
            alerted_at: None,
            resolved_at: None,
            created_at: now - Duration::days(index as i64),
            updated_at: now,
        })
        .collect();
    let lifecycle = FlagLifecycleManager::default();

    c.bench_function("plan_transitions", |b| {
        b.iter(|| lifecycle.plan_transitions(black_box(&open_flags), black_box(&evaluation), now));
    });
}

criterion_group!(
    benches,
    bench_volume_aggregation,
    bench_evaluation,
    bench_flag_transitions,
);
criterion_main!(benches);
