// ABOUTME: Output formatting helpers for adherence-cli
// ABOUTME: Renders check outcomes, batch summaries, plans, and flags as text or JSON
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::NaiveDate;
use serde::Serialize;
use training_adherence::errors::AppResult;
use training_adherence::models::{AdherenceFlag, VolumeAdjustmentPlan};
use training_adherence::services::{BatchSummary, WeeklyCheckOutcome};

/// Print any serializable value as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Display one user's weekly check
pub fn display_outcome(outcome: &WeeklyCheckOutcome) {
    let report = match outcome {
        WeeklyCheckOutcome::Completed(report) => report,
        WeeklyCheckOutcome::NoProgram { user_id, error } => {
            println!("{user_id}: {error}");
            return;
        }
    };

    println!(
        "\nWeekly check for {} ({} to {})",
        report.user_id, report.week.start, report.week.end
    );
    println!("{}", "=".repeat(72));
    println!(
        "{:<14} {:>8} {:>8} {:>10} {:>8}  STATUS",
        "MUSCLE", "ACTUAL", "TARGET", "VARIANCE", "PRIORITY"
    );
    for muscle in &report.muscles {
        println!(
            "{:<14} {:>8} {:>8} {:>9.1}% {:>8}  {}",
            muscle.muscle_group.as_str(),
            muscle.actual_weekly_sets,
            muscle.target_weekly_sets,
            muscle.variance_percentage,
            muscle.priority.as_str(),
            if muscle.below_threshold { "UNDER" } else { "ok" }
        );
    }

    println!(
        "\nFlags: {} created, {} updated, {} resolved",
        report.flags_created.len(),
        report.flags_updated.len(),
        report.flags_resolved.len()
    );
    for alert in &report.alerts_to_send {
        println!(
            "ALERT {}: {} of {} sets ({:.1}%) since {}",
            alert.muscle_group,
            alert.actual_weekly_sets,
            alert.target_weekly_sets,
            alert.variance_percentage,
            alert.flagged_date
        );
    }
    for risk in &report.imbalance_risks {
        println!(
            "RISK ({:?}, ratio {:.2}): {}",
            risk.severity, risk.ratio, risk.recommendation
        );
    }
    if report.needs_user_action {
        println!("\nAction needed: notify the user.");
    }
}

/// Display a batch run summary
pub fn display_batch_summary(summary: &BatchSummary) {
    println!("\nWeekly check batch");
    println!("{}", "=".repeat(72));
    println!("Checked:     {}", summary.checked);
    println!("No program:  {}", summary.no_program.len());
    println!("Failed:      {}", summary.failed.len());
    println!("Timed out:   {}", summary.timed_out.len());
    println!("Alerts:      {}", summary.alert_count());

    for report in summary.needing_action() {
        println!(
            "  {}: {} alert(s), {} imbalance risk(s)",
            report.user_id,
            report.alerts_to_send.len(),
            report.imbalance_risks.len()
        );
    }
    for failure in &summary.failed {
        println!("  FAILED {}: {}", failure.user_id, failure.error);
    }
    for user_id in &summary.timed_out {
        println!("  TIMED OUT {user_id}");
    }
}

/// Display a plan with its projected weekly sets
pub fn display_plan(plan: &VolumeAdjustmentPlan) {
    let schedule = plan
        .weekly_schedule()
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(" -> ");

    println!(
        "{} [{}] {}: {} -> {} sets over {} weeks (+{}/week), {} to {}",
        plan.id,
        plan.status,
        plan.muscle_group,
        plan.current_weekly_sets,
        plan.target_weekly_sets,
        plan.duration_weeks,
        plan.weekly_increment,
        plan.start_date,
        plan.end_date
    );
    println!("   Weekly sets: {schedule}");
}

/// Display flags with their age
pub fn display_flags(flags: &[AdherenceFlag], today: NaiveDate) {
    if flags.is_empty() {
        println!("No adherence flags found");
        return;
    }
    for flag in flags {
        println!(
            "{} {:<10} {:<14} {:>3}/{:<3} sets {:>7.1}%  flagged {} ({} days)",
            flag.id,
            flag.status.as_str(),
            flag.muscle_group.as_str(),
            flag.actual_weekly_sets,
            flag.target_weekly_sets,
            flag.variance_percentage,
            flag.flagged_date,
            flag.days_flagged(today)
        );
    }
}
