// ABOUTME: Volume adjustment plan commands for adherence-cli
// ABOUTME: Handles create, list, complete, and cancel operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use training_adherence::database::Database;
use training_adherence::errors::AppResult;
use training_adherence::models::PlanStatus;
use training_adherence::services::AdjustmentPlanService;
use uuid::Uuid;

use crate::helpers::display::{display_plan, print_json};

/// Create a plan and show its weekly ramp
pub async fn create(
    database: &Database,
    user_id: Uuid,
    muscle: &str,
    current: i64,
    target: i64,
    weeks: Option<i64>,
    json: bool,
) -> AppResult<()> {
    let service = AdjustmentPlanService::from_database(database);
    let plan = service
        .create_adjustment_plan(user_id, muscle, current, target, weeks)
        .await?;

    if json {
        print_json(&plan)
    } else {
        println!("Created volume adjustment plan");
        display_plan(&plan);
        Ok(())
    }
}

/// List a user's plans
pub async fn list(
    database: &Database,
    user_id: Uuid,
    status: Option<PlanStatus>,
    json: bool,
) -> AppResult<()> {
    let plans = AdjustmentPlanService::from_database(database)
        .list_plans(user_id, status)
        .await?;

    if json {
        return print_json(&plans);
    }
    if plans.is_empty() {
        println!("No adjustment plans found for {user_id}");
    }
    for plan in &plans {
        display_plan(plan);
    }
    Ok(())
}

/// Complete or cancel an active plan
pub async fn close(
    database: &Database,
    plan_id: Uuid,
    status: PlanStatus,
    json: bool,
) -> AppResult<()> {
    let plan = AdjustmentPlanService::from_database(database)
        .update_plan_status(plan_id, status, Utc::now())
        .await?;

    if json {
        print_json(&plan)
    } else {
        println!("Plan {plan_id} is now {status}");
        Ok(())
    }
}
