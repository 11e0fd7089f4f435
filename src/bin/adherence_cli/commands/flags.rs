// ABOUTME: Adherence flag commands for adherence-cli
// ABOUTME: Lists a user's flags with optional status filtering
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::Utc;
use training_adherence::database::Database;
use training_adherence::errors::AppResult;
use training_adherence::models::FlagStatus;
use uuid::Uuid;

use crate::helpers::display::{display_flags, print_json};

/// List a user's flags
pub async fn list(
    database: &Database,
    user_id: Uuid,
    status: Option<FlagStatus>,
    json: bool,
) -> AppResult<()> {
    let flags = database.flags().list_flags(user_id, status).await?;

    if json {
        print_json(&flags)
    } else {
        display_flags(&flags, Utc::now().date_naive());
        Ok(())
    }
}
