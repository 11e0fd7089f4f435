// ABOUTME: Adherence flag repository implementation backed by the SQLite flag manager
// ABOUTME: Implements FlagRepository by delegating to Database flag operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::FlagRepository;
use crate::database::{Database, DatabaseError};
use adherence_core::models::{AdherenceFlag, FlagStatus};
use adherence_intelligence::FlagTransitions;

/// `SQLite` implementation of `FlagRepository`
pub struct FlagRepositoryImpl {
    db: Database,
}

impl FlagRepositoryImpl {
    /// Create a new `FlagRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FlagRepository for FlagRepositoryImpl {
    async fn list_open_flags(&self, user_id: Uuid) -> Result<Vec<AdherenceFlag>, DatabaseError> {
        self.db
            .flags()
            .list_open_flags(user_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn list_flags(
        &self,
        user_id: Uuid,
        status: Option<FlagStatus>,
    ) -> Result<Vec<AdherenceFlag>, DatabaseError> {
        self.db
            .flags()
            .list_flags(user_id, status)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn apply_transitions(
        &self,
        user_id: Uuid,
        transitions: &FlagTransitions,
        now: DateTime<Utc>,
    ) -> Result<Vec<AdherenceFlag>, DatabaseError> {
        self.db
            .flags()
            .apply_transitions(user_id, transitions, now)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }
}
