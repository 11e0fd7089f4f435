// ABOUTME: Program repository implementation backed by the SQLite program manager
// ABOUTME: Implements ProgramRepository by delegating to Database program operations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use async_trait::async_trait;
use uuid::Uuid;

use super::ProgramRepository;
use crate::database::{Database, DatabaseError};
use adherence_core::models::ProgramRecord;

/// `SQLite` implementation of `ProgramRepository`
pub struct ProgramRepositoryImpl {
    db: Database,
}

impl ProgramRepositoryImpl {
    /// Create a new `ProgramRepository` with the given database connection
    #[must_use]
    pub const fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ProgramRepository for ProgramRepositoryImpl {
    async fn get_active_program(
        &self,
        user_id: Uuid,
    ) -> Result<Option<ProgramRecord>, DatabaseError> {
        self.db
            .programs()
            .get_active_program(user_id)
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }

    async fn list_users_with_active_program(&self) -> Result<Vec<Uuid>, DatabaseError> {
        self.db
            .programs()
            .list_users_with_active_program()
            .await
            .map_err(|e| DatabaseError::QueryError {
                context: e.to_string(),
            })
    }
}
