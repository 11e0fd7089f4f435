// ABOUTME: Structured error types for storage operations
// ABOUTME: Every store call returns these so partial failures stay visible and testable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use thiserror::Error;

/// Errors raised by the workout, program, flag, and plan stores
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Query or connection failure
    #[error("Database query failed: {context}")]
    QueryError {
        /// What was being attempted when the failure occurred
        context: String,
    },

    /// Entity lookup returned nothing
    #[error("{entity_type} not found: {entity_id}")]
    NotFound {
        /// Kind of entity
        entity_type: &'static str,
        /// Identifier that was looked up
        entity_id: String,
    },

    /// A stored row could not be decoded into a domain value
    #[error("Invalid stored data: {context}")]
    InvalidData {
        /// Which column or value was malformed
        context: String,
    },

    /// Schema migration failure
    #[error("Migration failed: {context}")]
    MigrationError {
        /// Migration runner output
        context: String,
    },
}
