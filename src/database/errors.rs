// ABOUTME: Structured error types for database operations re-exported from adherence-core
// ABOUTME: Provides domain-specific errors with context for repository implementations
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use adherence_core::errors::database::*;
