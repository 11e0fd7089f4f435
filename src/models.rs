// ABOUTME: Core data models for the adherence monitor re-exported from adherence-core
// ABOUTME: Muscle groups, program targets, workouts, flags, and adjustment plans
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use adherence_core::models::*;
