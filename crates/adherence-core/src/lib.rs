// ABOUTME: Core types and constants for the training adherence monitor
// ABOUTME: Foundation crate with error handling, domain models, and policy constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Adherence Core
//!
//! Foundation crate providing shared types and constants for program adherence
//! and training-load imbalance monitoring. This crate is designed to change
//! infrequently, enabling incremental compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode`, and `DatabaseError`
//! - **constants**: Priority thresholds, imbalance ratios, and volume weights
//! - **models**: Muscle groups, priorities, adherence flags, and adjustment plans

/// Unified error handling system with standard error codes
pub mod errors;

/// Policy constants organized by domain
pub mod constants;

/// Core data models (`MuscleGroup`, `AdherenceFlag`, `VolumeAdjustmentPlan`, etc.)
pub mod models;
