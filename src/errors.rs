// ABOUTME: Unified error handling re-exported from adherence-core
// ABOUTME: Keeps crate::errors paths stable for the binary and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use adherence_core::errors::*;
