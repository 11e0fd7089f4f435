// ABOUTME: Re-exports command modules for adherence-cli
// ABOUTME: Provides weekly check, adjustment plan, and flag listing commands
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub mod check;
pub mod flags;
pub mod plan;
