// ABOUTME: Configuration management module for the adherence monitor
// ABOUTME: Loads database, threshold, and batch settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! - **Environment**: monitor configuration from environment variables
//! - **Check settings**: thresholds, alert delay, and batch limits consumed by
//!   the weekly check services

/// Environment-driven monitor configuration
pub mod environment;

pub use environment::{CheckSettings, DatabaseConfig, Environment, MonitorConfig};
