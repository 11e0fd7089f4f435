// ABOUTME: Policy constants for adherence evaluation and imbalance detection
// ABOUTME: Thresholds, ratio limits, volume weights, and runtime defaults grouped by domain
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Variance thresholds (percent) below which a muscle group is flagged
pub mod thresholds {
    /// High priority muscles tolerate at most a 20% shortfall
    pub const HIGH_PRIORITY_VARIANCE_PERCENT: f64 = -20.0;
    /// Medium priority muscles tolerate at most a 30% shortfall
    pub const MEDIUM_PRIORITY_VARIANCE_PERCENT: f64 = -30.0;
    /// Low priority muscles tolerate at most a 40% shortfall
    pub const LOW_PRIORITY_VARIANCE_PERCENT: f64 = -40.0;
}

/// Antagonist-pair ratio limits
pub mod imbalance {
    /// Quad:hamstring ratio above which risk is reported as medium
    pub const QUAD_HAMSTRING_MEDIUM_RATIO: f64 = 1.5;
    /// Quad:hamstring ratio above which risk is reported as high
    pub const QUAD_HAMSTRING_HIGH_RATIO: f64 = 2.0;
    /// Push:pull ratio above which risk is reported as medium
    pub const PUSH_PULL_MEDIUM_RATIO: f64 = 1.2;
    /// Push:pull ratio above which risk is reported as high
    pub const PUSH_PULL_HIGH_RATIO: f64 = 1.5;
}

/// Per-set volume contributions
pub mod volume {
    /// Contribution of one set to each primary muscle
    pub const PRIMARY_MUSCLE_WEIGHT: f64 = 1.0;
    /// Contribution of one set to each secondary muscle
    pub const SECONDARY_MUSCLE_WEIGHT: f64 = 0.5;
}

/// Flag lifecycle and planning defaults
pub mod defaults {
    /// Days a flag must stay in monitoring before it escalates to an alert
    pub const ALERT_AFTER_DAYS: i64 = 7;
    /// Default length of a volume adjustment plan
    pub const ADJUSTMENT_PLAN_WEEKS: u32 = 4;
    /// Longest adjustment plan accepted; a ramp spans at most one training year
    pub const MAX_ADJUSTMENT_PLAN_WEEKS: u32 = 52;
    /// Smallest weekly increment an adjustment plan will prescribe
    pub const MIN_WEEKLY_INCREMENT: u32 = 1;
    /// Concurrent user checks in a batch run
    pub const WEEKLY_CHECK_CONCURRENCY: usize = 4;
    /// Per-user time budget for one weekly check
    pub const WEEKLY_CHECK_USER_TIMEOUT_SECS: u64 = 30;
    /// Default SQLite location
    pub const DATABASE_URL: &str = "sqlite:./data/adherence.db";
    /// Default connection pool size
    pub const DATABASE_MAX_CONNECTIONS: u32 = 5;
}

/// Structured error messages surfaced in check results
pub mod messages {
    /// Returned in place of a report when the user has no active program
    pub const NO_PROGRAM_FOUND: &str = "No program found for user";
}

/// Service identifiers used in structured logging
pub mod service_names {
    /// Name reported by the logging layer
    pub const ADHERENCE_MONITOR: &str = "training-adherence";
}
