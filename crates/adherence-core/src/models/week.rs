// ABOUTME: Date window used for weekly volume aggregation
// ABOUTME: Defaults to the ISO week (Monday through Sunday) containing a given date
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive date range of a weekly check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingWeek {
    /// First day (inclusive)
    pub start: NaiveDate,
    /// Last day (inclusive)
    pub end: NaiveDate,
}

impl TrainingWeek {
    /// Create a custom range
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when `start` is after `end`
    pub fn new(start: NaiveDate, end: NaiveDate) -> AppResult<Self> {
        if start > end {
            return Err(AppError::invalid_input(format!(
                "week start {start} is after week end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// ISO week (Monday to Sunday) that contains `date`
    #[must_use]
    pub fn containing(date: NaiveDate) -> Self {
        let offset = i64::from(date.weekday().num_days_from_monday());
        let start = date - Duration::days(offset);
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    /// Lower bound of the window as a timestamp (inclusive)
    #[must_use]
    pub fn starts_at(&self) -> DateTime<Utc> {
        self.start.and_time(NaiveTime::MIN).and_utc()
    }

    /// Upper bound of the window as a timestamp (exclusive, midnight after `end`)
    #[must_use]
    pub fn ends_before(&self) -> DateTime<Utc> {
        (self.end + Duration::days(1)).and_time(NaiveTime::MIN).and_utc()
    }

    /// Whether a timestamp falls in the window
    #[must_use]
    pub fn contains(&self, at: DateTime<Utc>) -> bool {
        at >= self.starts_at() && at < self.ends_before()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_containing_starts_on_monday() {
        // 2025-03-13 is a Thursday
        let week = TrainingWeek::containing(date(2025, 3, 13));
        assert_eq!(week.start, date(2025, 3, 10));
        assert_eq!(week.end, date(2025, 3, 16));
    }

    #[test]
    fn test_containing_sunday_stays_in_same_week() {
        let week = TrainingWeek::containing(date(2025, 3, 16));
        assert_eq!(week.start, date(2025, 3, 10));
    }

    #[test]
    fn test_contains_is_end_inclusive_by_day() {
        let week = TrainingWeek::containing(date(2025, 3, 10));
        let late_sunday = date(2025, 3, 16).and_hms_opt(23, 59, 59).unwrap().and_utc();
        let next_monday = date(2025, 3, 17).and_time(NaiveTime::MIN).and_utc();
        assert!(week.contains(late_sunday));
        assert!(!week.contains(next_monday));
    }

    #[test]
    fn test_new_rejects_inverted_range() {
        assert!(TrainingWeek::new(date(2025, 3, 16), date(2025, 3, 10)).is_err());
    }
}
