//! Collection month and deadline resolution
//!
//! Submissions received on or before the deadline day of a month are
//! collected for next month's issue. Once the deadline has passed, that issue
//! is locked and new submissions go to the issue after it.

use crate::domain::MonthKey;
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Default day of the month on which submissions close
pub const DEFAULT_DEADLINE_DAY: u32 = 20;

/// Highest deadline day allowed; every month has at least 28 days
pub const MAX_DEADLINE_DAY: u32 = 28;

/// Day of the month on which the next issue closes (1..=28)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineDay(u32);

impl DeadlineDay {
    /// Clamp any integer into the valid 1..=28 range
    pub fn clamped(day: i64) -> Self {
        DeadlineDay(day.clamp(1, MAX_DEADLINE_DAY as i64) as u32)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for DeadlineDay {
    fn default() -> Self {
        DeadlineDay(DEFAULT_DEADLINE_DAY)
    }
}

impl fmt::Display for DeadlineDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for DeadlineDay {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.0)
    }
}

impl<'de> Deserialize<'de> for DeadlineDay {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Ok(DeadlineDay::clamped(raw))
    }
}

/// The closing date for one issue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Deadline {
    /// Issue the deadline belongs to
    pub issue: MonthKey,
    /// Last day submissions are accepted for that issue
    pub date: NaiveDate,
}

impl fmt::Display for Deadline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} issue: deadline {}",
            self.issue.long_name(),
            self.date.format("%-d %B %Y")
        )
    }
}

/// Pure resolver for collection months, parameterised by the deadline day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonthCycle {
    deadline_day: DeadlineDay,
}

impl MonthCycle {
    pub fn new(deadline_day: DeadlineDay) -> Self {
        MonthCycle { deadline_day }
    }

    pub fn deadline_day(&self) -> DeadlineDay {
        self.deadline_day
    }

    /// Month currently accepting submissions
    ///
    /// One month ahead of `today` up to and including the deadline day,
    /// two months ahead after it.
    pub fn current_collection_month(&self, today: NaiveDate) -> MonthKey {
        let offset = if today.day() > self.deadline_day.get() {
            2
        } else {
            1
        };
        MonthKey::of_date(today).add_months(offset)
    }

    /// Collection month one cycle before the current one
    pub fn previous_collection_month(&self, today: NaiveDate) -> MonthKey {
        self.current_collection_month(today).add_months(-1)
    }

    /// Deadline for a given issue: the deadline day of the month before it
    pub fn deadline_for(&self, issue: MonthKey) -> Deadline {
        let date = issue
            .add_months(-1)
            .day(self.deadline_day.get())
            .unwrap_or_else(|| issue.add_months(-1).first_day());
        Deadline { issue, date }
    }

    /// Deadline for the issue currently collecting submissions
    pub fn next_deadline(&self, today: NaiveDate) -> Deadline {
        self.deadline_for(self.current_collection_month(today))
    }
}
