//! Month keys (`YYYY-MM`) used for collection periods and issue targets

use crate::error::{BulletinError, Result};
use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

fn month_key_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^(\d{4})-(0[1-9]|1[0-2])$").unwrap())
}

/// A calendar month, written `YYYY-MM`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    /// Build a key from a year and a 1-based month
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(1..=12).contains(&month) || !(0..=9999).contains(&year) {
            return Err(BulletinError::InvalidMonth(format!("{:04}-{:02}", year, month)));
        }
        Ok(MonthKey { year, month })
    }

    /// Parse a `YYYY-MM` string
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let caps = month_key_regex()
            .captures(trimmed)
            .ok_or_else(|| BulletinError::InvalidMonth(input.to_string()))?;

        let year: i32 = caps[1]
            .parse()
            .map_err(|_| BulletinError::InvalidMonth(input.to_string()))?;
        let month: u32 = caps[2]
            .parse()
            .map_err(|_| BulletinError::InvalidMonth(input.to_string()))?;

        Ok(MonthKey { year, month })
    }

    /// Month containing the given date
    pub fn of_date(date: NaiveDate) -> Self {
        MonthKey {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Shift by a signed number of calendar months
    pub fn add_months(&self, delta: i32) -> Self {
        let index = self.year * 12 + (self.month as i32 - 1) + delta;
        MonthKey {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }

    /// Signed number of months from `self` to `other`
    pub fn months_until(&self, other: MonthKey) -> i32 {
        (other.year - self.year) * 12 + (other.month as i32 - self.month as i32)
    }

    /// First day of this month
    pub fn first_day(&self) -> NaiveDate {
        // year/month are validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// A given day of this month; `None` when the day does not exist
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Human-readable form, e.g. "March 2026"
    pub fn long_name(&self) -> String {
        self.first_day().format("%B %Y").to_string()
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for MonthKey {
    type Err = BulletinError;

    fn from_str(s: &str) -> Result<Self> {
        MonthKey::parse(s)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MonthKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        MonthKey::parse(&raw).map_err(serde::de::Error::custom)
    }
}
