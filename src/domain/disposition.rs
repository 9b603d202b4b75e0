//! Editor decisions on a submission

use crate::domain::MonthKey;
use crate::error::{BulletinError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

const BACKLOG: &str = "backlog";
const ARCHIVED: &str = "archived";
const PUBLISHED: &str = "published";

/// Where an editor has placed a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Disposition {
    /// Not yet reviewed
    #[default]
    Unset,
    /// Accepted for the given issue
    Assigned(MonthKey),
    /// Held for a future issue
    Backlog,
    /// Rejected or withdrawn
    Archived,
    /// Legacy terminal value from records written before issue-keyed
    /// dispositions existed. Read-only: never produced by editor action.
    Published,
}

impl Disposition {
    pub fn is_unset(&self) -> bool {
        matches!(self, Disposition::Unset)
    }

    /// True when accepted for exactly this issue
    pub fn is_assigned_to(&self, month: MonthKey) -> bool {
        matches!(self, Disposition::Assigned(m) if *m == month)
    }

    /// Parse a stored value. Unknown strings are rejected.
    pub fn from_stored(value: Option<&str>) -> Result<Self> {
        let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Ok(Disposition::Unset);
        };

        match raw {
            BACKLOG => Ok(Disposition::Backlog),
            ARCHIVED => Ok(Disposition::Archived),
            PUBLISHED => Ok(Disposition::Published),
            other => MonthKey::parse(other)
                .map(Disposition::Assigned)
                .map_err(|_| BulletinError::InvalidDisposition(format!("'{}'", other))),
        }
    }

    /// Parse a target chosen by an editor.
    ///
    /// Only month keys, `backlog` and `archived` are writable.
    pub fn parse_target(input: &str) -> Result<Self> {
        let normalized = input.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(BulletinError::InvalidDisposition(
                "a reviewed submission cannot be returned to unreviewed".to_string(),
            ));
        }
        match Disposition::from_stored(Some(&normalized))? {
            Disposition::Published => Err(BulletinError::InvalidDisposition(
                "'published' is a legacy value and cannot be set".to_string(),
            )),
            target => Ok(target),
        }
    }

    /// Stored representation; `None` for unset
    pub fn as_stored(&self) -> Option<String> {
        match self {
            Disposition::Unset => None,
            Disposition::Assigned(month) => Some(month.to_string()),
            Disposition::Backlog => Some(BACKLOG.to_string()),
            Disposition::Archived => Some(ARCHIVED.to_string()),
            Disposition::Published => Some(PUBLISHED.to_string()),
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_stored() {
            Some(value) => f.write_str(&value),
            None => f.write_str("unreviewed"),
        }
    }
}

impl Serialize for Disposition {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self.as_stored() {
            Some(value) => serializer.serialize_str(&value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Disposition {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Disposition::from_stored(raw.as_deref()).map_err(serde::de::Error::custom)
    }
}
