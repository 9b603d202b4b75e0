//! Newsletter sections and their temporal kinds

use crate::error::{BulletinError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Temporal family a category belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    /// Standing content that stays relevant across cycles
    Routine,
    /// One-shot posts for a single issue
    Community,
    /// Standing content from committees
    Committee,
}

impl CategoryKind {
    /// Evergreen kinds carry content across cycles until an editor places it
    pub fn is_evergreen(&self) -> bool {
        matches!(self, CategoryKind::Routine | CategoryKind::Committee)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Routine => "routine",
            CategoryKind::Community => "community",
            CategoryKind::Committee => "committee",
        }
    }
}

impl FromStr for CategoryKind {
    type Err = BulletinError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "routine" => Ok(CategoryKind::Routine),
            "community" => Ok(CategoryKind::Community),
            "committee" => Ok(CategoryKind::Committee),
            _ => Err(BulletinError::InvalidCategory(format!(
                "unknown kind '{}' (expected routine, community or committee)",
                s
            ))),
        }
    }
}

/// Newsletter section a submission is filed under
///
/// Declaration order is export order: routine sections, then community,
/// then committee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    RegularActivities,
    LocalServices,
    Announcements,
    Events,
    Classifieds,
    LostAndFound,
    ParishCouncil,
    CommitteeNews,
}

impl Category {
    /// Every category, in export order
    pub const ALL: [Category; 8] = [
        Category::RegularActivities,
        Category::LocalServices,
        Category::Announcements,
        Category::Events,
        Category::Classifieds,
        Category::LostAndFound,
        Category::ParishCouncil,
        Category::CommitteeNews,
    ];

    pub fn kind(&self) -> CategoryKind {
        match self {
            Category::RegularActivities | Category::LocalServices => CategoryKind::Routine,
            Category::Announcements
            | Category::Events
            | Category::Classifieds
            | Category::LostAndFound => CategoryKind::Community,
            Category::ParishCouncil | Category::CommitteeNews => CategoryKind::Committee,
        }
    }

    pub fn is_evergreen(&self) -> bool {
        self.kind().is_evergreen()
    }

    /// Stable identifier used in storage and on the command line
    pub fn slug(&self) -> &'static str {
        match self {
            Category::RegularActivities => "regular-activities",
            Category::LocalServices => "local-services",
            Category::Announcements => "announcements",
            Category::Events => "events",
            Category::Classifieds => "classifieds",
            Category::LostAndFound => "lost-and-found",
            Category::ParishCouncil => "parish-council",
            Category::CommitteeNews => "committee-news",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Category::RegularActivities => "Regular Activities",
            Category::LocalServices => "Local Services",
            Category::Announcements => "Announcements",
            Category::Events => "Events",
            Category::Classifieds => "Classifieds",
            Category::LostAndFound => "Lost and Found",
            Category::ParishCouncil => "Parish Council",
            Category::CommitteeNews => "Committee News",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for Category {
    type Err = BulletinError;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.slug() == normalized || c.display_name().to_lowercase() == normalized)
            .ok_or_else(|| BulletinError::InvalidCategory(s.to_string()))
    }
}
