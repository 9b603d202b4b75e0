//! Submission records and per-section editing progress

use crate::domain::{Category, Disposition, MonthKey};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One newsletter submission
///
/// Identity, content and collection month are fixed at creation; only the
/// disposition changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub category: Category,
    pub content: String,
    pub submitted_at: DateTime<Utc>,
    /// Collection period active when the submission was received
    pub month: MonthKey,
    #[serde(default, skip_serializing_if = "Disposition::is_unset")]
    pub disposition: Disposition,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_name: Option<String>,
}

impl Submission {
    /// Create an unreviewed submission with a fresh id
    pub fn new(
        category: Category,
        content: impl Into<String>,
        submitted_at: DateTime<Utc>,
        month: MonthKey,
        published_name: Option<String>,
    ) -> Self {
        Submission {
            id: uuid::Uuid::new_v4().to_string(),
            category,
            content: content.into(),
            submitted_at,
            month,
            disposition: Disposition::Unset,
            published_name: published_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        }
    }

    /// Attribution, if a non-blank one was given
    pub fn contributor(&self) -> Option<&str> {
        self.published_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
    }
}

/// Editor progress on one newsletter section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionProgress {
    pub is_complete: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub edited_content: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl SectionProgress {
    /// Hand-edited draft, when one with real content was saved
    pub fn saved_draft(&self) -> Option<&str> {
        self.edited_content
            .as_deref()
            .filter(|content| !content.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn submitted_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 12, 3, 9, 30, 0).unwrap()
    }

    #[test]
    fn test_new_submission_is_unreviewed_with_unique_id() {
        let month = MonthKey::parse("2026-01").unwrap();
        let a = Submission::new(Category::Events, "Quiz night", submitted_at(), month, None);
        let b = Submission::new(Category::Events, "Quiz night", submitted_at(), month, None);
        assert_eq!(a.disposition, Disposition::Unset);
        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_blank_published_name_dropped() {
        let month = MonthKey::parse("2026-01").unwrap();
        let s = Submission::new(
            Category::Events,
            "x",
            submitted_at(),
            month,
            Some("   ".to_string()),
        );
        assert_eq!(s.published_name, None);
        assert_eq!(s.contributor(), None);
    }

    #[test]
    fn test_json_shape() {
        let month = MonthKey::parse("2026-01").unwrap();
        let mut s = Submission::new(
            Category::Classifieds,
            "Bike for sale",
            submitted_at(),
            month,
            Some("Sam".to_string()),
        );
        s.id = "abc".to_string();

        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["id"], "abc");
        assert_eq!(value["category"], "classifieds");
        assert_eq!(value["month"], "2026-01");
        assert_eq!(value["publishedName"], "Sam");
        assert!(value.get("submittedAt").is_some());
        assert!(value.get("disposition").is_none());

        s.disposition = Disposition::Backlog;
        let value = serde_json::to_value(&s).unwrap();
        assert_eq!(value["disposition"], "backlog");
    }

    #[test]
    fn test_reads_legacy_record() {
        let json = r#"{
            "id": "old-1",
            "category": "regular-activities",
            "content": "Choir practice every Tuesday",
            "submittedAt": "2025-11-02T10:00:00Z",
            "month": "2025-12",
            "disposition": "published"
        }"#;
        let s: Submission = serde_json::from_str(json).unwrap();
        assert_eq!(s.disposition, Disposition::Published);
        assert_eq!(s.published_name, None);
    }

    #[test]
    fn test_saved_draft_ignores_blank() {
        let mut progress = SectionProgress {
            is_complete: false,
            edited_content: Some("  \n".to_string()),
            updated_at: submitted_at(),
        };
        assert_eq!(progress.saved_draft(), None);
        progress.edited_content = Some("Edited".to_string());
        assert_eq!(progress.saved_draft(), Some("Edited"));
    }
}
