//! Editorial review use cases: listing, disposition changes, stats

use crate::domain::{Category, Disposition, DispositionEngine, MonthKey, Submission};
use crate::error::{BulletinError, Result};
use crate::infrastructure::{BlobStore, SubmissionStore};
use std::collections::BTreeMap;

/// Service for editors working through submissions
pub struct ReviewService<B: BlobStore> {
    store: SubmissionStore<B>,
}

impl<B: BlobStore> ReviewService<B> {
    pub fn new(blob: B) -> Self {
        ReviewService {
            store: SubmissionStore::new(blob),
        }
    }

    /// Submissions relevant to `month`, newest first, optionally for one category
    pub fn submissions_for_month(
        &mut self,
        month: MonthKey,
        category: Option<Category>,
    ) -> Result<Vec<Submission>> {
        let snapshot = self.store.refresh()?;
        let engine = DispositionEngine::new(snapshot);
        let relevant = match category {
            Some(category) => engine.effective_for_category(category, month),
            None => engine.relevant_to(month),
        };
        Ok(relevant.into_iter().cloned().collect())
    }

    /// Backlogged submissions, newest first, optionally for one category
    pub fn backlog(&mut self, category: Option<Category>) -> Result<Vec<Submission>> {
        let snapshot = self.store.refresh()?;
        let engine = DispositionEngine::new(snapshot);
        let categories: Vec<Category> = match category {
            Some(category) => vec![category],
            None => Category::ALL.to_vec(),
        };
        Ok(categories
            .into_iter()
            .flat_map(|c| engine.backlog_for_category(c))
            .cloned()
            .collect())
    }

    /// Parse an editor-supplied target and apply it
    pub fn set_disposition(&mut self, id: &str, target: &str) -> Result<Submission> {
        let disposition = Disposition::parse_target(target)?;
        self.set_disposition_to(id, disposition)
    }

    /// Apply a disposition. Unset and the legacy `published` value are not writable.
    pub fn set_disposition_to(&mut self, id: &str, disposition: Disposition) -> Result<Submission> {
        match disposition {
            Disposition::Unset => Err(BulletinError::InvalidDisposition(
                "a reviewed submission cannot be returned to unreviewed".to_string(),
            )),
            Disposition::Published => Err(BulletinError::InvalidDisposition(
                "'published' is a legacy value and cannot be set".to_string(),
            )),
            _ => self.store.replace_disposition(id, disposition),
        }
    }

    /// Relevant submissions per category for `month`
    pub fn stats(&mut self, month: MonthKey) -> Result<BTreeMap<Category, usize>> {
        let snapshot = self.store.refresh()?;
        Ok(DispositionEngine::new(snapshot).stats_for_month(month))
    }

    /// Contributor names credited in `month`
    pub fn contributors(&mut self, month: MonthKey) -> Result<Vec<String>> {
        let snapshot = self.store.refresh()?;
        Ok(DispositionEngine::new(snapshot).contributors_for_month(month))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryBlobStore;
    use chrono::{TimeZone, Utc};

    fn month(s: &str) -> MonthKey {
        MonthKey::parse(s).unwrap()
    }

    fn seeded(items: &[(Category, &str)]) -> (MemoryBlobStore, Vec<Submission>) {
        let blob = MemoryBlobStore::new();
        let mut store = SubmissionStore::new(blob.clone());
        let mut created = Vec::new();
        for (i, (category, collected)) in items.iter().enumerate() {
            let s = Submission::new(
                *category,
                format!("item {}", i),
                Utc.with_ymd_and_hms(2025, 11, 1, 0, i as u32, 0).unwrap(),
                month(collected),
                None,
            );
            created.push(store.append(s).unwrap());
        }
        (blob, created)
    }

    #[test]
    fn test_routine_unset_only_in_its_collection_month() {
        let (blob, _) = seeded(&[(Category::RegularActivities, "2025-12")]);
        let mut review = ReviewService::new(blob);

        assert_eq!(
            review
                .submissions_for_month(month("2025-12"), None)
                .unwrap()
                .len(),
            1
        );
        assert!(review
            .submissions_for_month(month("2026-01"), None)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_set_disposition_moves_between_months() {
        let (blob, created) = seeded(&[(Category::Events, "2025-12")]);
        let mut review = ReviewService::new(blob);
        let id = &created[0].id;

        review.set_disposition(id, "2026-01").unwrap();
        assert!(review
            .submissions_for_month(month("2025-12"), None)
            .unwrap()
            .is_empty());
        assert_eq!(
            review
                .submissions_for_month(month("2026-01"), Some(Category::Events))
                .unwrap()
                .len(),
            1
        );

        review.set_disposition(id, "backlog").unwrap();
        assert_eq!(review.backlog(Some(Category::Events)).unwrap().len(), 1);
        assert!(review.backlog(Some(Category::Classifieds)).unwrap().is_empty());

        review.set_disposition(id, "archived").unwrap();
        assert!(review.backlog(None).unwrap().is_empty());

        // archived is not locked
        let updated = review.set_disposition(id, "2026-02").unwrap();
        assert_eq!(updated.disposition, Disposition::Assigned(month("2026-02")));
    }

    #[test]
    fn test_set_disposition_unknown_id() {
        let (blob, _) = seeded(&[(Category::Events, "2025-12")]);
        let mut review = ReviewService::new(blob);
        assert!(matches!(
            review.set_disposition("missing", "backlog"),
            Err(BulletinError::NotFound(_))
        ));
    }

    #[test]
    fn test_set_disposition_rejects_legacy_and_unset() {
        let (blob, created) = seeded(&[(Category::Events, "2025-12")]);
        let mut review = ReviewService::new(blob);
        let id = &created[0].id;

        assert!(matches!(
            review.set_disposition(id, "published"),
            Err(BulletinError::InvalidDisposition(_))
        ));
        assert!(matches!(
            review.set_disposition_to(id, Disposition::Unset),
            Err(BulletinError::InvalidDisposition(_))
        ));
        assert!(matches!(
            review.set_disposition(id, "soon"),
            Err(BulletinError::InvalidDisposition(_))
        ));
    }

    #[test]
    fn test_stats_and_contributors() {
        let blob = MemoryBlobStore::new();
        let mut store = SubmissionStore::new(blob.clone());
        let jan = month("2026-01");
        for name in ["Priya", "ben", "Priya"] {
            store
                .append(Submission::new(
                    Category::Announcements,
                    "news",
                    Utc::now(),
                    jan,
                    Some(name.to_string()),
                ))
                .unwrap();
        }

        let mut review = ReviewService::new(blob);
        let stats = review.stats(jan).unwrap();
        assert_eq!(stats[&Category::Announcements], 3);
        assert_eq!(stats[&Category::Events], 0);
        assert_eq!(
            review.contributors(jan).unwrap(),
            vec!["ben".to_string(), "Priya".to_string()]
        );
    }
}
