//! Submit use case

use crate::application::cycle::DeadlineDayCache;
use crate::domain::{Category, MonthCycle, Submission};
use crate::error::{BulletinError, Result};
use crate::infrastructure::{BlobStore, Clock, SubmissionStore};

/// Service for recording new submissions
pub struct SubmitService<B: BlobStore, C: Clock> {
    store: SubmissionStore<B>,
    clock: C,
    deadline_cache: DeadlineDayCache,
}

impl<B: BlobStore, C: Clock> SubmitService<B, C> {
    pub fn new(blob: B, clock: C) -> Self {
        SubmitService {
            store: SubmissionStore::new(blob),
            clock,
            deadline_cache: DeadlineDayCache::default(),
        }
    }

    /// Record a submission in the collection month active right now.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The content is blank
    /// - The settings document is malformed
    /// - The write fails (nothing is recorded)
    pub fn submit(
        &mut self,
        category: Category,
        content: &str,
        published_name: Option<&str>,
    ) -> Result<Submission> {
        let content = content.trim();
        if content.is_empty() {
            return Err(BulletinError::InvalidSubmission(
                "content must not be empty".to_string(),
            ));
        }

        let now = self.clock.now();
        let store = &self.store;
        let deadline_day = self
            .deadline_cache
            .get_or_load(now, || Ok(store.settings()?.deadline_day))?;
        let month = MonthCycle::new(deadline_day).current_collection_month(self.clock.today());

        let submission = Submission::new(
            category,
            content,
            now,
            month,
            published_name.map(str::to_string),
        );

        self.store.append(submission)
    }
}
