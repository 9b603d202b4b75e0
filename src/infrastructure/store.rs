//! Submission, section-progress and settings documents over a blob store
//!
//! Every mutation re-reads the current document, applies the change to that
//! fresh copy and writes the whole document back. The in-memory snapshot is
//! only replaced after the write succeeds, so it never runs ahead of durable
//! storage.

use crate::domain::{Category, DeadlineDay, Disposition, SectionProgress, Submission};
use crate::error::{BulletinError, Result};
use crate::infrastructure::BlobStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, info, warn};

pub const SUBMISSIONS_KEY: &str = "submissions.json";
pub const SECTIONS_KEY: &str = "sections.json";
pub const SETTINGS_KEY: &str = "settings.json";
pub const BACKUP_PREFIX: &str = "backups/";

/// Editorial settings kept alongside the submissions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub deadline_day: DeadlineDay,
}

/// Handle on the submission collection
#[derive(Debug)]
pub struct SubmissionStore<B: BlobStore> {
    blob: B,
    snapshot: Vec<Submission>,
}

impl<B: BlobStore> SubmissionStore<B> {
    pub fn new(blob: B) -> Self {
        SubmissionStore {
            blob,
            snapshot: Vec::new(),
        }
    }

    /// Reload the collection from durable storage
    pub fn refresh(&mut self) -> Result<&[Submission]> {
        self.snapshot = self.read_submissions()?;
        debug!(count = self.snapshot.len(), "loaded submissions");
        Ok(&self.snapshot)
    }

    /// Fresh copy of every submission
    pub fn all(&mut self) -> Result<Vec<Submission>> {
        Ok(self.refresh()?.to_vec())
    }

    /// Record one submission. On failure nothing is recorded.
    pub fn append(&mut self, submission: Submission) -> Result<Submission> {
        let mut next = self.read_submissions()?;
        next.push(submission.clone());
        self.commit(next)?;
        info!(id = %submission.id, category = submission.category.slug(), month = %submission.month, "recorded submission");
        Ok(submission)
    }

    /// Change one submission's disposition
    pub fn replace_disposition(&mut self, id: &str, disposition: Disposition) -> Result<Submission> {
        let mut next = self.read_submissions()?;
        let target = next
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| BulletinError::NotFound(format!("submission '{}'", id)))?;

        let previous = target.disposition;
        target.disposition = disposition;
        let updated = target.clone();

        self.commit(next)?;
        info!(id, from = %previous, to = %disposition, "changed disposition");
        Ok(updated)
    }

    /// Overwrite the whole collection
    pub fn replace_all(&mut self, submissions: Vec<Submission>) -> Result<()> {
        let count = submissions.len();
        self.commit(submissions)?;
        info!(count, "replaced all submissions");
        Ok(())
    }

    /// Saved progress for every section that has any
    pub fn sections(&self) -> Result<BTreeMap<Category, SectionProgress>> {
        let Some(bytes) = self.blob.get(SECTIONS_KEY)? else {
            return Ok(BTreeMap::new());
        };
        let value = parse_json(SECTIONS_KEY, &bytes)?;
        if !value.is_object() {
            return Err(BulletinError::malformed(SECTIONS_KEY, "expected a JSON object"));
        }
        serde_json::from_value(value).map_err(|e| BulletinError::malformed(SECTIONS_KEY, e.to_string()))
    }

    /// Saved progress for one section
    pub fn section(&self, category: Category) -> Result<Option<SectionProgress>> {
        Ok(self.sections()?.remove(&category))
    }

    /// Create or overwrite one section's progress
    pub fn save_section(&mut self, category: Category, progress: SectionProgress) -> Result<()> {
        let mut sections = self.sections()?;
        sections.insert(category, progress);
        self.write_json(SECTIONS_KEY, &sections)?;
        info!(category = category.slug(), "saved section progress");
        Ok(())
    }

    /// Overwrite all section progress
    pub fn replace_sections(&mut self, sections: BTreeMap<Category, SectionProgress>) -> Result<()> {
        self.write_json(SECTIONS_KEY, &sections)
    }

    /// Editorial settings; defaults when never saved
    pub fn settings(&self) -> Result<Settings> {
        let Some(bytes) = self.blob.get(SETTINGS_KEY)? else {
            return Ok(Settings::default());
        };
        let value = parse_json(SETTINGS_KEY, &bytes)?;
        if !value.is_object() {
            return Err(BulletinError::malformed(SETTINGS_KEY, "expected a JSON object"));
        }
        serde_json::from_value(value).map_err(|e| BulletinError::malformed(SETTINGS_KEY, e.to_string()))
    }

    pub fn save_settings(&mut self, settings: &Settings) -> Result<()> {
        self.write_json(SETTINGS_KEY, settings)?;
        info!(deadline_day = %settings.deadline_day, "saved settings");
        Ok(())
    }

    /// Copy the current submissions document under `backups/`.
    ///
    /// Returns the backup key, or `None` when there is nothing to back up.
    pub fn backup_submissions(&self, label: &str, now: DateTime<Utc>) -> Result<Option<String>> {
        let Some(bytes) = self.blob.get(SUBMISSIONS_KEY)? else {
            return Ok(None);
        };
        let key = format!(
            "{}submissions-{}-{}.json",
            BACKUP_PREFIX,
            now.format("%Y%m%d-%H%M%S"),
            label
        );
        self.blob.put(&key, &bytes)?;
        info!(key = %key, "backed up submissions");
        Ok(Some(key))
    }

    fn read_submissions(&self) -> Result<Vec<Submission>> {
        let Some(bytes) = self.blob.get(SUBMISSIONS_KEY)? else {
            return Ok(Vec::new());
        };
        let value = parse_json(SUBMISSIONS_KEY, &bytes)?;
        if !value.is_array() {
            return Err(BulletinError::malformed(SUBMISSIONS_KEY, "expected a JSON array"));
        }
        serde_json::from_value(value)
            .map_err(|e| BulletinError::malformed(SUBMISSIONS_KEY, e.to_string()))
    }

    fn commit(&mut self, next: Vec<Submission>) -> Result<()> {
        if let Err(e) = self.write_json(SUBMISSIONS_KEY, &next) {
            warn!(error = %e, "write failed; keeping last durable snapshot");
            return Err(e);
        }
        self.snapshot = next;
        Ok(())
    }

    fn write_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value).map_err(|e| {
            BulletinError::PersistenceFailure(format!("failed to encode '{}': {}", key, e))
        })?;
        self.blob.put(key, &bytes)
    }
}

fn parse_json(key: &str, bytes: &[u8]) -> Result<serde_json::Value> {
    serde_json::from_slice(bytes).map_err(|e| BulletinError::malformed(key, e.to_string()))
}
