//! Export and import use cases

use crate::domain::{export_newsletter_text, Category, DispositionEngine, MonthKey};
use crate::domain::{SectionProgress, Submission};
use crate::error::{BulletinError, Result};
use crate::infrastructure::{BlobStore, Clock, SubmissionStore};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Everything the engine stores, in one document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub submissions: Vec<Submission>,
    #[serde(default)]
    pub section_progress: BTreeMap<Category, SectionProgress>,
}

impl ExportBundle {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| BulletinError::Config(format!("Failed to serialize export: {}", e)))
    }

    pub fn from_json(input: &str) -> Result<Self> {
        serde_json::from_str(input).map_err(|e| BulletinError::malformed("import", e.to_string()))
    }
}

/// Result of an import
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub submissions: usize,
    pub sections: usize,
    pub backup: Option<String>,
}

/// Service producing newsletter text and full-store exports
pub struct ExportService<B: BlobStore, C: Clock> {
    store: SubmissionStore<B>,
    clock: C,
}

impl<B: BlobStore, C: Clock> ExportService<B, C> {
    pub fn new(blob: B, clock: C) -> Self {
        ExportService {
            store: SubmissionStore::new(blob),
            clock,
        }
    }

    /// Newsletter text for issue `month`
    pub fn export_text(&mut self, month: MonthKey) -> Result<String> {
        let snapshot = self.store.refresh()?;
        Ok(export_newsletter_text(&DispositionEngine::new(snapshot), month))
    }

    /// Every submission and all section progress
    pub fn export_all(&mut self) -> Result<ExportBundle> {
        let section_progress = self.store.sections()?;
        Ok(ExportBundle {
            submissions: self.store.all()?,
            section_progress,
        })
    }

    /// Replace the stored documents with a bundle.
    ///
    /// The current submissions document is backed up first. If the sections
    /// write fails, the previous submissions are written back before the
    /// error is returned.
    pub fn import(&mut self, bundle: ExportBundle) -> Result<ImportSummary> {
        let previous = self.store.all()?;
        let backup = self.store.backup_submissions("import", self.clock.now())?;

        let summary = ImportSummary {
            submissions: bundle.submissions.len(),
            sections: bundle.section_progress.len(),
            backup,
        };

        self.store.replace_all(bundle.submissions)?;
        if let Err(e) = self.store.replace_sections(bundle.section_progress) {
            warn!(error = %e, "sections write failed; restoring previous submissions");
            self.store.replace_all(previous)?;
            return Err(e);
        }

        info!(
            submissions = summary.submissions,
            sections = summary.sections,
            "imported bundle"
        );
        Ok(summary)
    }
}
