//! Section draft use cases

use crate::domain::{build_draft, Category, DispositionEngine, MonthKey, SectionProgress};
use crate::error::Result;
use crate::infrastructure::{BlobStore, Clock, SubmissionStore};
use std::collections::BTreeMap;

/// Service for editor drafts of each newsletter section
pub struct SectionService<B: BlobStore, C: Clock> {
    store: SubmissionStore<B>,
    clock: C,
}

impl<B: BlobStore, C: Clock> SectionService<B, C> {
    pub fn new(blob: B, clock: C) -> Self {
        SectionService {
            store: SubmissionStore::new(blob),
            clock,
        }
    }

    /// Save the editor's merged text for a section and its completion flag.
    ///
    /// Blank content clears the saved edit so the draft is rebuilt from
    /// accepted submissions again.
    pub fn save_section_draft(
        &mut self,
        category: Category,
        content: &str,
        complete: bool,
    ) -> Result<SectionProgress> {
        let progress = SectionProgress {
            is_complete: complete,
            edited_content: Some(content.to_string()).filter(|c| !c.trim().is_empty()),
            updated_at: self.clock.now(),
        };
        self.store.save_section(category, progress.clone())?;
        Ok(progress)
    }

    /// Starting draft for a section of issue `month`
    pub fn draft(&mut self, category: Category, month: MonthKey) -> Result<String> {
        let progress = self.store.section(category)?;
        let snapshot = self.store.refresh()?;
        let engine = DispositionEngine::new(snapshot);
        Ok(build_draft(&engine, category, month, progress.as_ref()))
    }

    /// Saved progress for every section that has any
    pub fn progress(&self) -> Result<BTreeMap<Category, SectionProgress>> {
        self.store.sections()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Disposition, Submission};
    use crate::infrastructure::{FixedClock, MemoryBlobStore};
    use chrono::{TimeZone, Utc};

    fn clock() -> FixedClock {
        FixedClock(Utc.with_ymd_and_hms(2026, 1, 10, 9, 0, 0).unwrap())
    }

    #[test]
    fn test_draft_from_accepted_then_saved_edit() {
        let blob = MemoryBlobStore::new();
        let feb = MonthKey::parse("2026-02").unwrap();
        let mut store = SubmissionStore::new(blob.clone());
        let mut s = Submission::new(Category::ParishCouncil, "Minutes", Utc::now(), feb, None);
        s.disposition = Disposition::Assigned(feb);
        store.append(s).unwrap();

        let mut sections = SectionService::new(blob, clock());
        assert_eq!(sections.draft(Category::ParishCouncil, feb).unwrap(), "Minutes");

        sections
            .save_section_draft(Category::ParishCouncil, "Minutes (edited)", true)
            .unwrap();
        assert_eq!(
            sections.draft(Category::ParishCouncil, feb).unwrap(),
            "Minutes (edited)"
        );

        let progress = sections.progress().unwrap();
        assert!(progress[&Category::ParishCouncil].is_complete);
    }

    #[test]
    fn test_blank_save_clears_edit() {
        let mut sections = SectionService::new(MemoryBlobStore::new(), clock());
        let progress = sections
            .save_section_draft(Category::Events, "  ", false)
            .unwrap();
        assert_eq!(progress.edited_content, None);
        assert_eq!(progress.updated_at, clock().0);
    }
}
