//! Maintenance procedures for stored submissions.
//!
//! These rewrite stored values outside the normal editorial workflow and only
//! run when invoked explicitly. Each one is planned first; applying a plan
//! backs up the submissions document and writes the whole collection back.

use crate::domain::{CategoryKind, Disposition, MonthKey, Submission};
use crate::error::Result;
use crate::infrastructure::{BlobStore, Clock, SubmissionStore};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

/// One planned rewrite
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepairEdit {
    SetDisposition(Disposition),
    SetMonth(MonthKey),
}

/// A rewrite of a single submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairChange {
    pub id: String,
    pub before: String,
    pub edit: RepairEdit,
}

impl fmt::Display for RepairChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.edit {
            RepairEdit::SetDisposition(d) => {
                write!(f, "{}: disposition {} -> {}", self.id, self.before, d)
            }
            RepairEdit::SetMonth(m) => write!(f, "{}: month {} -> {}", self.id, self.before, m),
        }
    }
}

/// Changes a repair would make
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairPlan {
    pub label: &'static str,
    pub changes: Vec<RepairChange>,
}

impl RepairPlan {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Outcome of applying a plan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairReport {
    pub applied: usize,
    pub backup: Option<String>,
}

pub struct RepairService<B: BlobStore, C: Clock> {
    store: SubmissionStore<B>,
    clock: C,
}

impl<B: BlobStore, C: Clock> RepairService<B, C> {
    pub fn new(blob: B, clock: C) -> Self {
        RepairService {
            store: SubmissionStore::new(blob),
            clock,
        }
    }

    /// Plan: legacy `published` becomes an assignment to the submission's own month
    pub fn plan_retarget_published(&mut self) -> Result<RepairPlan> {
        let changes = self
            .store
            .refresh()?
            .iter()
            .filter(|s| s.disposition == Disposition::Published)
            .map(|s| RepairChange {
                id: s.id.clone(),
                before: s.disposition.to_string(),
                edit: RepairEdit::SetDisposition(Disposition::Assigned(s.month)),
            })
            .collect();

        Ok(RepairPlan {
            label: "retarget-published",
            changes,
        })
    }

    /// Plan: unreviewed submissions collected in `from` move to collection month `to`
    pub fn plan_move_month(
        &mut self,
        from: MonthKey,
        to: MonthKey,
        kind: Option<CategoryKind>,
    ) -> Result<RepairPlan> {
        let matches = |s: &Submission| {
            s.month == from
                && s.disposition.is_unset()
                && kind.map_or(true, |k| s.category.kind() == k)
        };

        let changes = if from == to {
            Vec::new()
        } else {
            self.store
                .refresh()?
                .iter()
                .filter(|s| matches(*s))
                .map(|s| RepairChange {
                    id: s.id.clone(),
                    before: s.month.to_string(),
                    edit: RepairEdit::SetMonth(to),
                })
                .collect()
        };

        Ok(RepairPlan {
            label: "move-month",
            changes,
        })
    }

    /// Apply a plan to the current collection.
    ///
    /// Each change is re-checked against the freshly read record; submissions
    /// that disappeared or no longer match the plan are skipped.
    pub fn apply(&mut self, plan: &RepairPlan) -> Result<RepairReport> {
        if plan.is_empty() {
            return Ok(RepairReport {
                applied: 0,
                backup: None,
            });
        }

        let changes: HashMap<&str, &RepairChange> = plan
            .changes
            .iter()
            .map(|c| (c.id.as_str(), c))
            .collect();

        let mut submissions = self.store.all()?;
        let mut applied = 0;
        for submission in submissions.iter_mut() {
            let Some(change) = changes.get(submission.id.as_str()) else {
                continue;
            };
            match &change.edit {
                RepairEdit::SetDisposition(d)
                    if submission.disposition.to_string() == change.before =>
                {
                    submission.disposition = *d
                }
                RepairEdit::SetMonth(m)
                    if submission.disposition.is_unset()
                        && submission.month.to_string() == change.before =>
                {
                    submission.month = *m
                }
                _ => {
                    debug!(id = %submission.id, "changed since planning; skipped");
                    continue;
                }
            }
            applied += 1;
        }

        let backup = self.store.backup_submissions(plan.label, self.clock.now())?;
        self.store.replace_all(submissions)?;

        info!(repair = plan.label, applied, "applied repair");
        Ok(RepairReport { applied, backup })
    }
}
