//! Relevance queries over a snapshot of submissions
//!
//! A submission is relevant to issue month `M` when:
//! - it is unreviewed and was collected in `M`
//! - it was accepted for `M`
//! - it belongs to an evergreen category, carries the legacy `published`
//!   value and was collected in `M`
//!
//! Backlogged and archived submissions are never relevant to a month.

use crate::domain::{Category, Disposition, MonthKey, Submission};
use std::collections::{BTreeMap, BTreeSet};

/// Whether `submission` counts towards issue `month`
pub fn is_relevant(submission: &Submission, month: MonthKey) -> bool {
    match submission.disposition {
        Disposition::Unset => submission.month == month,
        Disposition::Assigned(target) => target == month,
        Disposition::Published => submission.category.is_evergreen() && submission.month == month,
        Disposition::Backlog | Disposition::Archived => false,
    }
}

/// Read-only view used to answer month queries.
///
/// Borrows a snapshot taken by the caller; nothing is retained across calls.
#[derive(Debug, Clone, Copy)]
pub struct DispositionEngine<'a> {
    submissions: &'a [Submission],
}

impl<'a> DispositionEngine<'a> {
    pub fn new(submissions: &'a [Submission]) -> Self {
        DispositionEngine { submissions }
    }

    /// Every submission relevant to `month`, newest first
    pub fn relevant_to(&self, month: MonthKey) -> Vec<&'a Submission> {
        let mut relevant: Vec<&Submission> = self
            .submissions
            .iter()
            .filter(|s| is_relevant(s, month))
            .collect();
        sort_newest_first(&mut relevant);
        relevant
    }

    /// Count of relevant submissions per category; every category is present
    pub fn stats_for_month(&self, month: MonthKey) -> BTreeMap<Category, usize> {
        let mut stats: BTreeMap<Category, usize> =
            Category::ALL.into_iter().map(|c| (c, 0)).collect();

        for submission in self.submissions.iter().filter(|s| is_relevant(s, month)) {
            *stats.entry(submission.category).or_insert(0) += 1;
        }

        stats
    }

    /// Distinct contributor names among relevant submissions, alphabetical
    pub fn contributors_for_month(&self, month: MonthKey) -> Vec<String> {
        let names: BTreeSet<&str> = self
            .submissions
            .iter()
            .filter(|s| is_relevant(s, month))
            .filter_map(|s| s.contributor())
            .collect();

        let mut names: Vec<String> = names.into_iter().map(str::to_string).collect();
        names.sort_by(|a, b| a.to_lowercase().cmp(&b.to_lowercase()).then(a.cmp(b)));
        names
    }

    /// Backlogged submissions of one category, regardless of month, newest first
    pub fn backlog_for_category(&self, category: Category) -> Vec<&'a Submission> {
        let mut backlog: Vec<&Submission> = self
            .submissions
            .iter()
            .filter(|s| s.category == category && s.disposition == Disposition::Backlog)
            .collect();
        sort_newest_first(&mut backlog);
        backlog
    }

    /// Relevant submissions of one category, newest first
    pub fn effective_for_category(&self, category: Category, month: MonthKey) -> Vec<&'a Submission> {
        let mut effective: Vec<&Submission> = self
            .submissions
            .iter()
            .filter(|s| s.category == category && is_relevant(s, month))
            .collect();
        sort_newest_first(&mut effective);
        effective
    }

    /// The subset of `effective_for_category` accepted for exactly `month`
    pub fn accepted_for_category(&self, category: Category, month: MonthKey) -> Vec<&'a Submission> {
        self.effective_for_category(category, month)
            .into_iter()
            .filter(|s| s.disposition.is_assigned_to(month))
            .collect()
    }
}

fn sort_newest_first(submissions: &mut [&Submission]) {
    submissions.sort_by(|a, b| {
        b.submitted_at
            .cmp(&a.submitted_at)
            .then_with(|| a.id.cmp(&b.id))
    });
}
