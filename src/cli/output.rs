//! Output formatting utilities

use crate::application::{CycleStatus, RepairPlan};
use crate::domain::{Category, SectionProgress, Submission};
use std::collections::BTreeMap;

/// Longest content preview shown in listings
const PREVIEW_CHARS: usize = 60;

/// Format a list of submissions for display
pub fn format_submission_list(submissions: &[Submission]) -> String {
    if submissions.is_empty() {
        return "No submissions found".to_string();
    }

    let mut output = String::new();
    for s in submissions {
        output.push_str(&format!(
            "{}  {}  {:<18}  {:<10}  {}{}\n",
            s.submitted_at.format("%d-%m-%Y"),
            s.id,
            s.category.slug(),
            s.disposition.to_string(),
            preview(&s.content),
            s.contributor()
                .map(|name| format!(" ({})", name))
                .unwrap_or_default()
        ));
    }
    output
}

/// Format per-category counts, one line per category
pub fn format_stats(stats: &BTreeMap<Category, usize>) -> String {
    let mut output = String::new();
    let mut total = 0;
    for (category, count) in stats {
        total += count;
        output.push_str(&format!("{:<20} {}\n", category.display_name(), count));
    }
    output.push_str(&format!("{:<20} {}\n", "Total", total));
    output
}

/// Format contributor names, one per line
pub fn format_contributors(names: &[String]) -> String {
    if names.is_empty() {
        return "No contributors found".to_string();
    }

    let mut output = String::new();
    for name in names {
        output.push_str(name);
        output.push('\n');
    }
    output
}

pub fn format_cycle_status(status: &CycleStatus) -> String {
    format!(
        "Collecting for: {}\nPrevious:       {}\nDeadline day:   {}\nNext deadline:  {}\n",
        status.current, status.previous, status.deadline_day, status.next_deadline
    )
}

pub fn format_section_progress(progress: &BTreeMap<Category, SectionProgress>) -> String {
    if progress.is_empty() {
        return "No section progress saved".to_string();
    }

    let mut output = String::new();
    for (category, p) in progress {
        output.push_str(&format!(
            "{:<20} {:<11} {}  updated {}\n",
            category.display_name(),
            if p.is_complete { "complete" } else { "in progress" },
            if p.saved_draft().is_some() {
                "edited"
            } else {
                "auto"
            },
            p.updated_at.format("%d-%m-%Y %H:%M")
        ));
    }
    output
}

pub fn format_repair_plan(plan: &RepairPlan) -> String {
    if plan.is_empty() {
        return format!("{}: nothing to change", plan.label);
    }

    let mut output = format!("{}: {} change(s)\n", plan.label, plan.changes.len());
    for change in &plan.changes {
        output.push_str(&format!("  {}\n", change));
    }
    output
}

fn preview(content: &str) -> String {
    let first_line = content.lines().next().unwrap_or("");
    if first_line.chars().count() > PREVIEW_CHARS || content.lines().nth(1).is_some() {
        let cut: String = first_line.chars().take(PREVIEW_CHARS).collect();
        format!("{}...", cut.trim_end())
    } else {
        first_line.to_string()
    }
}
