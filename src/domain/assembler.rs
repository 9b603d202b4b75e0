//! Editor drafts and the final newsletter text

use crate::domain::{Category, DispositionEngine, MonthKey, SectionProgress};

/// Joins accepted items in an editor draft
pub const DRAFT_SEPARATOR: &str = "\n\n---\n\n";

/// Width of the banner and item rules in the exported text
pub const RULE_WIDTH: usize = 40;

/// Starting draft for one section of issue `month`.
///
/// A saved hand-edited draft wins; otherwise the accepted items are joined.
pub fn build_draft(
    engine: &DispositionEngine<'_>,
    category: Category,
    month: MonthKey,
    progress: Option<&SectionProgress>,
) -> String {
    if let Some(saved) = progress.and_then(SectionProgress::saved_draft) {
        return saved.to_string();
    }

    engine
        .accepted_for_category(category, month)
        .iter()
        .map(|s| s.content.as_str())
        .collect::<Vec<_>>()
        .join(DRAFT_SEPARATOR)
}

/// Full newsletter text for issue `month`.
///
/// Sections follow `Category::ALL` order; sections with nothing accepted
/// for `month` are left out.
pub fn export_newsletter_text(engine: &DispositionEngine<'_>, month: MonthKey) -> String {
    let banner_rule = "=".repeat(RULE_WIDTH);
    let item_separator = format!("\n\n{}\n\n", "-".repeat(RULE_WIDTH));

    let sections: Vec<String> = Category::ALL
        .into_iter()
        .filter_map(|category| {
            let accepted = engine.accepted_for_category(category, month);
            if accepted.is_empty() {
                return None;
            }

            let body = accepted
                .iter()
                .map(|s| s.content.trim_end())
                .collect::<Vec<_>>()
                .join(&item_separator);

            Some(format!(
                "{rule}\n{title}\n{rule}\n\n{body}\n",
                rule = banner_rule,
                title = category.display_name().to_uppercase(),
                body = body
            ))
        })
        .collect();

    sections.join("\n")
}
