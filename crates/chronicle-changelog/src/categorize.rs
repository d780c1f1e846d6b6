//! Keyword categorisation of change summaries

use crate::types::ChangeCategory;

/// Ordered `(keywords, category)` rules, first match wins
///
/// Keywords are matched as substrings of the lowercased summary. The order
/// decides ambiguous summaries ("Fix new parser" is `added`), so rows must
/// not be reordered.
pub const CATEGORY_RULES: &[(&[&str], ChangeCategory)] = &[
    (&["add", "new", "feature"], ChangeCategory::Added),
    (&["fix", "bug", "resolve"], ChangeCategory::Fixed),
    (&["remove", "delete"], ChangeCategory::Removed),
    (&["deprecat"], ChangeCategory::Deprecated),
    (&["security", "vulnerabilit"], ChangeCategory::Security),
];

/// Category used when no rule matches
pub const FALLBACK_CATEGORY: ChangeCategory = ChangeCategory::Changed;

/// Classify a summary into a display category
pub fn categorize(summary: &str) -> ChangeCategory {
    let text = summary.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
        .map(|(_, category)| *category)
        .unwrap_or(FALLBACK_CATEGORY)
}
