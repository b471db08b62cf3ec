//! Aggregate counts and a human-readable rendering for a list of section
//! diffs. Informational only; the structured diff is the source of truth.

use serde::{Deserialize, Serialize};

use crate::diff::sections::{SectionDiff, SectionKind};
use crate::diff::word_diff::{tokenize, DiffKind};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChangeSummary {
    pub sections_changed: usize,
    pub words_added: usize,
    pub words_removed: usize,
    pub skills_added: usize,
    pub skills_removed: usize,
}

pub fn summarize(diffs: &[SectionDiff]) -> ChangeSummary {
    let mut summary = ChangeSummary {
        sections_changed: diffs.len(),
        ..Default::default()
    };

    for diff in diffs {
        for token in diff.tokens.iter().flatten() {
            let words = tokenize(&token.text).len();
            match token.kind {
                DiffKind::Add => summary.words_added += words,
                DiffKind::Remove => summary.words_removed += words,
                DiffKind::Equal => {}
            }
        }
        summary.skills_added += diff.added.as_ref().map_or(0, Vec::len);
        summary.skills_removed += diff.removed.as_ref().map_or(0, Vec::len);
    }

    summary
}

/// Renders a short Markdown list, one bullet per changed section.
pub fn render_change_summary(diffs: &[SectionDiff]) -> String {
    if diffs.is_empty() {
        return "_No changes._\n".to_string();
    }

    let mut out = String::new();
    for diff in diffs {
        match diff.section {
            SectionKind::Skills => {
                let added = diff.added.as_deref().unwrap_or_default();
                let removed = diff.removed.as_deref().unwrap_or_default();
                out.push_str(&format!("- **{}**", diff.label));
                if !added.is_empty() {
                    out.push_str(&format!(" added: {}", added.join(", ")));
                    if !removed.is_empty() {
                        out.push(';');
                    }
                }
                if !removed.is_empty() {
                    out.push_str(&format!(" removed: {}", removed.join(", ")));
                }
                out.push('\n');
            }
            SectionKind::Summary | SectionKind::Experience => {
                let counts = summarize(std::slice::from_ref(diff));
                out.push_str(&format!(
                    "- **{}**: +{} / -{} words\n",
                    diff.label, counts.words_added, counts.words_removed
                ));
            }
        }
    }
    out
}
