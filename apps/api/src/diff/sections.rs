use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::diff::word_diff::{word_diff, DiffToken};
use crate::models::cv::{CvContent, ExperienceEntry};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Summary,
    Experience,
    Skills,
}

/// The changes within one section of a CV between two versions.
///
/// Text sections (summary, experience) carry `tokens`; the skills section
/// carries `added`/`removed` name lists instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SectionDiff {
    pub section: SectionKind,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<DiffToken>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub added: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed: Option<Vec<String>>,
    pub has_changes: bool,
}

impl SectionDiff {
    fn text(section: SectionKind, label: String, old: &str, new: &str) -> Self {
        Self {
            section,
            label,
            tokens: Some(word_diff(old, new)),
            added: None,
            removed: None,
            has_changes: true,
        }
    }
}

/// Compares two CV versions section by section.
///
/// Sections are reported in a fixed order (summary, experience entries by
/// index, skills) and only when they changed.
pub fn diff_versions(old: &CvContent, new: &CvContent) -> Vec<SectionDiff> {
    let mut diffs = Vec::new();

    let old_summary = old.summary.as_deref().unwrap_or_default();
    let new_summary = new.summary.as_deref().unwrap_or_default();
    if old_summary != new_summary {
        diffs.push(SectionDiff::text(
            SectionKind::Summary,
            "Summary".to_string(),
            old_summary,
            new_summary,
        ));
    }

    let entry_count = old.experience.len().max(new.experience.len());
    for index in 0..entry_count {
        let old_entry = old.experience.get(index);
        let new_entry = new.experience.get(index);

        let old_description = description_of(old_entry);
        let new_description = description_of(new_entry);
        if old_description == new_description {
            continue;
        }

        let label = new_entry
            .and_then(ExperienceEntry::display_label)
            .or_else(|| old_entry.and_then(ExperienceEntry::display_label))
            .unwrap_or_else(|| format!("Experience #{}", index + 1));
        diffs.push(SectionDiff::text(
            SectionKind::Experience,
            label,
            old_description,
            new_description,
        ));
    }

    if let Some(skills) = diff_skills(&old.skills, &new.skills) {
        diffs.push(skills);
    }

    diffs
}

fn description_of(entry: Option<&ExperienceEntry>) -> &str {
    entry
        .and_then(|e| e.description.as_deref())
        .unwrap_or_default()
}

/// Set difference over skill names, case-insensitive. Each list keeps the
/// order of the list it was taken from.
fn diff_skills(old: &[Value], new: &[Value]) -> Option<SectionDiff> {
    let old_names: Vec<String> = old.iter().map(normalize_skill_name).collect();
    let new_names: Vec<String> = new.iter().map(normalize_skill_name).collect();

    let old_set: HashSet<String> = old_names.iter().map(|n| n.to_lowercase()).collect();
    let new_set: HashSet<String> = new_names.iter().map(|n| n.to_lowercase()).collect();

    let added: Vec<String> = new_names
        .into_iter()
        .filter(|n| !n.is_empty() && !old_set.contains(&n.to_lowercase()))
        .collect();
    let removed: Vec<String> = old_names
        .into_iter()
        .filter(|n| !n.is_empty() && !new_set.contains(&n.to_lowercase()))
        .collect();

    if added.is_empty() && removed.is_empty() {
        return None;
    }

    Some(SectionDiff {
        section: SectionKind::Skills,
        label: "Skills".to_string(),
        tokens: None,
        added: Some(added),
        removed: Some(removed),
        has_changes: true,
    })
}

/// Extracts a skill's display name from whatever shape the record has.
///
/// Accepts `{"name": "Go"}`, the legacy nested `{"name": {"name": "Go"}}`
/// and a bare `"Go"`. Anything else yields an empty string.
pub fn normalize_skill_name(raw: &Value) -> String {
    let name = match raw {
        Value::String(s) => return s.clone(),
        Value::Object(record) => record.get("name"),
        _ => None,
    };
    match name {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Object(nested)) => nested
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        _ => String::new(),
    }
}
