use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Full content of a CV document as the editor persists it.
///
/// Only the fields the diff engine reads are typed. Everything else
/// (personal info, education, projects, ...) rides along in `extra` so a
/// snapshot is always a complete copy of what was saved.
///
/// Typed fields are read leniently: `null` or a wrong shape becomes empty
/// instead of failing the whole document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CvContent {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub summary: Option<String>,
    #[serde(default, deserialize_with = "lenient_entries")]
    pub experience: Vec<ExperienceEntry>,
    /// Skill records are kept raw: older documents store `name` as a nested
    /// object or omit it. Read them through `normalize_skill_name`.
    #[serde(default, deserialize_with = "lenient_list")]
    pub skills: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub position: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub company: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ExperienceEntry {
    /// "Position @ Company", the label shown for this entry in a diff.
    /// Falls back to whichever half is present; `None` when neither is.
    pub fn display_label(&self) -> Option<String> {
        let position = non_blank(self.position.as_deref());
        let company = non_blank(self.company.as_deref());
        match (position, company) {
            (Some(p), Some(c)) => Some(format!("{p} @ {c}")),
            (Some(one), None) | (None, Some(one)) => Some(one.to_string()),
            (None, None) => None,
        }
    }
}

fn non_blank(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

/// Strings pass through, numbers and booleans are stringified, anything
/// else (null, arrays, objects) reads as absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Arrays pass through; `null` or any other shape reads as empty.
fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    })
}

/// Experience entries that are not objects keep their slot as an empty
/// entry so later entries stay aligned by index.
fn lenient_entries<'de, D>(deserializer: D) -> Result<Vec<ExperienceEntry>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_list(deserializer)?
        .into_iter()
        .map(|item| match item {
            Value::Object(_) => serde_json::from_value(item).unwrap_or_default(),
            _ => ExperienceEntry::default(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_sections_default_to_empty() {
        let content: CvContent = serde_json::from_value(json!({})).unwrap();
        assert!(content.summary.is_none());
        assert!(content.experience.is_empty());
        assert!(content.skills.is_empty());
    }

    #[test]
    fn test_unknown_fields_are_preserved() {
        let raw = json!({
            "summary": "Backend engineer",
            "personal_info": { "full_name": "Sam Doe" },
            "education": [{ "institution": "MIT" }],
            "experience": [{ "position": "Engineer", "company": "Acme", "location": "Berlin" }]
        });
        let content: CvContent = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(content.extra["personal_info"]["full_name"], "Sam Doe");
        assert_eq!(content.experience[0].extra["location"], "Berlin");

        let back = serde_json::to_value(&content).unwrap();
        assert_eq!(back["education"], raw["education"]);
        assert_eq!(back["experience"][0]["location"], "Berlin");
    }

    #[test]
    fn test_display_label() {
        let entry = ExperienceEntry {
            position: Some("Engineer".to_string()),
            company: Some("Acme".to_string()),
            ..Default::default()
        };
        assert_eq!(entry.display_label().as_deref(), Some("Engineer @ Acme"));
    }

    #[test]
    fn test_display_label_partial_and_missing() {
        let position_only = ExperienceEntry {
            position: Some("Engineer".to_string()),
            company: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(position_only.display_label().as_deref(), Some("Engineer"));
        assert_eq!(ExperienceEntry::default().display_label(), None);
    }

    #[test]
    fn test_null_sections_read_as_empty() {
        let content: CvContent = serde_json::from_value(json!({
            "summary": null,
            "experience": null,
            "skills": null
        }))
        .unwrap();
        assert_eq!(content, CvContent::default());
    }

    #[test]
    fn test_wrong_shaped_sections_read_as_empty() {
        let content: CvContent = serde_json::from_value(json!({
            "summary": { "text": "nested" },
            "experience": "none",
            "skills": { "name": "Go" }
        }))
        .unwrap();
        assert!(content.summary.is_none());
        assert!(content.experience.is_empty());
        assert!(content.skills.is_empty());
    }

    #[test]
    fn test_malformed_experience_entries_keep_their_slot() {
        let content: CvContent = serde_json::from_value(json!({
            "experience": [
                null,
                "Engineer at Acme",
                { "position": 7, "company": true, "description": ["a", "b"], "location": "Oslo" }
            ]
        }))
        .unwrap();
        assert_eq!(content.experience.len(), 3);
        assert_eq!(content.experience[0], ExperienceEntry::default());
        assert_eq!(content.experience[1], ExperienceEntry::default());

        let entry = &content.experience[2];
        assert_eq!(entry.position.as_deref(), Some("7"));
        assert_eq!(entry.company.as_deref(), Some("true"));
        assert!(entry.description.is_none());
        assert_eq!(entry.extra["location"], "Oslo");
    }
}
