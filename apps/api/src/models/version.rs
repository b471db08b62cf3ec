use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::cv::CvContent;

/// Optional context recorded alongside a snapshot, typically the job the
/// CV was tailored for when it was saved.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub match_score: Option<f64>,
}

/// An immutable, timestamped copy of a document's content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CvVersion {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub label: String,
    pub content: CvContent,
    #[serde(flatten)]
    pub meta: VersionMeta,
}
