//! Axum route handlers for the version history and diff API.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::diff::sections::{diff_versions, SectionDiff};
use crate::diff::summary::{render_change_summary, summarize, ChangeSummary};
use crate::diff::word_diff::{word_diff, DiffToken};
use crate::errors::AppError;
use crate::models::cv::CvContent;
use crate::models::version::{CvVersion, VersionMeta};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SaveVersionRequest {
    pub content: CvContent,
    pub label: String,
    #[serde(flatten)]
    pub meta: VersionMeta,
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub from: String,
    pub to: String,
}

#[derive(Debug, Deserialize)]
pub struct CurrentContentRequest {
    pub content: CvContent,
}

#[derive(Debug, Deserialize)]
pub struct DiffRequest {
    pub old: CvContent,
    pub new: CvContent,
}

#[derive(Debug, Deserialize)]
pub struct WordDiffRequest {
    #[serde(default)]
    pub old_text: String,
    #[serde(default)]
    pub new_text: String,
}

#[derive(Debug, Serialize)]
pub struct DiffResponse {
    pub sections: Vec<SectionDiff>,
    pub summary: ChangeSummary,
    pub summary_markdown: String,
}

impl DiffResponse {
    fn between(old: &CvContent, new: &CvContent) -> Self {
        let sections = diff_versions(old, new);
        let summary = summarize(&sections);
        let summary_markdown = render_change_summary(&sections);
        Self {
            sections,
            summary,
            summary_markdown,
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Version history
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/documents/:document_id/versions
pub async fn handle_list_versions(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<Json<Vec<CvVersion>>, AppError> {
    Ok(Json(state.versions.list_versions(&document_id).await?))
}

/// POST /api/v1/documents/:document_id/versions
pub async fn handle_save_version(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    Json(request): Json<SaveVersionRequest>,
) -> Result<(StatusCode, Json<CvVersion>), AppError> {
    let label = request.label.trim();
    if label.is_empty() {
        return Err(AppError::Validation("label cannot be empty".to_string()));
    }
    if request
        .meta
        .match_score
        .is_some_and(|s| !(0.0..=100.0).contains(&s))
    {
        return Err(AppError::Validation(
            "match_score must be between 0 and 100".to_string(),
        ));
    }

    let version = state
        .versions
        .save_version(&document_id, request.content, label, request.meta)
        .await?;
    Ok((StatusCode::CREATED, Json(version)))
}

/// DELETE /api/v1/documents/:document_id/versions
pub async fn handle_clear_versions(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.versions.clear_versions(&document_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/documents/:document_id/versions/:version_id
pub async fn handle_get_version(
    State(state): State<AppState>,
    Path((document_id, version_id)): Path<(String, String)>,
) -> Result<Json<CvVersion>, AppError> {
    Ok(Json(find_version(&state, &document_id, &version_id).await?))
}

/// DELETE /api/v1/documents/:document_id/versions/:version_id
pub async fn handle_delete_version(
    State(state): State<AppState>,
    Path((document_id, version_id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    state
        .versions
        .delete_version(&document_id, &version_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Diffs
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/documents/:document_id/compare?from=&to=
///
/// Diffs two stored versions, `from` as the old side.
pub async fn handle_compare_versions(
    State(state): State<AppState>,
    Path(document_id): Path<String>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<DiffResponse>, AppError> {
    let from = find_version(&state, &document_id, &query.from).await?;
    let to = find_version(&state, &document_id, &query.to).await?;
    Ok(Json(DiffResponse::between(&from.content, &to.content)))
}

/// POST /api/v1/documents/:document_id/versions/:version_id/diff
///
/// Shows what changed between a stored version and the editor's current
/// content, e.g. before restoring that version.
pub async fn handle_diff_against_current(
    State(state): State<AppState>,
    Path((document_id, version_id)): Path<(String, String)>,
    Json(request): Json<CurrentContentRequest>,
) -> Result<Json<DiffResponse>, AppError> {
    let version = find_version(&state, &document_id, &version_id).await?;
    Ok(Json(DiffResponse::between(&version.content, &request.content)))
}

/// POST /api/v1/diff
pub async fn handle_diff(Json(request): Json<DiffRequest>) -> Json<DiffResponse> {
    Json(DiffResponse::between(&request.old, &request.new))
}

/// POST /api/v1/diff/words
pub async fn handle_word_diff(Json(request): Json<WordDiffRequest>) -> Json<Vec<DiffToken>> {
    Json(word_diff(&request.old_text, &request.new_text))
}

async fn find_version(
    state: &AppState,
    document_id: &str,
    version_id: &str,
) -> Result<CvVersion, AppError> {
    state
        .versions
        .get_version(document_id, version_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "Version {version_id} of document {document_id} not found"
            ))
        })
}
