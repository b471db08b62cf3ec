pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::history::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Version history
        .route(
            "/api/v1/documents/:document_id/versions",
            get(handlers::handle_list_versions)
                .post(handlers::handle_save_version)
                .delete(handlers::handle_clear_versions),
        )
        .route(
            "/api/v1/documents/:document_id/versions/:version_id",
            get(handlers::handle_get_version).delete(handlers::handle_delete_version),
        )
        .route(
            "/api/v1/documents/:document_id/versions/:version_id/diff",
            post(handlers::handle_diff_against_current),
        )
        .route(
            "/api/v1/documents/:document_id/compare",
            get(handlers::handle_compare_versions),
        )
        // Stateless diffs
        .route("/api/v1/diff", post(handlers::handle_diff))
        .route("/api/v1/diff/words", post(handlers::handle_word_diff))
        .with_state(state)
}
