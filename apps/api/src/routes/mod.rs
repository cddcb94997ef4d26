pub mod documents;
pub mod health;
pub mod templates;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Slack for multipart framing around the file itself.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(templates::handle_list_templates))
        .route(
            "/api/v1/documents/extract",
            post(documents::handle_extract).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/v1/documents/language",
            post(documents::handle_detect_language),
        )
        .route("/api/v1/documents/render", post(documents::handle_render))
        .with_state(state)
}
