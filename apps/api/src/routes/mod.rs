pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::generation::handlers as generation;
use crate::render::handlers as render;
use crate::state::AppState;

/// Room for multipart boundaries and headers on top of the file itself.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        // Render API
        .route("/api/v1/templates", get(render::handle_list_templates))
        .route("/api/v1/resumes/preview", post(render::handle_preview))
        .route("/api/v1/resumes/export", post(render::handle_export))
        // Generation API
        .route("/api/v1/resumes/generate", post(generation::handle_generate))
        // Analysis API
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        .route("/api/v1/analyze/report", post(analysis::handle_report_export))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
