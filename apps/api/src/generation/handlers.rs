//! Axum route handlers for the Generation API.

use axum::{extract::State, Json};

use crate::errors::AppError;
use crate::generation::generator::{GenerateRequest, GeneratedResume};
use crate::state::AppState;

/// POST /api/v1/resumes/generate
///
/// Builds a resume from questionnaire answers. The response can be fed
/// straight back into the preview and export endpoints.
pub async fn handle_generate(
    State(state): State<AppState>,
    Json(request): Json<GenerateRequest>,
) -> Result<Json<GeneratedResume>, AppError> {
    let generated = state.generator.generate(&request).await?;
    Ok(Json(generated))
}
