//! Axum route handlers for the Analysis API.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::Response,
    Json,
};
use chrono::Utc;
use tracing::info;

use crate::analysis::{report_filename, report_to_resume, AnalysisReport, UploadedResume, REPORT_TEMPLATE_ID};
use crate::errors::AppError;
use crate::render::handlers::{attachment_response, export_blocking};
use crate::state::AppState;

/// Multipart field carrying the resume.
const UPLOAD_FIELD: &str = "file";

/// POST /api/v1/analyze
///
/// Accepts a multipart upload with a `file` field and returns the analysis
/// report. Non-PDF uploads are rejected with 422.
pub async fn handle_analyze(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let upload = read_upload(&mut multipart, state.config.max_upload_bytes).await?;
    info!(
        file = %upload.file_name,
        bytes = upload.bytes.len(),
        "Analyzing uploaded resume"
    );
    let report = state.analyzer.analyze(&upload).await?;
    Ok(Json(report))
}

/// POST /api/v1/analyze/report
///
/// Prints a previously returned report through the resume composer and
/// downloads it as `resume-analysis-<date>.pdf`.
pub async fn handle_report_export(
    State(state): State<AppState>,
    Json(report): Json<AnalysisReport>,
) -> Result<Response, AppError> {
    let today = Utc::now().date_naive();
    let data = report_to_resume(&report, today);
    let file = export_blocking(
        data,
        REPORT_TEMPLATE_ID.to_string(),
        report_filename(today),
        state.export_sink.clone(),
    )
    .await?;
    Ok(attachment_response(file))
}

async fn read_upload(multipart: &mut Multipart, limit: usize) -> Result<UploadedResume, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| match e.status() {
                StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge(e.body_text()),
                _ => AppError::Validation(format!("Could not read upload: {e}")),
            })?;

        if bytes.len() > limit {
            return Err(AppError::PayloadTooLarge(format!(
                "Upload is {} bytes; the limit is {limit}",
                bytes.len()
            )));
        }
        return Ok(UploadedResume {
            file_name,
            content_type,
            bytes,
        });
    }

    Err(AppError::Validation(format!(
        "Missing multipart field '{UPLOAD_FIELD}'"
    )))
}
