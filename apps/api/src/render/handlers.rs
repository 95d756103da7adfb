//! Axum route handlers for the Render API.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::AppError;
use crate::layout::{catalog, TemplateStyle};
use crate::models::ResumeData;
use crate::render::{compose, export_document, render_preview, ExportSink, ExportedFile, PreviewTree};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[serde(default)]
    pub resume_data: ResumeData,
    pub template_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportRequest {
    #[serde(default)]
    pub resume_data: ResumeData,
    pub template_id: Option<String>,
    /// Download name without extension.
    pub title: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TemplatesResponse {
    pub templates: &'static [TemplateStyle],
    pub default: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/templates
pub async fn handle_list_templates(State(state): State<AppState>) -> Json<TemplatesResponse> {
    Json(TemplatesResponse {
        templates: catalog(),
        default: state.config.default_template.clone(),
    })
}

/// POST /api/v1/resumes/preview
///
/// Returns the on-screen tree for the resume. Unknown templates fall back to
/// the default style.
pub async fn handle_preview(
    State(state): State<AppState>,
    Json(request): Json<PreviewRequest>,
) -> Json<PreviewTree> {
    let template_id = request
        .template_id
        .unwrap_or_else(|| state.config.default_template.clone());
    Json(render_preview(&request.resume_data, &template_id))
}

/// POST /api/v1/resumes/export
///
/// Composes and encodes the resume, keeps a copy when an export directory is
/// configured, and streams the PDF back as a download.
pub async fn handle_export(
    State(state): State<AppState>,
    Json(request): Json<ExportRequest>,
) -> Result<Response, AppError> {
    let template_id = request
        .template_id
        .unwrap_or_else(|| state.config.default_template.clone());
    let title = request.title.unwrap_or_default();

    let file = export_blocking(
        request.resume_data,
        template_id,
        title,
        state.export_sink.clone(),
    )
    .await?;

    Ok(attachment_response(file))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Runs compose + encode (+ optional save) off the async executor.
pub async fn export_blocking(
    data: ResumeData,
    template_id: String,
    filename: String,
    sink: Option<Arc<dyn ExportSink>>,
) -> Result<ExportedFile, AppError> {
    let file = tokio::task::spawn_blocking(move || -> Result<ExportedFile, AppError> {
        let doc = compose(&data, &template_id);
        let file = export_document(&doc, &filename)?;
        if let Some(sink) = sink {
            sink.save(&file)?;
        }
        Ok(file)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in export: {e}")))??;

    info!(
        filename = %file.filename,
        pages = file.page_count,
        bytes = file.bytes.len(),
        "Exported document"
    );
    Ok(file)
}

/// Wraps an exported file in a download response.
pub fn attachment_response(file: ExportedFile) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"",
        header_safe_filename(&file.filename)
    );
    let disposition = HeaderValue::from_str(&disposition).unwrap_or_else(|e| {
        warn!("Falling back to generic attachment header: {e}");
        HeaderValue::from_static("attachment")
    });

    (
        [
            (header::CONTENT_TYPE, HeaderValue::from_static(file.mime_type)),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response()
}

/// Printable ASCII only, with quotes and backslashes replaced.
fn header_safe_filename(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_safe_filename() {
        assert_eq!(header_safe_filename("Jane Doe.pdf"), "Jane Doe.pdf");
        assert_eq!(header_safe_filename("Zoë \"CV\".pdf"), "Zo_ _CV_.pdf");
    }

    #[test]
    fn test_attachment_response_headers() {
        let file = ExportedFile {
            filename: "resume.pdf".to_string(),
            mime_type: "application/pdf",
            bytes: b"%PDF-1.5".to_vec(),
            page_count: 1,
        };
        let response = attachment_response(file);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume.pdf\""
        );
    }
}
