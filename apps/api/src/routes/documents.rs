use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::{AppError, PipelineError};
use crate::models::language::deserialize_lenient;
use crate::models::{Language, StructuredCv};
use crate::render::sanitize_filename;
use crate::state::AppState;

/// Response header naming the template that produced the returned PDF.
pub const TEMPLATE_HEADER: &str = "x-template-used";

const PDF_MIME: &str = "application/pdf";

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub text: String,
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct LanguageRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageResponse {
    pub language: Language,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub cv: StructuredCv,
    #[serde(default)]
    pub keywords: Vec<String>,
    pub template: Option<String>,
    #[serde(default, deserialize_with = "deserialize_lenient")]
    pub language: Option<Language>,
    pub filename: Option<String>,
}

/// POST /api/v1/documents/extract
/// Multipart upload with a single `file` field holding a PDF.
pub async fn handle_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ExtractResponse>, AppError> {
    let data = read_pdf_field(&mut multipart, state.config.max_upload_bytes).await?;
    let size = data.len();

    // PDF parsing is CPU-bound; keep it off the async executor.
    let pipeline = state.pipeline.clone();
    let (text, language) = tokio::task::spawn_blocking(move || {
        let text = pipeline.extract_text(&data)?;
        let language = pipeline.detect_language(&text);
        Ok::<_, PipelineError>((text, language))
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in extraction: {e}")))??;

    info!(bytes = size, chars = text.len(), %language, "document extracted");
    Ok(Json(ExtractResponse { text, language }))
}

/// POST /api/v1/documents/language
pub async fn handle_detect_language(
    State(state): State<AppState>,
    Json(req): Json<LanguageRequest>,
) -> Json<LanguageResponse> {
    Json(LanguageResponse { language: state.pipeline.detect_language(&req.text) })
}

/// POST /api/v1/documents/render
/// Returns the PDF as an attachment; retries once with `modern` on render failure.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(req): Json<RenderRequest>,
) -> Result<Response, AppError> {
    let template_id = req
        .template
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| state.config.default_template.as_str().to_string());
    let filename = sanitize_filename(req.filename.as_deref().unwrap_or_default());

    let pipeline = state.pipeline.clone();
    let (cv, keywords, language) = (req.cv, req.keywords, req.language);
    let rendered = tokio::task::spawn_blocking(move || {
        pipeline.render_with_fallback(&cv, &keywords, &template_id, language)
    })
    .await
    .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in render: {e}")))??;

    info!(template = %rendered.template, bytes = rendered.bytes.len(), %filename, "document rendered");

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(PDF_MIME));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .map_err(|e| AppError::Internal(e.into()))?,
    );
    headers.insert(
        HeaderName::from_static(TEMPLATE_HEADER),
        HeaderValue::from_static(rendered.template.as_str()),
    );

    Ok((StatusCode::OK, headers, rendered.bytes).into_response())
}

/// Pulls the `file` field out of the upload and checks type and size.
async fn read_pdf_field(multipart: &mut Multipart, max_bytes: usize) -> Result<Bytes, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some("file") {
            continue;
        }

        let declared = field.content_type().map(media_type);
        let data = field.bytes().await.map_err(multipart_error)?;

        if data.len() > max_bytes {
            return Err(AppError::PayloadTooLarge(format!(
                "upload is {} bytes; limit is {max_bytes}",
                data.len()
            )));
        }
        match declared.as_deref() {
            Some(PDF_MIME) => {}
            Some(other) if other != "application/octet-stream" => {
                return Err(AppError::Validation(format!(
                    "expected {PDF_MIME}, got {other}"
                )));
            }
            // Untyped upload: accept only if it looks like a PDF.
            _ if data.starts_with(b"%PDF-") => {}
            _ => return Err(AppError::Validation("file is not a PDF document".to_string())),
        }
        return Ok(data);
    }
    Err(AppError::Validation("multipart field 'file' is required".to_string()))
}

/// `type/subtype` of a Content-Type value, lowercased, parameters dropped.
fn media_type(content_type: &str) -> String {
    let essence = content_type.split(';').next().unwrap_or_default();
    essence.trim().to_ascii_lowercase()
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}
