use axum::{
    extract::{multipart::MultipartRejection, Multipart},
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::resume::extract_text;

#[derive(Debug, Serialize)]
pub struct ExtractResumeResponse {
    pub resume_text: String,
}

/// POST /extract-resume
///
/// Accepts a multipart upload in the `file` field and returns its text.
pub async fn handle_extract_resume(
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ExtractResumeResponse>, AppError> {
    let mut multipart =
        multipart.map_err(|e| AppError::Validation(format!("Expected a multipart upload: {e}")))?;
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(format!("Malformed upload: {e}")))?;
            upload = Some(bytes);
            break;
        }
    }

    let pdf = upload.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    info!("Received resume upload ({} bytes)", pdf.len());

    let resume_text = extract_text(pdf).await;
    if resume_text.trim().is_empty() {
        return Err(AppError::Validation("Could not extract text".to_string()));
    }

    Ok(Json(ExtractResumeResponse { resume_text }))
}
