use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;

use crate::domain::{DEFAULT_UPLOAD_INSTRUCTION, FileKind};
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

use super::error::{ApiError, UNSUPPORTED_UPLOAD_MESSAGE};
use super::multipart_form::{AcceptedKinds, read_upload_form};

#[derive(Serialize)]
pub struct FileUploadResponse {
    pub content: String,
    pub filename: String,
    pub file_type: FileKind,
}

#[tracing::instrument(skip_all)]
pub async fn upload_file_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<FileUploadResponse>, ApiError> {
    let form = read_upload_form(
        multipart,
        AcceptedKinds {
            classify: FileKind::from_mime,
            rejection: UNSUPPORTED_UPLOAD_MESSAGE,
        },
    )
    .await?;

    let instruction = form
        .instruction
        .as_deref()
        .unwrap_or(DEFAULT_UPLOAD_INSTRUCTION);
    tracing::debug!(instruction = %sanitize_prompt(instruction), "Upload instruction");

    let extracted = state.upload_service.extract(form.file).await?;

    Ok(Json(FileUploadResponse {
        content: extracted.content,
        filename: extracted.filename,
        file_type: extracted.kind,
    }))
}
