use axum::Json;
use axum::extract::{Multipart, State};
use serde::Serialize;

use crate::domain::FileKind;
use crate::presentation::state::AppState;

use super::error::{ApiError, UNSUPPORTED_AUDIO_MESSAGE};
use super::multipart_form::{AcceptedKinds, read_upload_form};

#[derive(Serialize)]
pub struct AudioUploadResponse {
    pub transcript: String,
    pub filename: String,
    pub file_type: FileKind,
    pub duration: f64,
    /// `null` when the engine could not score the transcription.
    pub confidence: Option<f32>,
}

#[tracing::instrument(skip_all)]
pub async fn process_audio_handler(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AudioUploadResponse>, ApiError> {
    let form = read_upload_form(
        multipart,
        AcceptedKinds {
            classify: FileKind::from_audio_mime,
            rejection: UNSUPPORTED_AUDIO_MESSAGE,
        },
    )
    .await?;
    let (file, kind) = (form.file, form.kind);

    let transcript = state
        .audio_transcriber
        .transcribe(&file.data, &file.filename, kind)
        .await?;

    Ok(Json(AudioUploadResponse {
        transcript: transcript.text,
        filename: file.filename,
        file_type: kind,
        duration: transcript.duration_secs,
        confidence: transcript.confidence,
    }))
}
