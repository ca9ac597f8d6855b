use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{ExtractionError, LlmClientError};
use crate::application::services::{AudioProcessingError, SummarizationError, UploadError};

pub const UNSUPPORTED_UPLOAD_MESSAGE: &str =
    "Unsupported file type. Please upload PDF, DOCX, TXT, WAV, or MP3 files only.";
pub const UNSUPPORTED_AUDIO_MESSAGE: &str = "Please upload only WAV or MP3 audio files.";
const EMPTY_CONTENT_MESSAGE: &str = "No text content could be extracted from the file";

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Every failure a handler can return, one variant per kind. This is the
/// only place that picks HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    UnsupportedType(String),
    #[error("{0}")]
    Format(String),
    #[error("{0}")]
    EmptyContent(String),
    #[error("{0}")]
    DurationExceeded(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    AudioProcessing(String),
    #[error("{0}")]
    Generation(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::UnsupportedType(_)
            | Self::Format(_)
            | Self::EmptyContent(_)
            | Self::DurationExceeded(_)
            | Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::AudioProcessing(_) | Self::Generation(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %detail, "Request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %detail, "Request rejected");
        }

        (status, Json(ErrorResponse { detail })).into_response()
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return Self::PayloadTooLarge(e.body_text());
        }
        Self::BadRequest(format!("Failed to read multipart: {}", e.body_text()))
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        match e {
            JsonRejection::JsonDataError(_) => Self::InvalidRequest(e.body_text()),
            _ => Self::BadRequest(e.body_text()),
        }
    }
}

impl From<ExtractionError> for ApiError {
    fn from(e: ExtractionError) -> Self {
        match e {
            ExtractionError::Format { .. } => Self::Format(e.to_string()),
            ExtractionError::UnsupportedKind(_) => Self::Internal(e.to_string()),
        }
    }
}

impl From<AudioProcessingError> for ApiError {
    fn from(e: AudioProcessingError) -> Self {
        match e {
            AudioProcessingError::DurationExceeded { max_duration_secs, .. } => {
                Self::DurationExceeded(format!(
                    "Audio file is too long. Maximum allowed duration is {} minutes.",
                    (max_duration_secs / 60.0).round()
                ))
            }
            AudioProcessingError::Task(_) | AudioProcessingError::ScratchFile(_) => {
                Self::Internal(format!("Error processing audio file: {}", e))
            }
            _ => Self::AudioProcessing(format!("Error processing audio file: {}", e)),
        }
    }
}

impl From<UploadError> for ApiError {
    fn from(e: UploadError) -> Self {
        match e {
            UploadError::UnsupportedType(_) => {
                Self::UnsupportedType(UNSUPPORTED_UPLOAD_MESSAGE.to_string())
            }
            UploadError::Extraction(e) => e.into(),
            UploadError::Audio(e) => e.into(),
            UploadError::EmptyContent(_) => Self::EmptyContent(EMPTY_CONTENT_MESSAGE.to_string()),
        }
    }
}

impl From<SummarizationError> for ApiError {
    fn from(e: SummarizationError) -> Self {
        match e {
            SummarizationError::InvalidRequest(errors) => {
                Self::InvalidRequest(format!("Invalid summarization request: {}", errors))
            }
            SummarizationError::Generation(LlmClientError::MissingApiKey) => Self::Generation(
                "Summarization is unavailable: no API key is configured for the model provider"
                    .to_string(),
            ),
            SummarizationError::Generation(e) => Self::Generation(format!(
                "An error occurred while processing the request: {}",
                e
            )),
        }
    }
}
