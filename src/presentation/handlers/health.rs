use axum::Json;
use serde::Serialize;

const WELCOME_MESSAGE: &str = "Welcome to the Gemini Summarization API!";

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub message: &'static str,
}

/// Liveness probe. Touches no dependency, so it stays green even when the
/// model provider is unreachable.
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        message: WELCOME_MESSAGE,
    })
}
