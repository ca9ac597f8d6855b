use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;

use crate::domain::{SummarizationRequest, SummarizationResponse};
use crate::presentation::state::AppState;

use super::error::ApiError;

#[tracing::instrument(skip_all)]
pub async fn summarize_handler(
    State(state): State<AppState>,
    payload: Result<Json<SummarizationRequest>, JsonRejection>,
) -> Result<Json<SummarizationResponse>, ApiError> {
    let Json(request) = payload?;
    let summary = state.summarization_service.summarize(&request).await?;

    Ok(Json(SummarizationResponse { summary }))
}
