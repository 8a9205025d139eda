use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Deserialize;

use crate::application::services::DeviationDraft;
use crate::domain::DeviationId;
use crate::presentation::state::AppState;

use super::error_response::error_response;

/// Creation payload; media are base64 encoded.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateDeviationRequest {
    pub images: Option<Vec<String>>,
    pub recordings: Option<Vec<String>>,
    pub comment: Option<String>,
}

impl From<CreateDeviationRequest> for DeviationDraft {
    fn from(request: CreateDeviationRequest) -> Self {
        Self {
            images: request.images.unwrap_or_default(),
            recordings: request.recordings.unwrap_or_default(),
            comment: request.comment,
        }
    }
}

#[tracing::instrument(skip(state, request))]
pub async fn create_deviation_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateDeviationRequest>,
) -> impl IntoResponse {
    tracing::info!("Creating new deviation");

    match state.deviation_service.create(request.into()).await {
        Ok(submission) => (StatusCode::OK, Json(submission.deviation)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state))]
pub async fn list_deviations_handler(State(state): State<AppState>) -> impl IntoResponse {
    match state.deviation_service.list().await {
        Ok(deviations) => (StatusCode::OK, Json(deviations)).into_response(),
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state))]
pub async fn get_deviation_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state.deviation_service.get(&DeviationId::from_raw(&id)).await {
        Ok(Some(deviation)) => (StatusCode::OK, Json(deviation)).into_response(),
        Ok(None) => {
            tracing::warn!(deviation_id = %id, "Deviation not found");
            error_response(StatusCode::NOT_FOUND, format!("Deviation not found: {}", id))
        }
        Err(e) => e.into_response(),
    }
}

#[tracing::instrument(skip(state))]
pub async fn delete_deviation_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state
        .deviation_service
        .delete(&DeviationId::from_raw(&id))
        .await
    {
        Ok(true) => StatusCode::OK.into_response(),
        Ok(false) => {
            tracing::warn!(deviation_id = %id, "Deviation not found");
            error_response(StatusCode::NOT_FOUND, format!("Deviation not found: {}", id))
        }
        Err(e) => e.into_response(),
    }
}
