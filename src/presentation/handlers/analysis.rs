use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::domain::DeviationId;
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[tracing::instrument(skip(state))]
pub async fn get_analysis_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state
        .deviation_service
        .analysis(&DeviationId::from_raw(&id))
        .await
    {
        Ok(Some(analysis)) => (StatusCode::OK, Json(analysis)).into_response(),
        Ok(None) => {
            tracing::debug!(deviation_id = %id, "No analysis available");
            error_response(
                StatusCode::NOT_FOUND,
                format!("No analysis available for deviation: {}", id),
            )
        }
        Err(e) => e.into_response(),
    }
}
