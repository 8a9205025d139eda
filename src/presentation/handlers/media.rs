use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::domain::{MediaId, Namespace};
use crate::presentation::state::AppState;

use super::error_response::error_response;

#[derive(Serialize)]
pub struct TranscriptionResponse {
    pub transcription: String,
}

#[tracing::instrument(skip(state))]
pub async fn get_photo_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    serve_media(&state, Namespace::Images, id).await
}

#[tracing::instrument(skip(state))]
pub async fn get_recording_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    serve_media(&state, Namespace::Recordings, id).await
}

#[tracing::instrument(skip(state))]
pub async fn transcribe_recording_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> impl IntoResponse {
    match state
        .deviation_service
        .transcribe_recording(&MediaId::from_raw(id))
        .await
    {
        Ok(transcription) => {
            (StatusCode::OK, Json(TranscriptionResponse { transcription })).into_response()
        }
        Err(e) => e.into_response(),
    }
}

async fn serve_media(state: &AppState, namespace: Namespace, id: String) -> Response {
    match state
        .deviation_service
        .media(namespace, &MediaId::from_raw(&id))
        .await
    {
        Ok(Some(data)) => {
            tracing::debug!(namespace = %namespace, id = %id, bytes = data.len(), "Serving media");
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, namespace.content_type().to_string()),
                    (
                        header::CONTENT_DISPOSITION,
                        format!("inline; filename=\"{}\"", id),
                    ),
                ],
                data,
            )
                .into_response()
        }
        Ok(None) => {
            tracing::warn!(namespace = %namespace, id = %id, "Media not found");
            error_response(StatusCode::NOT_FOUND, format!("Media not found: {}", id))
        }
        Err(e) => e.into_response(),
    }
}
