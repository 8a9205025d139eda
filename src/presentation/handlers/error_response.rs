use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::TranscriptionError;
use crate::application::services::DeviationError;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

impl IntoResponse for DeviationError {
    fn into_response(self) -> Response {
        let status = match &self {
            DeviationError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            DeviationError::Transcription(TranscriptionError::RecordingNotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            DeviationError::Transcription(_) => StatusCode::BAD_GATEWAY,
            DeviationError::Storage(_) | DeviationError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        error_response(status, self.to_string())
    }
}
