use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::Response;

use crate::presentation::handlers::error_response;
use crate::presentation::state::AppState;

pub const API_KEY_HEADER: &str = "x-api-key";

// Media downloads stay public so clients can embed them directly.
const PUBLIC_PREFIXES: [&str; 2] = ["/api/photos", "/api/records"];

pub async fn api_key_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.api_key.as_deref() else {
        return next.run(request).await;
    };

    let path = request.uri().path();
    let protected =
        path.starts_with("/api/") && !PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p));
    if !protected {
        return next.run(request).await;
    }

    let provided = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if provided == Some(expected) {
        next.run(request).await
    } else {
        tracing::warn!(
            method = %request.method(),
            path = %path,
            "Unauthorized access attempt"
        );
        error_response(StatusCode::UNAUTHORIZED, "Invalid or missing API key")
    }
}
