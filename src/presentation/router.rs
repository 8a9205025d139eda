use axum::Router;
use axum::middleware;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::api_key::api_key_middleware;
use crate::presentation::handlers::{
    create_deviation_handler, delete_deviation_handler, get_analysis_handler,
    get_deviation_handler, get_photo_handler, get_recording_handler, health_handler,
    list_deviations_handler, ping_handler, transcribe_recording_handler,
};
use crate::presentation::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/ping", get(ping_handler))
        .route("/health", get(health_handler))
        .route(
            "/api/deviations",
            get(list_deviations_handler).post(create_deviation_handler),
        )
        .route(
            "/api/deviations/{id}",
            get(get_deviation_handler).delete(delete_deviation_handler),
        )
        .route("/api/deviations/{id}/analysis", get(get_analysis_handler))
        .route("/api/photos/{id}", get(get_photo_handler))
        .route("/api/records/{id}", get(get_recording_handler))
        .route(
            "/api/records/{id}/transcription",
            get(transcribe_recording_handler),
        )
        .layer(middleware::from_fn_with_state(
            state.clone(),
            api_key_middleware,
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
