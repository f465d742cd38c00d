use super::handlers;
use super::state::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Citations
        .route("/citation/:chunk_id", get(handlers::get_extended_citation))
        // Transcripts
        .route(
            "/transcript/:speech_file_id",
            get(handlers::get_transcript),
        )
        .route(
            "/transcript/:speech_file_id/summary",
            get(handlers::get_transcript_summary),
        )
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
