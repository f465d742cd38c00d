use super::state::AppState;
use crate::aggregate::{CitationDetails, TranscriptDetails};
use crate::error::{AppError, Result};
use crate::store::Summary;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
};
use tracing::{error, info};

/// GET /citation/:chunk_id
/// Chunk, its source file and the file's phrases
pub async fn get_extended_citation(
    State(state): State<AppState>,
    Path(chunk_id): Path<String>,
) -> Result<Json<CitationDetails>> {
    info!("Fetching citation for chunk: {}", chunk_id);

    state
        .service
        .extended_citation(&chunk_id)
        .await
        .map(Json)
        .map_err(|e| log_failure("/citation/:chunk_id", e))
}

/// GET /transcript/:speech_file_id
/// Speech file, its phrases and its summary (if any)
pub async fn get_transcript(
    State(state): State<AppState>,
    Path(speech_file_id): Path<String>,
) -> Result<Json<TranscriptDetails>> {
    info!("Fetching transcript for file: {}", speech_file_id);

    state
        .service
        .transcript(&speech_file_id)
        .await
        .map(Json)
        .map_err(|e| log_failure("/transcript/:speech_file_id", e))
}

/// GET /transcript/:speech_file_id/summary
pub async fn get_transcript_summary(
    State(state): State<AppState>,
    Path(speech_file_id): Path<String>,
) -> Result<Json<Summary>> {
    info!("Fetching summary for file: {}", speech_file_id);

    state
        .service
        .transcript_summary(&speech_file_id)
        .await
        .map(Json)
        .map_err(|e| log_failure("/transcript/:speech_file_id/summary", e))
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

fn log_failure(route: &str, err: AppError) -> AppError {
    if err.status_code().is_server_error() {
        error!("Error in {}: {}", route, err);
    }
    err
}
