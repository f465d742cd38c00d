//! HTTP API server for citation and transcript lookups
//!
//! This module provides a read-only REST API:
//! - GET /citation/:chunk_id - Chunk with its file and phrases
//! - GET /transcript/:speech_file_id - File with its phrases and summary
//! - GET /transcript/:speech_file_id/summary - Summary record
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
