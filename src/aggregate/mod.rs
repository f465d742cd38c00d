//! Citation and transcript aggregation
//!
//! Each flow resolves a primary record, fans out the dependent lookups
//! concurrently, and merges everything into one composite document:
//! - citation: chunk → (file, phrases)
//! - transcript: file → (phrases, summary)
//! - transcript summary: summary only

mod service;
mod views;

pub use service::SpeechService;
pub use views::{CitationDetails, TranscriptDetails};
