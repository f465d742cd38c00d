//! Record store gateway
//!
//! One read-only capability set over the two speech databases:
//! - chunks live in MongoDB (`mongo`)
//! - files, phrases and summaries live in Cosmos DB (`cosmos`)
//!
//! `SpeechDbGateway` composes both behind the `RecordStore` trait, and
//! `InMemoryRecordStore` stands in for them in tests and demo mode.

pub mod cosmos;
pub mod gateway;
pub mod memory;
pub mod models;
pub mod mongo;

use crate::error::Result;
use std::cmp::Ordering;

pub use gateway::SpeechDbGateway;
pub use memory::InMemoryRecordStore;
pub use models::{Chunk, Phrase, SpeechFile, SpeechSourceInfo, Summary};

/// Upper bound on phrases returned for one file
pub const MAX_PHRASES: usize = 1000;

/// Read access to speech records, independent of the backing engine
#[async_trait::async_trait]
pub trait RecordStore: Send + Sync {
    /// Point lookup by chunk identifier
    async fn get_chunk(&self, chunk_id: &str) -> Result<Option<Chunk>>;

    /// Lookup by file identifier. Zero matches is `None`, not an error.
    async fn get_file(&self, file_id: &str) -> Result<Option<SpeechFile>>;

    /// All phrases of a file ordered by start time, capped at [`MAX_PHRASES`]
    async fn get_phrases(&self, file_id: &str) -> Result<Vec<Phrase>>;

    /// Summary of a file, if one has been generated
    async fn get_summary(&self, file_id: &str) -> Result<Option<Summary>>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Apply the phrase cap, then stable sort by start time.
/// Phrases with an unparseable `StartTime` keep their relative order at the end.
pub(crate) fn order_phrases(mut phrases: Vec<Phrase>) -> Vec<Phrase> {
    phrases.truncate(MAX_PHRASES);
    phrases.sort_by(|a, b| match (a.start_seconds(), b.start_seconds()) {
        (Some(x), Some(y)) => x.total_cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    phrases
}
