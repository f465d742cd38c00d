use super::models::{Chunk, Phrase, SpeechFile, SpeechSourceInfo, Summary};
use super::{order_phrases, RecordStore};
use crate::error::{AppError, Result};
use std::collections::HashMap;
use std::time::Duration;

/// Collections a store can be asked about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Chunks,
    Files,
    Phrases,
    Summaries,
}

/// In-process record store for tests and demo mode
///
/// Supports artificial per-collection latency and forced failures so the
/// aggregation layer can be exercised without real databases.
#[derive(Debug, Default, Clone)]
pub struct InMemoryRecordStore {
    chunks: HashMap<String, Chunk>,
    files: HashMap<String, SpeechFile>,
    phrases: Vec<Phrase>,
    summaries: Vec<Summary>,
    latency: HashMap<Collection, Duration>,
    failing: Vec<Collection>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_chunk(mut self, chunk: Chunk) -> Self {
        self.chunks.insert(chunk.id.clone(), chunk);
        self
    }

    pub fn with_file(mut self, file: SpeechFile) -> Self {
        self.files.insert(file.id.clone(), file);
        self
    }

    pub fn with_phrases(mut self, phrases: impl IntoIterator<Item = Phrase>) -> Self {
        self.phrases.extend(phrases);
        self
    }

    pub fn with_summary(mut self, summary: Summary) -> Self {
        self.summaries.push(summary);
        self
    }

    /// Delay every lookup against `collection` by `delay`
    pub fn with_latency(mut self, collection: Collection, delay: Duration) -> Self {
        self.latency.insert(collection, delay);
        self
    }

    /// Make every lookup against `collection` fail
    pub fn failing(mut self, collection: Collection) -> Self {
        self.failing.push(collection);
        self
    }

    /// Small dataset: chunk `c1` over file `f1` with five phrases and a summary
    pub fn demo() -> Self {
        let file_id = "f1";

        let phrases = (0..5).map(|i| Phrase {
            id: format!("p{}", i + 1),
            speech_file_id: file_id.to_string(),
            display_text: format!("Phrase number {}.", i + 1),
            raw_recognized_text: format!("phrase number {}", i + 1),
            recognition_confidence: 0.9,
            recognition_success: true,
            start_time: format!("00:00:{:02}.0000000", i * 4),
            duration: "00:00:03.5000000".to_string(),
        });

        Self::new()
            .with_chunk(Chunk {
                id: "c1".to_string(),
                chunk_index: 0,
                start_phrase_index: 0,
                end_phrase_index: 4,
                speech_file_id: file_id.to_string(),
                title: Some("Opening remarks".to_string()),
            })
            .with_file(SpeechFile {
                id: file_id.to_string(),
                original_file_name: "opening.mp3".to_string(),
                file_hash: "9f2c1e".to_string(),
                blob_name: "opening.mp3".to_string(),
                blob_url: "https://example.blob.core.windows.net/speech/opening.mp3".to_string(),
                created_at: "2024-05-01T10:00:00Z".to_string(),
                source_info: Some(SpeechSourceInfo {
                    original_file_name: "opening.mp3".to_string(),
                    file_hash: "9f2c1e".to_string(),
                    primary_speaker: Some("Host".to_string()),
                    album: None,
                    recording_year: Some(2024),
                    recording_date_time: None,
                    title: Some("Opening".to_string()),
                    description: None,
                    language_code: Some("en-US".to_string()),
                    copyright: None,
                }),
            })
            .with_phrases(phrases)
            .with_summary(Summary {
                id: "s1".to_string(),
                speech_file_id: file_id.to_string(),
                source_file_name: Some("opening.mp3".to_string()),
                created_utc: Some("2024-05-01T11:00:00Z".to_string()),
                summary: "The host opens the session.".to_string(),
            })
    }

    async fn access(&self, collection: Collection) -> Result<()> {
        if let Some(delay) = self.latency.get(&collection) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&collection) {
            return Err(AppError::store(
                "memory",
                format!("{:?} collection is unavailable", collection),
            ));
        }
        Ok(())
    }
}

#[async_trait::async_trait]
impl RecordStore for InMemoryRecordStore {
    async fn get_chunk(&self, chunk_id: &str) -> Result<Option<Chunk>> {
        self.access(Collection::Chunks).await?;
        Ok(self.chunks.get(chunk_id).cloned())
    }

    async fn get_file(&self, file_id: &str) -> Result<Option<SpeechFile>> {
        self.access(Collection::Files).await?;
        Ok(self.files.get(file_id).cloned())
    }

    async fn get_phrases(&self, file_id: &str) -> Result<Vec<Phrase>> {
        self.access(Collection::Phrases).await?;
        let phrases = self
            .phrases
            .iter()
            .filter(|p| p.speech_file_id == file_id)
            .cloned()
            .collect();
        Ok(order_phrases(phrases))
    }

    async fn get_summary(&self, file_id: &str) -> Result<Option<Summary>> {
        self.access(Collection::Summaries).await?;
        Ok(self
            .summaries
            .iter()
            .find(|s| s.speech_file_id == file_id)
            .cloned())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
