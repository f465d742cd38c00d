use super::views::{CitationDetails, TranscriptDetails};
use crate::error::{AppError, Entity, Result};
use crate::store::{RecordStore, Summary};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Assembles citation and transcript views over a [`RecordStore`]
#[derive(Clone)]
pub struct SpeechService {
    store: Arc<dyn RecordStore>,
    timeout: Duration,
}

impl SpeechService {
    pub fn new(store: Arc<dyn RecordStore>, timeout: Duration) -> Self {
        Self { store, timeout }
    }

    /// Chunk plus its file and every phrase of that file
    pub async fn extended_citation(&self, chunk_id: &str) -> Result<CitationDetails> {
        self.with_deadline(async {
            let chunk = self
                .store
                .get_chunk(chunk_id)
                .await?
                .ok_or(AppError::NotFound(Entity::Chunk))?;

            match chunk.phrase_count() {
                Some(count) => debug!(
                    "Chunk {} resolved to file {} ({} phrases) on {}",
                    chunk.id,
                    chunk.speech_file_id,
                    count,
                    self.store.name()
                ),
                None => warn!(
                    "Chunk {} has inverted phrase range {}..{}",
                    chunk.id, chunk.start_phrase_index, chunk.end_phrase_index
                ),
            }

            let (file, phrases) = futures::try_join!(
                self.store.get_file(&chunk.speech_file_id),
                self.store.get_phrases(&chunk.speech_file_id)
            )?;

            Ok(CitationDetails {
                chunk,
                file,
                phrases,
            })
        })
        .await
    }

    /// File plus its phrases and optional summary
    pub async fn transcript(&self, speech_file_id: &str) -> Result<TranscriptDetails> {
        self.with_deadline(async {
            let file = self
                .store
                .get_file(speech_file_id)
                .await?
                .ok_or(AppError::NotFound(Entity::File))?;

            let (phrases, summary) = futures::try_join!(
                self.store.get_phrases(speech_file_id),
                self.store.get_summary(speech_file_id)
            )?;

            Ok(TranscriptDetails {
                file,
                phrases,
                summary,
            })
        })
        .await
    }

    /// Summary record alone. The file itself is not checked.
    pub async fn transcript_summary(&self, speech_file_id: &str) -> Result<Summary> {
        self.with_deadline(async {
            self.store
                .get_summary(speech_file_id)
                .await?
                .ok_or(AppError::NotFound(Entity::Summary))
        })
        .await
    }

    async fn with_deadline<T>(&self, fut: impl Future<Output = Result<T>>) -> Result<T> {
        tokio::time::timeout(self.timeout, fut)
            .await
            .map_err(|_| AppError::Timeout {
                timeout: self.timeout,
            })?
    }
}
