use super::cosmos::{CosmosDocumentStore, QuerySpec};
use super::models::{Chunk, Phrase, SpeechFile, Summary};
use super::mongo::MongoChunkStore;
use super::{order_phrases, RecordStore, MAX_PHRASES};
use crate::config::SpeechDbConfig;
use crate::error::Result;
use tracing::debug;

const FILE_BY_ID: &str = "SELECT * FROM c WHERE c.id = @id";
const PHRASES_BY_FILE: &str = "SELECT * FROM c WHERE c.SpeechFileId = @sfid";
const SUMMARY_BY_FILE: &str = "SELECT * FROM c WHERE c.SpeechFileId = @sfid";

/// Production gateway: chunks from MongoDB, everything else from Cosmos DB.
///
/// Both clients connect on first use and are reused for the lifetime of the
/// gateway.
pub struct SpeechDbGateway {
    chunks: MongoChunkStore,
    documents: CosmosDocumentStore,
    files_container: String,
    phrases_container: String,
    summaries_container: String,
}

impl SpeechDbGateway {
    pub fn new(config: &SpeechDbConfig) -> Self {
        Self {
            chunks: MongoChunkStore::new(
                config.mongodb_connection_string.clone(),
                config.mongodb_database.clone(),
                config.chunks_container.clone(),
            ),
            documents: CosmosDocumentStore::new(
                config.cosmosdb_endpoint.clone(),
                config.cosmosdb_key.clone(),
                config.cosmosdb_database.clone(),
            ),
            files_container: config.files_container.clone(),
            phrases_container: config.phrases_container.clone(),
            summaries_container: config.summaries_container.clone(),
        }
    }
}

#[async_trait::async_trait]
impl RecordStore for SpeechDbGateway {
    async fn get_chunk(&self, chunk_id: &str) -> Result<Option<Chunk>> {
        debug!("Fetching chunk {}", chunk_id);
        self.chunks.find_chunk(chunk_id).await
    }

    async fn get_file(&self, file_id: &str) -> Result<Option<SpeechFile>> {
        debug!("Fetching file {} from {}", file_id, self.files_container);
        let spec = QuerySpec::new(FILE_BY_ID).param("@id", file_id);
        let files: Vec<SpeechFile> = self.documents.query(&self.files_container, &spec, 1).await?;
        Ok(files.into_iter().next())
    }

    async fn get_phrases(&self, file_id: &str) -> Result<Vec<Phrase>> {
        debug!("Fetching phrases of {} from {}", file_id, self.phrases_container);
        let spec = QuerySpec::new(PHRASES_BY_FILE).param("@sfid", file_id);
        let phrases = self
            .documents
            .query(&self.phrases_container, &spec, MAX_PHRASES)
            .await?;
        Ok(order_phrases(phrases))
    }

    async fn get_summary(&self, file_id: &str) -> Result<Option<Summary>> {
        debug!("Fetching summary of {} from {}", file_id, self.summaries_container);
        let spec = QuerySpec::new(SUMMARY_BY_FILE).param("@sfid", file_id);
        let summaries: Vec<Summary> = self
            .documents
            .query(&self.summaries_container, &spec, 1)
            .await?;
        Ok(summaries.into_iter().next())
    }

    fn name(&self) -> &str {
        "speech-db"
    }
}
