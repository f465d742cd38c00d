use super::models::Chunk;
use crate::error::{AppError, Result};
use mongodb::bson::{doc, Bson, Document};
use mongodb::{Client, Collection};
use tokio::sync::OnceCell;
use tracing::info;

const STORE: &str = "mongodb";

/// Chunk collection in MongoDB, connected on first use
pub struct MongoChunkStore {
    connection_string: Option<String>,
    database: String,
    collection: String,
    chunks: OnceCell<Collection<Chunk>>,
}

impl MongoChunkStore {
    pub fn new(connection_string: Option<String>, database: String, collection: String) -> Self {
        Self {
            connection_string,
            database,
            collection,
            chunks: OnceCell::new(),
        }
    }

    async fn chunks(&self) -> Result<&Collection<Chunk>> {
        self.chunks
            .get_or_try_init(|| async {
                let uri = self.connection_string.as_deref().ok_or_else(|| {
                    AppError::store(STORE, "SPEECH_MONGODB_CONNECTION_STRING is not set")
                })?;

                info!(
                    "Initializing MongoDB client ({}.{})",
                    self.database, self.collection
                );

                let client = Client::with_uri_str(uri)
                    .await
                    .map_err(|e| AppError::store(STORE, e))?;

                Ok(client
                    .database(&self.database)
                    .collection::<Chunk>(&self.collection))
            })
            .await
    }

    pub async fn find_chunk(&self, chunk_id: &str) -> Result<Option<Chunk>> {
        self.chunks()
            .await?
            .find_one(doc! { "_id": chunk_id })
            .projection(chunk_projection())
            .await
            .map_err(|e| AppError::store(STORE, e))
    }
}

fn chunk_projection() -> Document {
    Chunk::PROJECTION
        .iter()
        .map(|field| (field.to_string(), Bson::Int32(1)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_projection_lists_only_chunk_fields() {
        let projection = chunk_projection();
        assert_eq!(projection.len(), 6);
        assert_eq!(projection.get_i32("SpeechFileId").unwrap(), 1);
        assert!(projection.get("Text").is_none());
    }

    #[tokio::test]
    async fn test_missing_connection_string_is_store_unavailable() {
        let store = MongoChunkStore::new(None, "SpeechDB".into(), "Chunks".into());
        let err = store.find_chunk("c1").await.unwrap_err();
        assert!(matches!(err, AppError::StoreUnavailable { store: "mongodb", .. }));
    }
}
