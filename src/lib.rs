pub mod aggregate;
pub mod config;
pub mod error;
pub mod http;
pub mod store;

pub use aggregate::{CitationDetails, SpeechService, TranscriptDetails};
pub use config::Config;
pub use error::{AppError, Entity, ErrorResponse};
pub use http::{create_router, AppState};
pub use store::{
    Chunk, InMemoryRecordStore, Phrase, RecordStore, SpeechDbGateway, SpeechFile, Summary,
};
