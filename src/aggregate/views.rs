use crate::store::{Chunk, Phrase, SpeechFile, Summary};
use serde::{Deserialize, Serialize};

/// Composite response for `/citation/{chunk_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CitationDetails {
    pub chunk: Chunk,

    /// `null` when the chunk points at a file that does not exist
    pub file: Option<SpeechFile>,

    /// Every phrase of the chunk's file, ordered by start time
    pub phrases: Vec<Phrase>,
}

/// Composite response for `/transcript/{speech_file_id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptDetails {
    pub file: SpeechFile,

    pub phrases: Vec<Phrase>,

    /// `null` when no summary has been generated yet
    pub summary: Option<Summary>,
}
