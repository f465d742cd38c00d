// Shared fixtures for integration tests

#![allow(dead_code)]

use speech_citations::{Chunk, Phrase, SpeechFile, Summary};

pub fn chunk(id: &str, file_id: &str) -> Chunk {
    Chunk {
        id: id.to_string(),
        chunk_index: 0,
        start_phrase_index: 0,
        end_phrase_index: 4,
        speech_file_id: file_id.to_string(),
        title: None,
    }
}

pub fn file(id: &str) -> SpeechFile {
    SpeechFile {
        id: id.to_string(),
        original_file_name: format!("{}.wav", id),
        file_hash: "abc123".to_string(),
        blob_name: format!("{}.wav", id),
        blob_url: format!("https://blob.example/{}.wav", id),
        created_at: "2024-01-01T00:00:00Z".to_string(),
        source_info: None,
    }
}

pub fn phrase(id: &str, file_id: &str, start_time: &str) -> Phrase {
    Phrase {
        id: id.to_string(),
        speech_file_id: file_id.to_string(),
        display_text: format!("Text of {}.", id),
        raw_recognized_text: format!("text of {}", id),
        recognition_confidence: 0.8,
        recognition_success: true,
        start_time: start_time.to_string(),
        duration: "00:00:01.0000000".to_string(),
    }
}

/// `count` phrases for `file_id`, one second apart
pub fn phrases(file_id: &str, count: usize) -> Vec<Phrase> {
    (0..count)
        .map(|i| {
            let secs = i as u64;
            let start = format!(
                "{:02}:{:02}:{:02}.0000000",
                secs / 3600,
                (secs / 60) % 60,
                secs % 60
            );
            phrase(&format!("{}-p{}", file_id, i), file_id, &start)
        })
        .collect()
}

pub fn summary(id: &str, file_id: &str) -> Summary {
    Summary {
        id: id.to_string(),
        speech_file_id: file_id.to_string(),
        source_file_name: Some(format!("{}.wav", file_id)),
        created_utc: Some("2024-01-02T00:00:00Z".to_string()),
        summary: "A short summary.".to_string(),
    }
}
