use serde::{Deserialize, Serialize};

/// Contiguous slice of a transcript, stored in the chunk collection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk identifier (MongoDB `_id`)
    #[serde(rename = "_id")]
    pub id: String,

    /// Ordinal position within the parent file
    #[serde(rename = "ChunkIndex")]
    pub chunk_index: i64,

    /// First phrase covered by this chunk (inclusive)
    #[serde(rename = "StartPhraseIndex")]
    pub start_phrase_index: i64,

    /// Last phrase covered by this chunk (inclusive)
    #[serde(rename = "EndPhraseIndex")]
    pub end_phrase_index: i64,

    /// Parent speech file
    #[serde(rename = "SpeechFileId")]
    pub speech_file_id: String,

    #[serde(rename = "Title", default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Chunk {
    /// Fields fetched from the chunk collection. Nothing else is read.
    pub const PROJECTION: [&'static str; 6] = [
        "_id",
        "ChunkIndex",
        "StartPhraseIndex",
        "EndPhraseIndex",
        "SpeechFileId",
        "Title",
    ];

    /// Number of phrases covered, or `None` if the stored range is inverted
    pub fn phrase_count(&self) -> Option<usize> {
        if self.start_phrase_index > self.end_phrase_index {
            return None;
        }
        usize::try_from(self.end_phrase_index - self.start_phrase_index + 1).ok()
    }
}

/// Source audio asset and its metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpeechFile {
    /// Cosmos `id`. A PascalCase `Id` copy on the document is ignored.
    #[serde(rename = "id")]
    pub id: String,
    pub original_file_name: String,
    pub file_hash: String,
    pub blob_name: String,
    pub blob_url: String,
    /// Creation timestamp, echoed as stored
    pub created_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_info: Option<SpeechSourceInfo>,
}

/// Descriptive metadata captured at ingestion time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SpeechSourceInfo {
    pub original_file_name: String,
    pub file_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_speaker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// One recognized utterance belonging to a speech file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Phrase {
    /// Cosmos `id`. A PascalCase `Id` copy on the document is ignored.
    #[serde(rename = "id")]
    pub id: String,

    pub speech_file_id: String,

    /// Formatted text (punctuation, casing)
    pub display_text: String,

    /// Text as returned by the recognizer
    pub raw_recognized_text: String,

    /// Confidence score (0.0 to 1.0)
    pub recognition_confidence: f64,

    pub recognition_success: bool,

    /// Offset from the start of the file, `HH:MM:SS.fffffff`
    pub start_time: String,

    /// Length of the utterance, `HH:MM:SS.fffffff`
    pub duration: String,
}

impl Phrase {
    /// Start offset in seconds, `None` if `StartTime` is unparseable
    pub fn start_seconds(&self) -> Option<f64> {
        parse_time_span(&self.start_time)
    }
}

/// Derived abstractive summary of a speech file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Summary {
    /// Cosmos `id`. A PascalCase `Id` copy on the document is ignored.
    #[serde(rename = "id")]
    pub id: String,
    pub speech_file_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_utc: Option<String>,
    /// Markdown summary text
    pub summary: String,
}

/// Parse a .NET time span (`[d.]HH:MM:SS(.fraction)`) or a bare number of seconds
pub fn parse_time_span(value: &str) -> Option<f64> {
    let value = value.trim();
    let mut parts = value.split(':');
    match (parts.next(), parts.next(), parts.next(), parts.next()) {
        (Some(h), Some(m), Some(s), None) => {
            let (days, h) = match h.split_once('.') {
                Some((d, h)) => (d.parse::<u64>().ok()? as f64, h),
                None => (0.0, h),
            };
            let hours: f64 = h.parse::<u64>().ok()? as f64;
            let minutes: f64 = m.parse().ok()?;
            let seconds: f64 = s.parse().ok()?;
            Some(days * 86400.0 + hours * 3600.0 + minutes * 60.0 + seconds)
        }
        (Some(s), None, None, None) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_time_span() {
        assert_eq!(parse_time_span("00:00:00"), Some(0.0));
        assert_eq!(parse_time_span("01:02:03.5000000"), Some(3723.5));
        assert_eq!(parse_time_span("12.25"), Some(12.25));
        assert_eq!(parse_time_span("garbage"), None);
        assert_eq!(parse_time_span("1:2"), None);
    }

    #[test]
    fn test_parse_time_span_with_days() {
        assert_eq!(parse_time_span("1.02:00:00"), Some(93600.0));
        assert_eq!(parse_time_span("2.00:00:01.5000000"), Some(172801.5));
        assert_eq!(parse_time_span("x.02:00:00"), None);
    }

    #[test]
    fn test_phrase_with_both_id_keys() {
        let json = r#"{
            "id": "p1",
            "Id": "p1",
            "SpeechFileId": "f1",
            "DisplayText": "Hi.",
            "RawRecognizedText": "hi",
            "RecognitionConfidence": 0.5,
            "RecognitionSuccess": true,
            "StartTime": "00:00:00",
            "Duration": "00:00:01"
        }"#;

        let phrase: Phrase = serde_json::from_str(json).unwrap();
        assert_eq!(phrase.id, "p1");

        let out = serde_json::to_value(&phrase).unwrap();
        assert!(out.get("Id").is_none());
    }

    #[test]
    fn test_file_and_summary_with_both_id_keys() {
        let file = r#"{
            "id": "f1",
            "Id": "f1",
            "OriginalFileName": "talk.mp3",
            "FileHash": "deadbeef",
            "BlobName": "talk.mp3",
            "BlobUrl": "https://blob/talk.mp3",
            "CreatedAt": "2024-05-01T10:00:00Z"
        }"#;
        let file: SpeechFile = serde_json::from_str(file).unwrap();
        assert_eq!(file.id, "f1");

        let summary = r#"{"id": "s1", "Id": "s1", "SpeechFileId": "f1", "Summary": "Text"}"#;
        let summary: Summary = serde_json::from_str(summary).unwrap();
        assert_eq!(summary.id, "s1");
    }

    #[test]
    fn test_phrase_ignores_cosmos_system_fields() {
        let json = r#"{
            "id": "p1",
            "SpeechFileId": "f1",
            "DisplayText": "Hello world.",
            "RawRecognizedText": "hello world",
            "RecognitionConfidence": 0.93,
            "RecognitionSuccess": true,
            "StartTime": "00:00:01.2000000",
            "Duration": "00:00:00.8000000",
            "_rid": "abc==",
            "_etag": "\"0000\"",
            "_ts": 1700000000
        }"#;

        let phrase: Phrase = serde_json::from_str(json).unwrap();
        assert_eq!(phrase.id, "p1");
        assert!((phrase.start_seconds().unwrap() - 1.2).abs() < 1e-9);

        let out = serde_json::to_value(&phrase).unwrap();
        assert!(out.get("_rid").is_none());
        assert_eq!(out["id"], "p1");
        assert_eq!(out["DisplayText"], "Hello world.");
    }

    #[test]
    fn test_file_decodes_source_info() {
        let json = r#"{
            "id": "f1",
            "OriginalFileName": "talk.mp3",
            "FileHash": "deadbeef",
            "BlobName": "talk.mp3",
            "BlobUrl": "https://blob/talk.mp3",
            "CreatedAt": "2024-05-01T10:00:00Z",
            "SourceInfo": {
                "OriginalFileName": "talk.mp3",
                "FileHash": "deadbeef",
                "RecordingYear": 1972
            }
        }"#;

        let file: SpeechFile = serde_json::from_str(json).unwrap();
        assert_eq!(file.id, "f1");
        assert_eq!(file.source_info.as_ref().unwrap().recording_year, Some(1972));

        let out = serde_json::to_value(&file).unwrap();
        assert_eq!(out["id"], "f1");
        assert!(out["SourceInfo"].get("Album").is_none());
    }

    #[test]
    fn test_chunk_phrase_count() {
        let mut chunk = Chunk {
            id: "c1".to_string(),
            chunk_index: 0,
            start_phrase_index: 0,
            end_phrase_index: 4,
            speech_file_id: "f1".to_string(),
            title: None,
        };
        assert_eq!(chunk.phrase_count(), Some(5));

        chunk.start_phrase_index = 5;
        assert_eq!(chunk.phrase_count(), None);

        let out = serde_json::to_value(&chunk).unwrap();
        assert_eq!(out["_id"], "c1");
        assert!(out.get("Title").is_none());
    }
}
