use anyhow::Result;
use serde::Deserialize;
use std::time::Duration;

/// Flat environment variables understood by the ingestion pipeline and this service.
/// Each one overrides the matching `speech.*` key.
const STORE_ENV_VARS: [(&str, &str); 9] = [
    ("speech.mongodb_connection_string", "SPEECH_MONGODB_CONNECTION_STRING"),
    ("speech.mongodb_database", "SPEECH_MONGODB_DATABASE"),
    ("speech.chunks_container", "SPEECH_CHUNKS_CONTAINER"),
    ("speech.cosmosdb_endpoint", "SPEECH_COSMOSDB_ENDPOINT"),
    ("speech.cosmosdb_key", "SPEECH_COSMOSDB_KEY"),
    ("speech.cosmosdb_database", "SPEECH_COSMOSDB_DATABASE"),
    ("speech.files_container", "SPEECH_FILES_CONTAINER"),
    ("speech.phrases_container", "SPEECH_PHRASES_CONTAINER"),
    ("speech.summaries_container", "SPEECH_SUMMARIES_CONTAINER"),
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub speech: SpeechDbConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
    /// Deadline for a single aggregation request
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Connection settings for the two backing stores
#[derive(Debug, Clone, Deserialize)]
pub struct SpeechDbConfig {
    /// MongoDB holds chunks (vector search lives there)
    pub mongodb_connection_string: Option<String>,
    pub mongodb_database: String,
    pub chunks_container: String,

    /// Cosmos DB holds files, phrases and summaries
    pub cosmosdb_endpoint: Option<String>,
    pub cosmosdb_key: Option<String>,
    pub cosmosdb_database: String,
    pub files_container: String,
    pub phrases_container: String,
    pub summaries_container: String,
}

impl Default for SpeechDbConfig {
    fn default() -> Self {
        Self {
            mongodb_connection_string: None,
            mongodb_database: "SpeechDB".to_string(),
            chunks_container: "Chunks".to_string(),
            cosmosdb_endpoint: None,
            cosmosdb_key: None,
            cosmosdb_database: "SpeechDB".to_string(),
            files_container: "Files".to_string(),
            phrases_container: "Phrases".to_string(),
            summaries_container: "Summaries".to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    /// Load from defaults, an optional config file, and the process environment
    pub fn load(path: &str) -> Result<Self> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// Same as [`Config::load`], reading store variables through `lookup`
    pub fn load_with<F>(path: &str, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = SpeechDbConfig::default();

        let mut builder = config::Config::builder()
            .set_default("service.name", "speech-citations")?
            .set_default("service.http.bind", "0.0.0.0")?
            .set_default("service.http.port", 50505_i64)?
            .set_default("service.request_timeout_secs", 30_i64)?
            .set_default("speech.mongodb_database", defaults.mongodb_database)?
            .set_default("speech.chunks_container", defaults.chunks_container)?
            .set_default("speech.cosmosdb_database", defaults.cosmosdb_database)?
            .set_default("speech.files_container", defaults.files_container)?
            .set_default("speech.phrases_container", defaults.phrases_container)?
            .set_default("speech.summaries_container", defaults.summaries_container)?
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix("SPEECH_CITATIONS")
                    .prefix_separator("__")
                    .separator("__"),
            );

        for (key, var) in STORE_ENV_VARS {
            builder = builder.set_override_option(key, lookup(var))?;
        }

        Ok(builder.build()?.try_deserialize()?)
    }
}
