use crate::aggregate::SpeechService;
use crate::store::RecordStore;
use std::sync::Arc;
use std::time::Duration;

/// Shared application state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Aggregation over the injected record store
    pub service: SpeechService,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, request_timeout: Duration) -> Self {
        Self {
            service: SpeechService::new(store, request_timeout),
        }
    }
}
