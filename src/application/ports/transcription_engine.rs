use async_trait::async_trait;

use crate::domain::MediaId;

#[async_trait]
pub trait TranscriptionEngine: Send + Sync {
    async fn transcribe(&self, recording_id: &MediaId) -> Result<String, TranscriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum TranscriptionError {
    #[error("recording not found: {0}")]
    RecordingNotFound(String),
    #[error("storage: {0}")]
    Storage(String),
    #[error("configuration invalid: {0}")]
    Configuration(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
}
