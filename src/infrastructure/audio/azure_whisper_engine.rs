use std::sync::Arc;

use async_trait::async_trait;
use reqwest::multipart;
use serde::Deserialize;

use crate::application::ports::{BlobStore, TranscriptionEngine, TranscriptionError};
use crate::domain::{MediaId, Namespace};

use super::recording_source::{RECORDING_FILE_NAME, load_recording};

pub struct AzureWhisperEngine {
    client: reqwest::Client,
    store: Arc<dyn BlobStore>,
    endpoint: String,
    api_key: String,
}

impl AzureWhisperEngine {
    pub fn new(
        store: Arc<dyn BlobStore>,
        base_url: &str,
        deployment: &str,
        api_key: &str,
        api_version: &str,
    ) -> Self {
        let endpoint = format!(
            "{}/openai/deployments/{}/audio/transcriptions?api-version={}",
            base_url.trim_end_matches('/'),
            deployment,
            api_version,
        );
        Self {
            client: reqwest::Client::new(),
            store,
            endpoint,
            api_key: api_key.to_string(),
        }
    }
}

#[derive(Deserialize)]
struct AzureTranscriptionResponse {
    text: String,
}

#[async_trait]
impl TranscriptionEngine for AzureWhisperEngine {
    async fn transcribe(&self, recording_id: &MediaId) -> Result<String, TranscriptionError> {
        let audio_data = load_recording(&self.store, recording_id).await?;

        let file_part = multipart::Part::bytes(audio_data)
            .file_name(RECORDING_FILE_NAME)
            .mime_str(Namespace::Recordings.content_type())
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("mime: {}", e)))?;

        let form = multipart::Form::new().part("file", file_part);

        tracing::debug!(
            endpoint = %self.endpoint,
            recording_id = %recording_id,
            "Sending recording to Azure OpenAI Whisper"
        );

        let response = self
            .client
            .post(&self.endpoint)
            .header("api-key", &self.api_key)
            .multipart(form)
            .send()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(TranscriptionError::ApiRequestFailed(format!(
                "status {}: {}",
                status, body
            )));
        }

        let result: AzureTranscriptionResponse = response
            .json()
            .await
            .map_err(|e| TranscriptionError::ApiRequestFailed(format!("parse response: {}", e)))?;

        tracing::info!(
            recording_id = %recording_id,
            chars = result.text.len(),
            "Azure OpenAI Whisper transcription completed"
        );

        Ok(result.text.trim().to_string())
    }
}
