use std::sync::Arc;

use crate::application::ports::{BlobStore, TranscriptionEngine, TranscriptionError};
use crate::presentation::config::{TranscriptionProviderSetting, TranscriptionSettings};

use super::azure_whisper_engine::AzureWhisperEngine;
use super::openai_whisper_engine::OpenAiWhisperEngine;

const DEFAULT_AZURE_API_VERSION: &str = "2024-06-01";

pub struct TranscriptionEngineFactory;

impl TranscriptionEngineFactory {
    pub fn create(
        settings: &TranscriptionSettings,
        store: Arc<dyn BlobStore>,
    ) -> Result<Arc<dyn TranscriptionEngine>, TranscriptionError> {
        match settings.provider {
            TranscriptionProviderSetting::OpenAi => {
                let key = settings.api_key.clone().ok_or_else(|| {
                    TranscriptionError::Configuration(
                        "API key required for OpenAI Whisper".to_string(),
                    )
                })?;
                let engine = OpenAiWhisperEngine::new(
                    store,
                    key,
                    settings.base_url.clone(),
                    Some(settings.model.clone()),
                    settings.language.clone(),
                );
                Ok(Arc::new(engine))
            }
            TranscriptionProviderSetting::Azure => {
                let base_url = settings.base_url.as_deref().ok_or_else(|| {
                    TranscriptionError::Configuration(
                        "base_url required for Azure Whisper".to_string(),
                    )
                })?;
                let key = settings.api_key.as_deref().ok_or_else(|| {
                    TranscriptionError::Configuration(
                        "API key required for Azure Whisper".to_string(),
                    )
                })?;
                let api_version = settings
                    .api_version
                    .as_deref()
                    .unwrap_or(DEFAULT_AZURE_API_VERSION);
                let engine =
                    AzureWhisperEngine::new(store, base_url, &settings.model, key, api_version);
                Ok(Arc::new(engine))
            }
        }
    }
}
