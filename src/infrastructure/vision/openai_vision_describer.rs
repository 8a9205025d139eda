use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose};
use reqwest::Client;
use serde::Deserialize;

use crate::application::ports::{BlobStore, ImageDescriber, ImageDescriptionError};
use crate::domain::{MediaId, Namespace};

/// Describes stored photos through an OpenAI compatible chat completions
/// endpoint that accepts `image_url` content parts.
pub struct OpenAiVisionDescriber {
    client: Client,
    store: Arc<dyn BlobStore>,
    base_url: String,
    model: String,
    api_key: String,
    max_tokens: usize,
}

impl OpenAiVisionDescriber {
    pub const VISION_TIMEOUT: Duration = Duration::from_secs(300);

    pub fn new(
        store: Arc<dyn BlobStore>,
        base_url: &str,
        model: &str,
        api_key: &str,
        max_tokens: usize,
    ) -> Self {
        let client = Client::builder()
            .timeout(Self::VISION_TIMEOUT)
            .build()
            .expect("reqwest client build never fails with valid TLS config");
        Self {
            client,
            store,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
            max_tokens,
        }
    }

    async fn load_image(&self, image_id: &MediaId) -> Result<Vec<u8>, ImageDescriptionError> {
        self.store
            .get(Namespace::Images, image_id.as_str())
            .await
            .map_err(|e| ImageDescriptionError::Storage(e.to_string()))?
            .ok_or_else(|| ImageDescriptionError::ImageNotFound(image_id.to_string()))
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl ImageDescriber for OpenAiVisionDescriber {
    #[tracing::instrument(skip(self, prompt), fields(image_id = %image_id, model = %self.model))]
    async fn describe(
        &self,
        image_id: &MediaId,
        prompt: &str,
    ) -> Result<String, ImageDescriptionError> {
        let image = self.load_image(image_id).await?;
        let b64 = general_purpose::STANDARD.encode(&image);
        let data_uri = format!("data:{};base64,{b64}", Namespace::Images.content_type());

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {
                    "role": "user",
                    "content": [
                        {
                            "type": "text",
                            "text": prompt
                        },
                        {
                            "type": "image_url",
                            "image_url": { "url": data_uri }
                        }
                    ]
                }
            ],
            "max_tokens": self.max_tokens,
            "temperature": 0.0,
            "stream": false
        });

        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(image_bytes = image.len(), "Sending photo for description");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ImageDescriptionError::ApiRequestFailed(format!("request: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(ImageDescriptionError::ApiRequestFailed(format!(
                "status {status}: {text}"
            )));
        }

        let raw_bytes = response
            .bytes()
            .await
            .map_err(|e| ImageDescriptionError::ApiRequestFailed(format!("body: {e}")))?;

        let completion: ChatCompletion = serde_json::from_slice(&raw_bytes).map_err(|e| {
            let raw_text = String::from_utf8_lossy(&raw_bytes);
            tracing::error!(raw_response = %raw_text, "Failed to parse vision response JSON");
            ImageDescriptionError::InvalidResponse(e.to_string())
        })?;

        let description = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ImageDescriptionError::InvalidResponse("empty choices".to_string()))?;

        tracing::info!(chars = description.len(), "Photo description completed");

        Ok(description.trim().to_string())
    }
}
