use async_trait::async_trait;

use crate::domain::MediaId;

#[async_trait]
pub trait ImageDescriber: Send + Sync {
    async fn describe(
        &self,
        image_id: &MediaId,
        prompt: &str,
    ) -> Result<String, ImageDescriptionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ImageDescriptionError {
    #[error("image not found: {0}")]
    ImageNotFound(String),
    #[error("storage: {0}")]
    Storage(String),
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
