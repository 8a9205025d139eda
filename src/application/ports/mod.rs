mod blob_store;
mod image_describer;
mod llm_client;
mod transcription_engine;

pub use blob_store::{BlobStore, BlobStoreError};
pub use image_describer::{ImageDescriber, ImageDescriptionError};
pub use llm_client::{LlmClient, LlmClientError};
pub use transcription_engine::{TranscriptionEngine, TranscriptionError};
