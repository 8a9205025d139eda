use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose};

use crate::application::ports::{BlobStore, BlobStoreError, TranscriptionEngine, TranscriptionError};
use crate::domain::{Deviation, DeviationAnalysis, DeviationId, MediaId, Namespace};

use super::analysis_dispatcher::{AnalysisDispatcher, JobReceipt};
use super::analysis_pipeline::AnalysisJob;

/// Incoming report: base64 encoded media plus the inspector's comment.
#[derive(Debug, Clone, Default)]
pub struct DeviationDraft {
    pub images: Vec<String>,
    pub recordings: Vec<String>,
    pub comment: Option<String>,
}

impl DeviationDraft {
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
            && self.recordings.is_empty()
            && self.comment.as_deref().is_none_or(|c| c.trim().is_empty())
    }
}

pub struct Submission {
    pub deviation: Deviation,
    /// Present when a background analysis was dispatched.
    pub analysis: Option<JobReceipt>,
}

pub struct DeviationService {
    blob_store: Arc<dyn BlobStore>,
    transcription_engine: Arc<dyn TranscriptionEngine>,
    dispatcher: Arc<AnalysisDispatcher>,
}

impl DeviationService {
    pub fn new(
        blob_store: Arc<dyn BlobStore>,
        transcription_engine: Arc<dyn TranscriptionEngine>,
        dispatcher: Arc<AnalysisDispatcher>,
    ) -> Self {
        Self {
            blob_store,
            transcription_engine,
            dispatcher,
        }
    }

    /// Persists media and the deviation record, then hands the media to the
    /// background analysis without waiting for it.
    pub async fn create(&self, draft: DeviationDraft) -> Result<Submission, DeviationError> {
        if draft.is_empty() {
            return Err(DeviationError::InvalidRequest(
                "At least one of images, recordings, or comment must be provided".to_string(),
            ));
        }

        let images = decode_all(&draft.images, "image")?;
        let recordings = decode_all(&draft.recordings, "recording")?;

        let image_ids = self.save_all(Namespace::Images, images).await?;
        let recording_ids = self.save_all(Namespace::Recordings, recordings).await?;
        let comment = draft
            .comment
            .map(|c| c.trim().to_string())
            .unwrap_or_default();

        let deviation = Deviation::new(image_ids, recording_ids, comment);
        let payload = serde_json::to_vec(&deviation).map_err(DeviationError::Serialization)?;
        self.blob_store
            .put(Namespace::Deviations, deviation.id.as_str(), payload)
            .await
            .map_err(DeviationError::Storage)?;

        tracing::info!(
            deviation_id = %deviation.id,
            images = deviation.images.len(),
            recordings = deviation.recordings.len(),
            "Deviation created"
        );

        let analysis = if deviation.has_media() {
            match self
                .dispatcher
                .submit(AnalysisJob::from_deviation(deviation.clone()))
                .await
            {
                Ok(receipt) => Some(receipt),
                Err(e) => {
                    tracing::error!(
                        error = %e,
                        deviation_id = %deviation.id,
                        "Failed to dispatch deviation analysis"
                    );
                    None
                }
            }
        } else {
            None
        };

        Ok(Submission {
            deviation,
            analysis,
        })
    }

    pub async fn get(&self, id: &DeviationId) -> Result<Option<Deviation>, DeviationError> {
        let Some(payload) = self
            .blob_store
            .get(Namespace::Deviations, id.as_str())
            .await
            .map_err(DeviationError::Storage)?
        else {
            return Ok(None);
        };

        serde_json::from_slice(&payload)
            .map(Some)
            .map_err(DeviationError::Serialization)
    }

    /// All deviations; unreadable records are skipped, not fatal.
    pub async fn list(&self) -> Result<Vec<Deviation>, DeviationError> {
        let ids = self
            .blob_store
            .list(Namespace::Deviations)
            .await
            .map_err(DeviationError::Storage)?;

        let mut deviations = Vec::with_capacity(ids.len());
        for id in ids.iter().filter(|id| !DeviationId::is_analysis_key(id)) {
            let Some(payload) = self
                .blob_store
                .get(Namespace::Deviations, id)
                .await
                .map_err(DeviationError::Storage)?
            else {
                tracing::warn!(deviation_id = %id, "Deviation vanished while listing");
                continue;
            };

            match serde_json::from_slice::<Deviation>(&payload) {
                Ok(deviation) => deviations.push(deviation),
                Err(e) => {
                    tracing::warn!(error = %e, deviation_id = %id, "Skipping unreadable deviation");
                }
            }
        }

        tracing::debug!(count = deviations.len(), "Deviations listed");
        Ok(deviations)
    }

    /// Removes images, recordings, analysis and the deviation itself, in that
    /// order. Returns `false` when the deviation does not exist.
    pub async fn delete(&self, id: &DeviationId) -> Result<bool, DeviationError> {
        let Some(deviation) = self.get(id).await? else {
            return Ok(false);
        };

        for image_id in &deviation.images {
            self.delete_blob(Namespace::Images, image_id.as_str()).await?;
        }
        for recording_id in &deviation.recordings {
            self.delete_blob(Namespace::Recordings, recording_id.as_str())
                .await?;
        }
        self.delete_blob(Namespace::Deviations, &id.analysis_key())
            .await?;
        self.delete_blob(Namespace::Deviations, id.as_str()).await?;

        tracing::info!(deviation_id = %id, "Deviation deleted");
        Ok(true)
    }

    /// `None` until the background analysis has completed, and forever if it failed.
    pub async fn analysis(
        &self,
        id: &DeviationId,
    ) -> Result<Option<DeviationAnalysis>, DeviationError> {
        let Some(payload) = self
            .blob_store
            .get(Namespace::Deviations, &id.analysis_key())
            .await
            .map_err(DeviationError::Storage)?
        else {
            return Ok(None);
        };

        serde_json::from_slice(&payload)
            .map(Some)
            .map_err(DeviationError::Serialization)
    }

    pub async fn media(
        &self,
        namespace: Namespace,
        id: &MediaId,
    ) -> Result<Option<Vec<u8>>, DeviationError> {
        self.blob_store
            .get(namespace, id.as_str())
            .await
            .map_err(DeviationError::Storage)
    }

    pub async fn transcribe_recording(&self, id: &MediaId) -> Result<String, DeviationError> {
        self.transcription_engine
            .transcribe(id)
            .await
            .map_err(DeviationError::Transcription)
    }

    async fn save_all(
        &self,
        namespace: Namespace,
        blobs: Vec<Vec<u8>>,
    ) -> Result<Vec<MediaId>, DeviationError> {
        let mut ids = Vec::with_capacity(blobs.len());
        for data in blobs {
            let id = MediaId::new();
            self.blob_store
                .put(namespace, id.as_str(), data)
                .await
                .map_err(DeviationError::Storage)?;
            ids.push(id);
        }
        Ok(ids)
    }

    async fn delete_blob(&self, namespace: Namespace, id: &str) -> Result<(), DeviationError> {
        self.blob_store
            .delete(namespace, id)
            .await
            .map_err(DeviationError::Storage)?;
        tracing::debug!(namespace = %namespace, id = %id, "Blob deleted");
        Ok(())
    }
}

fn decode_all(encoded: &[String], kind: &str) -> Result<Vec<Vec<u8>>, DeviationError> {
    encoded
        .iter()
        .enumerate()
        .map(|(index, data)| {
            general_purpose::STANDARD.decode(data.trim()).map_err(|e| {
                DeviationError::InvalidRequest(format!("{kind} {index} is not valid base64: {e}"))
            })
        })
        .collect()
}

#[derive(Debug, thiserror::Error)]
pub enum DeviationError {
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("storage: {0}")]
    Storage(BlobStoreError),
    #[error("serialization: {0}")]
    Serialization(serde_json::Error),
    #[error("transcription: {0}")]
    Transcription(TranscriptionError),
}
