use std::sync::Arc;

use crate::application::ports::{BlobStore, TranscriptionError};
use crate::domain::{MediaId, Namespace};

pub(super) const RECORDING_FILE_NAME: &str = "recording.mp3";

pub(super) async fn load_recording(
    store: &Arc<dyn BlobStore>,
    recording_id: &MediaId,
) -> Result<Vec<u8>, TranscriptionError> {
    store
        .get(Namespace::Recordings, recording_id.as_str())
        .await
        .map_err(|e| TranscriptionError::Storage(e.to_string()))?
        .ok_or_else(|| TranscriptionError::RecordingNotFound(recording_id.to_string()))
}
