use chrono::Local;
use serde::{Deserialize, Serialize};

use super::{DeviationId, MediaId};

/// A single inspection report as persisted in the deviations namespace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deviation {
    pub id: DeviationId,
    pub timestamp: String,
    #[serde(default)]
    pub images: Vec<MediaId>,
    #[serde(default)]
    pub recordings: Vec<MediaId>,
    #[serde(default)]
    pub comment: String,
}

impl Deviation {
    pub fn new(images: Vec<MediaId>, recordings: Vec<MediaId>, comment: String) -> Self {
        Self {
            id: DeviationId::new(),
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.f").to_string(),
            images,
            recordings,
            comment,
        }
    }

    pub fn has_media(&self) -> bool {
        !self.images.is_empty() || !self.recordings.is_empty()
    }
}
