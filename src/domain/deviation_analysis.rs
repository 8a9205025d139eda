use serde::{Deserialize, Serialize};

use super::{EvidenceMap, MediaId, Solution};

/// Derived artifact of one deviation: transcripts, photo descriptions and the verdict.
///
/// Built up by a single background task and persisted once, as a whole.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeviationAnalysis {
    #[serde(default)]
    pub transcriptions: EvidenceMap,
    #[serde(rename = "images", default)]
    pub image_descriptions: EvidenceMap,
    #[serde(default)]
    pub solution: Option<Solution>,
}

impl DeviationAnalysis {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_transcription(&mut self, recording_id: &MediaId, transcription: impl Into<String>) {
        self.transcriptions
            .insert(recording_id.as_str(), transcription);
    }

    pub fn add_image_description(&mut self, image_id: &MediaId, description: impl Into<String>) {
        self.image_descriptions
            .insert(image_id.as_str(), description);
    }

    pub fn set_solution(&mut self, solution: Solution) {
        self.solution = Some(solution);
    }
}
