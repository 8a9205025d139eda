use std::sync::Arc;

use crate::application::ports::{
    BlobStore, BlobStoreError, ImageDescriber, ImageDescriptionError, LlmClient, LlmClientError,
    TranscriptionEngine, TranscriptionError,
};
use crate::domain::{Deviation, DeviationAnalysis, DeviationId, MediaId, Namespace, Solution};

use super::analysis_prompt::{
    INSPECTION_PROMPT, PromptOptions, build_solution_prompt, parse_solution,
};

/// One unit of background work: analyze the media of an already persisted deviation.
#[derive(Debug, Clone)]
pub struct AnalysisJob {
    pub deviation: Deviation,
    pub image_ids: Vec<MediaId>,
    pub recording_ids: Vec<MediaId>,
}

impl AnalysisJob {
    pub fn from_deviation(deviation: Deviation) -> Self {
        Self {
            image_ids: deviation.images.clone(),
            recording_ids: deviation.recordings.clone(),
            deviation,
        }
    }

    pub fn deviation_id(&self) -> &DeviationId {
        &self.deviation.id
    }
}

pub struct AnalysisPipeline {
    blob_store: Arc<dyn BlobStore>,
    transcription_engine: Arc<dyn TranscriptionEngine>,
    image_describer: Arc<dyn ImageDescriber>,
    llm_client: Arc<dyn LlmClient>,
    prompt_options: PromptOptions,
}

impl AnalysisPipeline {
    pub fn new(
        blob_store: Arc<dyn BlobStore>,
        transcription_engine: Arc<dyn TranscriptionEngine>,
        image_describer: Arc<dyn ImageDescriber>,
        llm_client: Arc<dyn LlmClient>,
        prompt_options: PromptOptions,
    ) -> Self {
        Self {
            blob_store,
            transcription_engine,
            image_describer,
            llm_client,
            prompt_options,
        }
    }

    /// Runs the whole analysis and writes the record under the deviation's analysis key.
    ///
    /// The first failing step aborts the run; nothing is written in that case.
    pub async fn run(&self, job: &AnalysisJob) -> Result<DeviationAnalysis, AnalysisError> {
        let mut analysis = DeviationAnalysis::new();

        if !job.recording_ids.is_empty() {
            self.transcribe_recordings(&job.recording_ids, &mut analysis)
                .await?;
        }

        // Solution generation is gated on photos only; recording-only
        // deviations end with transcripts and no verdict.
        if !job.image_ids.is_empty() {
            self.describe_images(&job.image_ids, &mut analysis).await?;
            let solution = self
                .generate_solution(&job.deviation.comment, &analysis)
                .await?;
            analysis.set_solution(solution);
        }

        self.persist(job.deviation_id(), &analysis).await?;
        Ok(analysis)
    }

    async fn transcribe_recordings(
        &self,
        recording_ids: &[MediaId],
        analysis: &mut DeviationAnalysis,
    ) -> Result<(), AnalysisError> {
        for recording_id in recording_ids {
            tracing::debug!(recording_id = %recording_id, "Transcribing recording");
            let transcription = self
                .transcription_engine
                .transcribe(recording_id)
                .await
                .map_err(|source| AnalysisError::Transcription {
                    recording_id: recording_id.clone(),
                    source,
                })?;
            analysis.add_transcription(recording_id, transcription);
        }
        Ok(())
    }

    async fn describe_images(
        &self,
        image_ids: &[MediaId],
        analysis: &mut DeviationAnalysis,
    ) -> Result<(), AnalysisError> {
        for image_id in image_ids {
            tracing::debug!(image_id = %image_id, "Describing image");
            let description = self
                .image_describer
                .describe(image_id, INSPECTION_PROMPT)
                .await
                .map_err(|source| AnalysisError::ImageDescription {
                    image_id: image_id.clone(),
                    source,
                })?;
            analysis.add_image_description(image_id, description);
        }
        Ok(())
    }

    async fn generate_solution(
        &self,
        comment: &str,
        analysis: &DeviationAnalysis,
    ) -> Result<Solution, AnalysisError> {
        let prompt = build_solution_prompt(comment, analysis, self.prompt_options);
        tracing::debug!(prompt_chars = prompt.len(), "Requesting solution");

        let raw = self
            .llm_client
            .complete(&prompt)
            .await
            .map_err(AnalysisError::Reasoning)?;
        tracing::debug!(response_chars = raw.len(), "Solution response received");

        let solution = parse_solution(&raw).map_err(AnalysisError::SolutionParse)?;
        tracing::debug!(
            issue_type = %solution.issue_type,
            priority_level = %solution.priority_level,
            repair_effort_hours = %solution.repair_effort_hours,
            "Solution parsed"
        );
        Ok(solution)
    }

    async fn persist(
        &self,
        deviation_id: &DeviationId,
        analysis: &DeviationAnalysis,
    ) -> Result<(), AnalysisError> {
        let payload = serde_json::to_vec(analysis).map_err(AnalysisError::Serialization)?;
        self.blob_store
            .put(Namespace::Deviations, &deviation_id.analysis_key(), payload)
            .await
            .map_err(AnalysisError::Storage)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("transcription of recording {recording_id}: {source}")]
    Transcription {
        recording_id: MediaId,
        #[source]
        source: TranscriptionError,
    },
    #[error("description of image {image_id}: {source}")]
    ImageDescription {
        image_id: MediaId,
        #[source]
        source: ImageDescriptionError,
    },
    #[error("reasoning: {0}")]
    Reasoning(LlmClientError),
    #[error("solution parse: {0}")]
    SolutionParse(serde_json::Error),
    #[error("serialization: {0}")]
    Serialization(serde_json::Error),
    #[error("storage: {0}")]
    Storage(BlobStoreError),
}
