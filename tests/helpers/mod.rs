use std::sync::{Arc, Mutex};

use axum::Router;
use base64::{Engine as _, engine::general_purpose};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use deviation_analyzer::application::ports::{
    BlobStore, ImageDescriber, ImageDescriptionError, LlmClient, LlmClientError,
    TranscriptionEngine, TranscriptionError,
};
use deviation_analyzer::application::services::{
    AnalysisDispatcher, AnalysisPipeline, DeviationService, DispatchPolicy, PromptOptions,
};
use deviation_analyzer::domain::{MediaId, Namespace};
use deviation_analyzer::infrastructure::storage::ObjectBlobStore;

pub const SOLUTION_JSON: &str = r#"{
    "issueType": "Loose connection",
    "summary": "Scorched terminals in the main panel",
    "priorityLevel": "High",
    "repairEffortHours": "3",
    "checkList": ["Isolate the panel", "Re-terminate conductors", "Thermal scan"]
}"#;

pub fn memory_store() -> Arc<dyn BlobStore> {
    Arc::new(ObjectBlobStore::in_memory())
}

pub fn b64(text: &str) -> String {
    general_purpose::STANDARD.encode(text)
}

/// Transcribes a recording by reading its bytes back as UTF-8.
pub struct EchoTranscriber {
    store: Arc<dyn BlobStore>,
}

impl EchoTranscriber {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self { store }
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for EchoTranscriber {
    async fn transcribe(&self, recording_id: &MediaId) -> Result<String, TranscriptionError> {
        let data = self
            .store
            .get(Namespace::Recordings, recording_id.as_str())
            .await
            .map_err(|e| TranscriptionError::Storage(e.to_string()))?
            .ok_or_else(|| TranscriptionError::RecordingNotFound(recording_id.to_string()))?;
        Ok(String::from_utf8_lossy(&data).to_string())
    }
}

pub struct FailingTranscriber;

#[async_trait::async_trait]
impl TranscriptionEngine for FailingTranscriber {
    async fn transcribe(&self, _recording_id: &MediaId) -> Result<String, TranscriptionError> {
        Err(TranscriptionError::ApiRequestFailed("quota exceeded".to_string()))
    }
}

/// Describes an image by reading its bytes back as UTF-8 and records the prompts it got.
pub struct EchoDescriber {
    store: Arc<dyn BlobStore>,
    pub prompts: Mutex<Vec<String>>,
}

impl EchoDescriber {
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            store,
            prompts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl ImageDescriber for EchoDescriber {
    async fn describe(
        &self,
        image_id: &MediaId,
        prompt: &str,
    ) -> Result<String, ImageDescriptionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let data = self
            .store
            .get(Namespace::Images, image_id.as_str())
            .await
            .map_err(|e| ImageDescriptionError::Storage(e.to_string()))?
            .ok_or_else(|| ImageDescriptionError::ImageNotFound(image_id.to_string()))?;
        Ok(String::from_utf8_lossy(&data).to_string())
    }
}

pub struct FailingDescriber;

#[async_trait::async_trait]
impl ImageDescriber for FailingDescriber {
    async fn describe(
        &self,
        _image_id: &MediaId,
        _prompt: &str,
    ) -> Result<String, ImageDescriptionError> {
        Err(ImageDescriptionError::ApiRequestFailed("unauthorized".to_string()))
    }
}

/// Answers every prompt with the same text and keeps the prompts for inspection.
pub struct ScriptedLlm {
    response: String,
    pub prompts: Mutex<Vec<String>>,
}

impl ScriptedLlm {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlm {
    async fn complete(&self, prompt: &str) -> Result<String, LlmClientError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.response.clone())
    }
}

pub struct FailingLlm;

#[async_trait::async_trait]
impl LlmClient for FailingLlm {
    async fn complete(&self, _prompt: &str) -> Result<String, LlmClientError> {
        Err(LlmClientError::RateLimited)
    }
}

pub struct TestContext {
    pub store: Arc<dyn BlobStore>,
    pub llm: Arc<ScriptedLlm>,
    pub service: Arc<DeviationService>,
}

/// Service wired to an in-memory store, echo media services and a scripted model.
pub fn test_context(llm_response: &str, policy: DispatchPolicy) -> TestContext {
    let store = memory_store();
    let llm = Arc::new(ScriptedLlm::new(llm_response));
    let transcriber: Arc<dyn TranscriptionEngine> =
        Arc::new(EchoTranscriber::new(Arc::clone(&store)));

    let pipeline = Arc::new(AnalysisPipeline::new(
        Arc::clone(&store),
        Arc::clone(&transcriber),
        Arc::new(EchoDescriber::new(Arc::clone(&store))),
        Arc::clone(&llm) as Arc<dyn LlmClient>,
        PromptOptions::default(),
    ));
    let dispatcher = Arc::new(AnalysisDispatcher::start(pipeline, policy));
    let service = Arc::new(DeviationService::new(
        Arc::clone(&store),
        transcriber,
        dispatcher,
    ));

    TestContext {
        store,
        llm,
        service,
    }
}

/// Serves `app` on an ephemeral port until the returned sender fires.
pub async fn start_mock_server(app: Router) -> (String, oneshot::Sender<()>) {
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let base_url = format!("http://{}", addr);

    tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            })
            .await
            .ok();
    });

    (base_url, shutdown_tx)
}
