use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use deviation_analyzer::application::ports::{ImageDescriber, LlmClient};
use deviation_analyzer::application::services::{
    AnalysisDispatcher, AnalysisPipeline, DeviationService,
};
use deviation_analyzer::infrastructure::audio::TranscriptionEngineFactory;
use deviation_analyzer::infrastructure::llm::create_llm_client;
use deviation_analyzer::infrastructure::observability::{TracingConfig, init_tracing};
use deviation_analyzer::infrastructure::storage::BlobStoreFactory;
use deviation_analyzer::infrastructure::vision::OpenAiVisionDescriber;
use deviation_analyzer::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;

    init_tracing(&TracingConfig::from_settings(environment, &settings.logging));

    let blob_store =
        BlobStoreFactory::create(&settings.storage).context("Failed to create blob store")?;

    let transcription_engine =
        TranscriptionEngineFactory::create(&settings.transcription, Arc::clone(&blob_store))
            .context("Failed to create transcription engine")?;

    let vision_key = settings
        .vision
        .api_key
        .clone()
        .unwrap_or_else(|| settings.llm.api_key.clone());
    let image_describer: Arc<dyn ImageDescriber> = Arc::new(OpenAiVisionDescriber::new(
        Arc::clone(&blob_store),
        &settings.vision.base_url,
        &settings.vision.model,
        &vision_key,
        settings.vision.max_tokens,
    ));

    let llm_client: Arc<dyn LlmClient> =
        Arc::new(create_llm_client(&settings.llm).context("Failed to create LLM client")?);

    let pipeline = Arc::new(AnalysisPipeline::new(
        Arc::clone(&blob_store),
        Arc::clone(&transcription_engine),
        image_describer,
        llm_client,
        settings.analysis.prompt_options(),
    ));
    let dispatcher = Arc::new(AnalysisDispatcher::start(pipeline, settings.analysis.dispatch));

    let deviation_service = Arc::new(DeviationService::new(
        blob_store,
        transcription_engine,
        dispatcher,
    ));

    let state = AppState {
        deviation_service,
        api_key: settings.server.api_key.as_deref().map(Arc::from),
    };

    let router = create_router(state);

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("Invalid server address")?;
    tracing::info!(%addr, environment = %environment, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
