use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use docsum::application::ports::{AudioCodec, TextExtractor};
use docsum::application::services::{AudioTranscriber, SummarizationService, UploadService};
use docsum::infrastructure::audio::{SymphoniaCodec, TranscriptionEngineFactory};
use docsum::infrastructure::llm::create_llm_client;
use docsum::infrastructure::observability::{TracingConfig, init_tracing};
use docsum::infrastructure::text_processing::CompositeExtractor;
use docsum::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("Failed to load settings")?;
    let addr = settings
        .server
        .socket_addr()
        .context("Invalid server host")?;

    init_tracing(&TracingConfig::new(&settings.logging, environment), addr)
        .context("Failed to install tracing subscriber")?;

    if !settings.llm.has_api_key() {
        tracing::warn!(
            provider = ?settings.llm.provider,
            "No LLM API key configured, /summarize will fail until one is set"
        );
    }

    let documents: Arc<dyn TextExtractor> = Arc::new(CompositeExtractor::with_document_adapters());
    let codec: Arc<dyn AudioCodec> = Arc::new(SymphoniaCodec::default());
    let scratch_dir = settings.transcription.scratch_dir();
    tokio::fs::create_dir_all(&scratch_dir)
        .await
        .with_context(|| format!("Failed to create scratch dir {}", scratch_dir.display()))?;

    let audio_transcriber = Arc::new(AudioTranscriber::new(
        codec,
        TranscriptionEngineFactory::loader(&settings.transcription),
        scratch_dir,
        settings.transcription.max_duration_secs,
    ));

    if settings.transcription.preload_model {
        audio_transcriber
            .warm_up()
            .await
            .context("Failed to preload transcription engine")?;
    }

    let upload_service = Arc::new(UploadService::new(
        documents,
        Arc::clone(&audio_transcriber),
    ));
    let summarization_service =
        Arc::new(SummarizationService::new(create_llm_client(&settings.llm)));

    tracing::info!(
        llm_provider = ?settings.llm.provider,
        llm_model = %settings.llm.model,
        transcription_provider = ?settings.transcription.provider,
        transcription_model = %settings.transcription.model_id(),
        "Services initialized"
    );

    let state = AppState {
        upload_service,
        audio_transcriber,
        summarization_service,
        settings,
    };

    let router = create_router(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        return;
    }
    tracing::info!("Shutdown signal received");
}
