mod config;
mod db;
mod errors;
mod feedback;
mod interview;
mod llm_client;
mod models;
mod records;
mod resume;
mod routes;
mod state;
mod voice;

#[cfg(test)]
mod testing;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, migrate};
use crate::interview::prompts::PERSONA_PROMPT_VERSION;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::voice::build_http_client;
use crate::voice::synthesis::SynthesisChain;
use crate::voice::transcription::WhisperTranscriber;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http={}",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log,
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Interview API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize SQLite
    let db = create_pool(&config.database_path).await?;
    migrate(&db).await?;

    let timeout = Duration::from_secs(config.request_timeout_secs);

    // Initialize LLM client
    let llm = LlmClient::new(config.groq_api_key.clone(), config.groq_base_url.clone(), timeout)?;
    info!(
        "LLM client initialized (interview: {}, feedback: {}, persona: {})",
        config.interview_model, config.feedback_model, PERSONA_PROMPT_VERSION
    );

    // Initialize voice collaborators
    let http = build_http_client(timeout)?;
    let transcriber = WhisperTranscriber::new(
        http.clone(),
        config.groq_api_key.clone(),
        config.groq_base_url.clone(),
        config.transcription_model.clone(),
    );
    let voice = SynthesisChain::from_credentials(
        http,
        config.elevenlabs_api_key.clone(),
        config.elevenlabs_voice_id.clone(),
    );
    info!("Voice chain: {:?}", voice.stage_names());

    // Build app state
    let state = AppState {
        db,
        llm: Arc::new(llm),
        transcriber: Arc::new(transcriber),
        voice,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config.allowed_origins)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// CORS restricted to the configured frontend origins.
fn build_cors(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any))
}
