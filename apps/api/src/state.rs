use std::sync::Arc;

use sqlx::SqlitePool;

use crate::config::Config;
use crate::llm_client::CompletionService;
use crate::voice::synthesis::SynthesisChain;
use crate::voice::transcription::Transcriber;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Remote collaborators sit behind traits so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub llm: Arc<dyn CompletionService>,
    pub transcriber: Arc<dyn Transcriber>,
    pub voice: SynthesisChain,
    pub config: Config,
}
