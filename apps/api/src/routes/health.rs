use axum::Json;
use serde_json::{json, Value};

use crate::interview::prompts::{PERSONA_NAME, PERSONA_PROMPT_VERSION};

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "interview-api",
        "persona": PERSONA_PROMPT_VERSION,
        "interviewer": PERSONA_NAME
    }))
}
