//! Axum route handlers for the interview conversation.
//!
//! The API is stateless: the client sends the transcript with every turn and keeps
//! the analysis log itself until it asks for feedback.

use axum::{extract::State, Json};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::interview::envelope::TurnResult;
use crate::interview::orchestrator::run_turn;
use crate::models::transcript::{Transcript, Utterance};
use crate::routes::form::FormFields;
use crate::state::AppState;
use crate::voice::transcription::DEFAULT_LANGUAGE;

pub const NO_INPUT_DETECTED: &str = "No input detected";

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// The interviewer's side of a turn, with synthesized audio when available.
#[derive(Debug, Serialize)]
pub struct AiTurnResponse {
    pub ai_speech: String,
    pub ai_analysis: String,
    pub audio_base64: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ChatResponse {
    Turn {
        user_text: String,
        #[serde(flatten)]
        ai: AiTurnResponse,
    },
    NoInput {
        error: String,
    },
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /start-interview
///
/// Form: `resume_text`. Runs the opening turn over an empty history.
pub async fn handle_start_interview(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<AiTurnResponse>, AppError> {
    let resume_text = form.require_text("resume_text")?;
    info!("Starting interview ({} resume chars)", resume_text.chars().count());

    let turn = run_turn(
        state.llm.as_ref(),
        &state.config.interview_model,
        resume_text,
        &[],
    )
    .await;

    Ok(Json(voice_turn(&state, turn).await))
}

/// POST /chat
///
/// Form: `resume_text`, `chat_history_json`, optional `user_text`, optional file `audio_file`.
/// A recording takes precedence over typed text.
pub async fn handle_chat(
    State(state): State<AppState>,
    form: FormFields,
) -> Result<Json<ChatResponse>, AppError> {
    let resume_text = form.require_text("resume_text")?;
    let mut history: Transcript = serde_json::from_str(form.require_text("chat_history_json")?)
        .map_err(|e| AppError::Validation(format!("chat_history_json is not a valid transcript: {e}")))?;

    let user_text = match form.file("audio_file") {
        Some(audio) => {
            state
                .transcriber
                .transcribe(audio.bytes.clone(), &audio.file_name, DEFAULT_LANGUAGE)
                .await
        }
        None => form.text("user_text").unwrap_or_default().to_string(),
    };

    if user_text.trim().is_empty() {
        return Ok(Json(ChatResponse::NoInput {
            error: NO_INPUT_DETECTED.to_string(),
        }));
    }

    history.push(Utterance::user(user_text.clone()));

    let turn = run_turn(
        state.llm.as_ref(),
        &state.config.interview_model,
        resume_text,
        &history,
    )
    .await;

    Ok(Json(ChatResponse::Turn {
        user_text,
        ai: voice_turn(&state, turn).await,
    }))
}

/// Attaches synthesized audio to a turn. Missing audio is not an error.
async fn voice_turn(state: &AppState, turn: TurnResult) -> AiTurnResponse {
    let audio_base64 = state
        .voice
        .synthesize(&turn.speech)
        .await
        .map(|audio| STANDARD.encode(&audio));

    AiTurnResponse {
        ai_speech: turn.speech,
        ai_analysis: turn.analysis,
        audio_base64,
    }
}
