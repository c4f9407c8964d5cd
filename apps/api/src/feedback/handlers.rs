use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::feedback::models::FeedbackOutcome;
use crate::feedback::synthesizer::synthesize;
use crate::models::transcript::{AnalysisLog, Transcript};
use crate::records::store::persist_interview;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FeedbackRequest {
    pub resume_text: String,
    pub chat_history: Transcript,
    pub analysis_log: AnalysisLog,
}

/// POST /generate-feedback
///
/// Grades the interview and persists it. A failed grading call is returned in-band
/// and nothing is stored; schema violations and storage failures are errors.
pub async fn handle_generate_feedback(
    State(state): State<AppState>,
    Json(request): Json<FeedbackRequest>,
) -> Result<Json<FeedbackOutcome>, AppError> {
    let outcome = synthesize(
        state.llm.as_ref(),
        &state.config.feedback_model,
        &request.chat_history,
        &request.analysis_log,
    )
    .await?;

    match &outcome {
        FeedbackOutcome::Report(report) => {
            let id = persist_interview(
                &state.db,
                &request.resume_text,
                &request.chat_history,
                report,
            )
            .await?;
            info!("Interview {id} graded and stored");
        }
        FeedbackOutcome::Error(e) => warn!("Feedback unavailable, not storing: {}", e.error),
    }

    Ok(Json(outcome))
}
