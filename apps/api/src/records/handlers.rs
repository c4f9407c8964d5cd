use axum::{extract::State, Json};
use serde::Serialize;

use crate::errors::AppError;
use crate::models::interview::{InterviewRecord, StoredFeedback};
use crate::models::transcript::Transcript;
use crate::records::store::list_recent;
use crate::state::AppState;

/// One past interview as shown on the history page.
#[derive(Debug, Serialize)]
pub struct HistoryEntry {
    pub id: i64,
    pub date: String,
    pub score: i64,
    pub verdict: String,
    pub feedback: StoredFeedback,
    pub chat_history: Transcript,
}

impl From<InterviewRecord> for HistoryEntry {
    fn from(record: InterviewRecord) -> Self {
        Self {
            id: record.id,
            date: record.date,
            score: record.score,
            verdict: record.verdict,
            feedback: record.feedback,
            chat_history: record.transcript,
        }
    }
}

/// GET /history
pub async fn handle_history(
    State(state): State<AppState>,
) -> Result<Json<Vec<HistoryEntry>>, AppError> {
    let records = list_recent(&state.db).await?;
    Ok(Json(records.into_iter().map(HistoryEntry::from).collect()))
}
