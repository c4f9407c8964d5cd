//! Persists completed interviews and lists them newest first.
//!
//! Rows are insert-only. Each insert is a single statement, so concurrent sessions never
//! interleave partial writes, and ids come from SQLite `AUTOINCREMENT`.

use sqlx::SqlitePool;
use thiserror::Error;
use tracing::{info, warn};

use crate::feedback::models::FeedbackReport;
use crate::models::interview::{InterviewRecord, InterviewRow, StoredFeedback};
use crate::models::transcript::{Transcript, Utterance};

pub const RESUME_EXCERPT_CHARS: usize = 100;
const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const LEGACY_VERDICT: &str = "N/A";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// First `RESUME_EXCERPT_CHARS` characters of the resume, always followed by an ellipsis.
pub fn resume_excerpt(resume_text: &str) -> String {
    let mut excerpt: String = resume_text.chars().take(RESUME_EXCERPT_CHARS).collect();
    excerpt.push_str("...");
    excerpt
}

/// Stores a completed interview and returns its store-assigned id.
pub async fn persist_interview(
    pool: &SqlitePool,
    resume_text: &str,
    transcript: &[Utterance],
    report: &FeedbackReport,
) -> Result<i64, StoreError> {
    let feedback = serde_json::to_string(report)?;
    let chat_history = serde_json::to_string(transcript)?;
    let date = chrono::Local::now().format(DATE_FORMAT).to_string();

    let id = sqlx::query(
        r#"
        INSERT INTO interviews (date, resume_snippet, score, verdict, feedback, chat_history)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&date)
    .bind(resume_excerpt(resume_text))
    .bind(i64::from(report.score))
    .bind(report.verdict.as_str())
    .bind(feedback)
    .bind(chat_history)
    .execute(pool)
    .await?
    .last_insert_rowid();

    info!("Saved interview {id} (score {})", report.score);
    Ok(id)
}

/// All stored interviews, most recent first.
///
/// Feedback that predates the report schema is listed as raw JSON with the row's own
/// score and verdict. Rows whose transcript cannot be decoded are skipped.
pub async fn list_recent(pool: &SqlitePool) -> Result<Vec<InterviewRecord>, StoreError> {
    let rows = sqlx::query_as::<_, InterviewRow>(
        r#"
        SELECT id, date, resume_snippet, score, verdict, feedback, chat_history
        FROM interviews
        ORDER BY id DESC
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .filter_map(|row| {
            let id = row.id;
            decode_row(row)
                .map_err(|e| warn!("Skipping interview {id}: {e}"))
                .ok()
        })
        .collect())
}

fn decode_row(row: InterviewRow) -> Result<InterviewRecord, StoreError> {
    let feedback = StoredFeedback::from_column(row.feedback.as_deref());
    if feedback.report().is_none() {
        warn!("Interview {} has legacy feedback; listing it raw", row.id);
    }

    // Legacy rows predate the chat_history column.
    let transcript: Transcript = match row.chat_history.as_deref() {
        Some(raw) if !raw.is_empty() => serde_json::from_str(raw)?,
        _ => Vec::new(),
    };

    let score = row
        .score
        .or_else(|| feedback.report().map(|r| i64::from(r.score)))
        .unwrap_or_default();
    let verdict = row
        .verdict
        .or_else(|| feedback.report().map(|r| r.verdict.as_str().to_string()))
        .unwrap_or_else(|| LEGACY_VERDICT.to_string());

    Ok(InterviewRecord {
        id: row.id,
        date: row.date.unwrap_or_default(),
        resume_excerpt: row.resume_snippet.unwrap_or_default(),
        score,
        verdict,
        feedback,
        transcript,
    })
}
