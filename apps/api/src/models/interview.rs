use serde::Serialize;
use sqlx::FromRow;

use crate::feedback::models::FeedbackReport;
use crate::models::transcript::Transcript;

/// Raw `interviews` row. Every column is nullable in legacy databases.
#[derive(Debug, Clone, FromRow)]
pub struct InterviewRow {
    pub id: i64,
    pub date: Option<String>,
    pub resume_snippet: Option<String>,
    pub score: Option<i64>,
    pub verdict: Option<String>,
    pub feedback: Option<String>,
    pub chat_history: Option<String>,
}

/// Feedback column of a stored interview.
///
/// Older databases hold feedback that predates the report schema (for example
/// `{"error": ...}` objects); those are passed through as raw JSON.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StoredFeedback {
    Report(FeedbackReport),
    Legacy(serde_json::Value),
}

impl StoredFeedback {
    pub fn from_column(raw: Option<&str>) -> Self {
        let Some(raw) = raw else {
            return Self::Legacy(serde_json::Value::Null);
        };
        match serde_json::from_str::<FeedbackReport>(raw) {
            Ok(report) => Self::Report(report),
            Err(_) => Self::Legacy(
                serde_json::from_str(raw)
                    .unwrap_or_else(|_| serde_json::Value::String(raw.to_string())),
            ),
        }
    }

    pub fn report(&self) -> Option<&FeedbackReport> {
        match self {
            Self::Report(report) => Some(report),
            Self::Legacy(_) => None,
        }
    }
}

/// A completed interview, decoded from its row.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewRecord {
    pub id: i64,
    pub date: String,
    pub resume_excerpt: String,
    pub score: i64,
    pub verdict: String,
    pub feedback: StoredFeedback,
    pub transcript: Transcript,
}
