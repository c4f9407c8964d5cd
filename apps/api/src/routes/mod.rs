pub mod form;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::feedback::handlers as feedback;
use crate::interview::handlers as interview;
use crate::records::handlers as records;
use crate::resume::handlers as resume;
use crate::state::AppState;

/// Audio answers and resume PDFs can exceed axum's 2 MiB default.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {uri}"))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/extract-resume", post(resume::handle_extract_resume))
        .route("/start-interview", post(interview::handle_start_interview))
        .route("/chat", post(interview::handle_chat))
        .route(
            "/generate-feedback",
            post(feedback::handle_generate_feedback),
        )
        .route("/history", get(records::handle_history))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
