// Voice collaborators: speech-to-text for candidate answers, text-to-speech for the interviewer.
// Both degrade in-band; neither ever fails a request.

pub mod synthesis;
pub mod transcription;

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum VoiceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Voice service returned no audio")]
    EmptyAudio,
}

/// HTTP client shared by the voice collaborators. One attempt per call, bounded by `timeout`.
pub fn build_http_client(timeout: Duration) -> Result<Client> {
    Client::builder()
        .timeout(timeout)
        .build()
        .context("Failed to build voice HTTP client")
}
