//! Speech-to-text via the Whisper transcription endpoint.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use crate::voice::VoiceError;

/// Returned in place of a transcript when the service answers with an error status.
pub const HEARING_ERROR: &str = "Error hearing audio.";

/// Returned in place of a transcript when the service is unreachable.
pub const AUDIO_OFFLINE: &str = "System Offline (Audio).";

pub const DEFAULT_LANGUAGE: &str = "en";

/// Speech-to-text collaborator. Never fails: errors come back as fixed human-readable text.
#[async_trait]
pub trait Transcriber: Send + Sync {
    async fn transcribe(&self, audio: Bytes, file_name: &str, language: &str) -> String;
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    #[serde(default)]
    text: String,
}

/// Whisper over an OpenAI-compatible `/audio/transcriptions` endpoint.
#[derive(Clone)]
pub struct WhisperTranscriber {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl WhisperTranscriber {
    pub fn new(client: Client, api_key: String, base_url: String, model: String) -> Self {
        Self {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
        }
    }

    async fn request(&self, audio: Bytes, file_name: &str, language: &str) -> Result<String, VoiceError> {
        let form = Form::new()
            .part(
                "file",
                Part::stream(audio)
                    .file_name(file_name.to_string())
                    .mime_str(mime_for(file_name))?,
            )
            .text("model", self.model.clone())
            .text("language", language.to_string())
            .text("response_format", "json");

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.base_url))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VoiceError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        let body: TranscriptionResponse = response.json().await?;
        Ok(body.text)
    }
}

#[async_trait]
impl Transcriber for WhisperTranscriber {
    async fn transcribe(&self, audio: Bytes, file_name: &str, language: &str) -> String {
        info!("Transcribing {} bytes of audio ({file_name})", audio.len());
        match self.request(audio, file_name, language).await {
            Ok(text) => text,
            Err(e) => {
                error!("Whisper error: {e}");
                degraded_text(&e).to_string()
            }
        }
    }
}

fn degraded_text(e: &VoiceError) -> &'static str {
    match e {
        VoiceError::Api { .. } => HEARING_ERROR,
        _ => AUDIO_OFFLINE,
    }
}

/// Container type from the uploaded file name; Whisper sniffs the format from it.
fn mime_for(file_name: &str) -> &'static str {
    match file_name.rsplit('.').next().map(str::to_ascii_lowercase).as_deref() {
        Some("webm") => "audio/webm",
        Some("mp3") => "audio/mpeg",
        Some("ogg") => "audio/ogg",
        Some("m4a") => "audio/mp4",
        _ => "audio/wav",
    }
}
