//! Text-to-speech as an ordered chain of synthesizers.
//!
//! Each stage either yields audio or an error; the first stage with audio wins.
//! ElevenLabs is the primary voice when a key is configured, Google Translate TTS is the
//! fallback. `None` means every stage failed and the turn ships without audio.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use reqwest::Client;
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};

use crate::voice::VoiceError;

const ELEVENLABS_API_URL: &str = "https://api.elevenlabs.io/v1/text-to-speech";
const ELEVENLABS_MODEL: &str = "eleven_turbo_v2_5";

const GOOGLE_TTS_URL: &str = "https://translate.google.co.in/translate_tts";
/// Google rejects longer `q` values; text is sent in chunks and the mp3 frames concatenated.
const GOOGLE_TTS_MAX_CHARS: usize = 100;

/// A single text-to-speech backend.
#[async_trait]
pub trait Synthesizer: Send + Sync {
    fn name(&self) -> &'static str;
    async fn synthesize(&self, text: &str) -> Result<Bytes, VoiceError>;
}

/// Ordered fallback chain. Stages are tried in order; first non-empty audio wins.
#[derive(Clone, Default)]
pub struct SynthesisChain {
    stages: Vec<Arc<dyn Synthesizer>>,
}

impl SynthesisChain {
    pub fn new(stages: Vec<Arc<dyn Synthesizer>>) -> Self {
        Self { stages }
    }

    /// Primary voice only when a credential exists, then the fallback.
    pub fn from_credentials(client: Client, elevenlabs_api_key: Option<String>, voice_id: String) -> Self {
        let mut stages: Vec<Arc<dyn Synthesizer>> = Vec::new();
        match elevenlabs_api_key {
            Some(api_key) => stages.push(Arc::new(ElevenLabsSynthesizer::new(
                client.clone(),
                api_key,
                voice_id,
            ))),
            None => info!("ELEVENLABS_API_KEY not set; using fallback voice only"),
        }
        stages.push(Arc::new(GoogleTtsSynthesizer::new(client)));
        Self::new(stages)
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }

    pub async fn synthesize(&self, text: &str) -> Option<Bytes> {
        if text.trim().is_empty() {
            return None;
        }
        for stage in &self.stages {
            match stage.synthesize(text).await {
                Ok(audio) if !audio.is_empty() => return Some(audio),
                Ok(_) => warn!("{} returned no audio; falling back", stage.name()),
                Err(e) => warn!("{} failed: {e}; falling back", stage.name()),
            }
        }
        warn!("All synthesizers failed; turn will have no audio");
        None
    }
}

// ────────────────────────────────────────────────────────────────────────────
// ElevenLabs
// ────────────────────────────────────────────────────────────────────────────

pub struct ElevenLabsSynthesizer {
    client: Client,
    api_key: String,
    voice_id: String,
    base_url: String,
}

#[derive(Debug, Serialize)]
struct ElevenLabsRequest<'a> {
    text: &'a str,
    model_id: &'a str,
    voice_settings: serde_json::Value,
}

impl ElevenLabsSynthesizer {
    pub fn new(client: Client, api_key: String, voice_id: String) -> Self {
        Self {
            client,
            api_key,
            voice_id,
            base_url: ELEVENLABS_API_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait]
impl Synthesizer for ElevenLabsSynthesizer {
    fn name(&self) -> &'static str {
        "elevenlabs"
    }

    async fn synthesize(&self, text: &str) -> Result<Bytes, VoiceError> {
        let body = ElevenLabsRequest {
            text,
            model_id: ELEVENLABS_MODEL,
            voice_settings: json!({"stability": 0.5, "similarity_boost": 0.75}),
        };

        let response = self
            .client
            .post(format!("{}/{}", self.base_url, self.voice_id))
            .header("Accept", "audio/mpeg")
            .header("xi-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(VoiceError::Api {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.bytes().await?)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Google Translate TTS (fallback)
// ────────────────────────────────────────────────────────────────────────────

pub struct GoogleTtsSynthesizer {
    client: Client,
    endpoint: String,
}

impl GoogleTtsSynthesizer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            endpoint: GOOGLE_TTS_URL.to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Synthesizer for GoogleTtsSynthesizer {
    fn name(&self) -> &'static str {
        "google-tts"
    }

    async fn synthesize(&self, text: &str) -> Result<Bytes, VoiceError> {
        let chunks = chunk_text(text, GOOGLE_TTS_MAX_CHARS);
        let total = chunks.len().to_string();
        let mut audio = BytesMut::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            let idx = idx.to_string();
            let textlen = chunk.chars().count().to_string();
            let response = self
                .client
                .get(&self.endpoint)
                .query(&[
                    ("ie", "UTF-8"),
                    ("client", "tw-ob"),
                    ("tl", "en"),
                    ("q", chunk.as_str()),
                    ("total", total.as_str()),
                    ("idx", idx.as_str()),
                    ("textlen", textlen.as_str()),
                ])
                .send()
                .await?;

            let status = response.status();
            if !status.is_success() {
                return Err(VoiceError::Api {
                    status: status.as_u16(),
                    message: response.text().await.unwrap_or_default(),
                });
            }
            audio.extend_from_slice(&response.bytes().await?);
        }

        if audio.is_empty() {
            return Err(VoiceError::EmptyAudio);
        }
        Ok(audio.freeze())
    }
}

/// Splits text on whitespace into chunks of at most `max_chars` characters.
/// Words longer than `max_chars` are hard-split.
fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: String = word.to_string();
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(max_chars).collect();
            word = word.chars().skip(max_chars).collect();
            chunks.push(head);
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars {
            chunks.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
