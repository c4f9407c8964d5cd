//! Fakes for the remote collaborators and shared fixtures.

use std::sync::Mutex;

use async_trait::async_trait;
use axum::Router;
use bytes::Bytes;
use tokio::net::TcpListener;

use crate::feedback::models::{CategoryScores, FeedbackReport, Verdict};
use crate::llm_client::{CompletionRequest, CompletionService, LlmError};
use crate::voice::synthesis::Synthesizer;
use crate::voice::transcription::Transcriber;
use crate::voice::VoiceError;

pub const VALID_REPORT: &str = r#"{
    "score": 72,
    "verdict": "Hire",
    "feedback_summary": "Solid payments background. Vague on failure handling.",
    "weak_areas": ["Idempotency", "Quantifying impact"],
    "strong_areas": ["Go concurrency"],
    "category_scores": {
        "Technical Skills": 8,
        "Communication": 6,
        "Problem Solving": 7,
        "Experience Match": 9
    }
}"#;

pub fn sample_report(score: u32) -> FeedbackReport {
    FeedbackReport {
        score,
        verdict: if score >= 80 {
            Verdict::StrongHire
        } else if score >= 60 {
            Verdict::Hire
        } else {
            Verdict::NoHire
        },
        feedback_summary: "Clear ownership of the payment service.".to_string(),
        weak_areas: vec!["Capacity planning".to_string()],
        strong_areas: vec!["Go".to_string(), "Debugging".to_string()],
        category_scores: CategoryScores {
            technical_skills: 7,
            communication: 8,
            problem_solving: 6,
            experience_match: 9,
        },
    }
}

type Responder = Box<dyn Fn(&CompletionRequest) -> Result<String, LlmError> + Send + Sync>;

/// Completion fake driven by a closure. Records every request it receives.
pub struct FakeCompletion {
    responder: Responder,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeCompletion {
    pub fn new<F>(responder: F) -> Self
    where
        F: Fn(&CompletionRequest) -> Result<String, LlmError> + Send + Sync + 'static,
    {
        Self {
            responder: Box::new(responder),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionService for FakeCompletion {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        (self.responder)(request)
    }
}

/// Transcriber fake that always "hears" the same text.
pub struct FixedTranscriber(pub String);

#[async_trait]
impl Transcriber for FixedTranscriber {
    async fn transcribe(&self, _audio: Bytes, _file_name: &str, _language: &str) -> String {
        self.0.clone()
    }
}

/// Synthesizer fake returning fixed audio, or failing.
pub struct FixedSynthesizer {
    name: &'static str,
    audio: Option<&'static [u8]>,
}

impl FixedSynthesizer {
    pub fn audio(name: &'static str, audio: &'static [u8]) -> Self {
        Self {
            name,
            audio: Some(audio),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self { name, audio: None }
    }
}

#[async_trait]
impl Synthesizer for FixedSynthesizer {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn synthesize(&self, _text: &str) -> Result<Bytes, VoiceError> {
        match self.audio {
            Some(audio) => Ok(Bytes::from_static(audio)),
            None => Err(VoiceError::Api {
                status: 503,
                message: "unavailable".to_string(),
            }),
        }
    }
}

/// Serves `router` on an ephemeral local port and returns its base URL.
/// Stands in for a remote API so the HTTP clients run against real responses.
pub async fn spawn_upstream(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}
