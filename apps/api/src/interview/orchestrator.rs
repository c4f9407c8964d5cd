//! Turn Orchestrator: one interviewer reply per call.
//!
//! Flow: window history → render persona prompt → complete → parse envelope.
//! Upstream failures become an in-band error turn; this module never returns an error.

use tracing::{error, info, warn};

use crate::interview::envelope::{self, TurnResult};
use crate::interview::history::{window, DEFAULT_MAX_TURNS};
use crate::interview::prompts::{render_persona_prompt, PERSONA_PROMPT_VERSION};
use crate::llm_client::{CompletionRequest, CompletionService, LlmError, ResponseFormat};
use crate::models::transcript::Utterance;

/// Low temperature: consistent interviewer behaviour over creativity.
pub const TURN_TEMPERATURE: f32 = 0.3;
pub const TURN_MAX_TOKENS: u32 = 1000;

pub const SYSTEM_ERROR_ANALYSIS: &str = "System Error";
pub const SYSTEM_OFFLINE_ANALYSIS: &str = "System Offline";

/// Builds the exact request sent for a turn: persona instruction followed by the windowed history.
pub fn build_turn_request(model: &str, resume_text: &str, full_history: &[Utterance]) -> CompletionRequest {
    let short_history = window(full_history, DEFAULT_MAX_TURNS);

    let mut messages = Vec::with_capacity(short_history.len() + 1);
    messages.push(Utterance::system(render_persona_prompt(resume_text)));
    messages.extend_from_slice(short_history);

    CompletionRequest {
        model: model.to_string(),
        messages,
        temperature: TURN_TEMPERATURE,
        max_tokens: Some(TURN_MAX_TOKENS),
        response_format: ResponseFormat::Text,
    }
}

/// Produces the interviewer's next turn. With an empty history the persona prompt
/// directs the model to answer with the fixed greeting.
pub async fn run_turn(
    llm: &dyn CompletionService,
    model: &str,
    resume_text: &str,
    full_history: &[Utterance],
) -> TurnResult {
    let request = build_turn_request(model, resume_text, full_history);
    info!(
        "Running interview turn: history={} sent={} prompt={}",
        full_history.len(),
        request.messages.len() - 1,
        PERSONA_PROMPT_VERSION
    );

    match llm.complete(&request).await {
        Ok(raw) => {
            let result = envelope::parse(&raw);
            if result.analysis == envelope::NO_ANALYSIS {
                warn!("Interviewer reply had no recognizable envelope; surfacing it as speech");
            } else if envelope::contains_tag(&result.speech) {
                warn!("Interviewer speech still carries an envelope tag");
            }
            result
        }
        Err(e) => error_turn(e),
    }
}

fn error_turn(e: LlmError) -> TurnResult {
    match e {
        LlmError::Api { status, message } => {
            error!("Completion API error {status}: {message}");
            TurnResult::new(format!("API Error {status}"), SYSTEM_ERROR_ANALYSIS)
        }
        other => {
            error!("Completion connection error: {other}");
            TurnResult::new(
                format!("Connection Exception: {other}"),
                SYSTEM_OFFLINE_ANALYSIS,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interview::prompts::{GREETING_ANALYSIS, GREETING_SPEECH};
    use crate::models::transcript::Role;
    use crate::testing::FakeCompletion;

    const MODEL: &str = "test-model";

    fn greeting_envelope() -> String {
        format!("[ANALYSIS]\n{GREETING_ANALYSIS}\n[SPEECH]\n{GREETING_SPEECH}")
    }

    #[tokio::test]
    async fn test_empty_history_yields_greeting() {
        let llm = FakeCompletion::new(|_| Ok(greeting_envelope()));
        for resume in ["Senior backend engineer, 5 years Go", "", "Data scientist"] {
            let result = run_turn(&llm, MODEL, resume, &[]).await;
            assert_eq!(result, TurnResult::new(GREETING_SPEECH, GREETING_ANALYSIS));
        }
        let requests = llm.requests();
        assert!(requests.iter().all(|r| r.messages.len() == 1));
    }

    #[tokio::test]
    async fn test_request_carries_persona_and_windowed_history() {
        let llm = FakeCompletion::new(|_| Ok("[ANALYSIS] ok [SPEECH] Next.".to_string()));
        let history: Vec<Utterance> = (0..9)
            .map(|i| Utterance::user(format!("answer {i}")))
            .collect();

        run_turn(&llm, MODEL, "Rust engineer", &history).await;

        let request = llm.requests().pop().unwrap();
        assert_eq!(request.model, MODEL);
        assert_eq!(request.temperature, TURN_TEMPERATURE);
        assert_eq!(request.max_tokens, Some(TURN_MAX_TOKENS));
        assert_eq!(request.response_format, ResponseFormat::Text);
        assert_eq!(request.messages.len(), 1 + DEFAULT_MAX_TURNS);
        assert_eq!(request.messages[0].role, Role::System);
        assert!(request.messages[0].content.contains("Rust engineer"));
        assert_eq!(request.messages[1].content, "answer 3");
        assert_eq!(request.messages[6].content, "answer 8");
    }

    #[tokio::test]
    async fn test_upstream_status_error_becomes_error_turn() {
        let llm = FakeCompletion::new(|_| {
            Err(LlmError::Api {
                status: 503,
                message: "overloaded".to_string(),
            })
        });
        let result = run_turn(&llm, MODEL, "resume", &[Utterance::user("hi")]).await;
        assert_eq!(result.speech, "API Error 503");
        assert_eq!(result.analysis, SYSTEM_ERROR_ANALYSIS);
    }

    #[tokio::test]
    async fn test_empty_completion_becomes_offline_turn() {
        let llm = FakeCompletion::new(|_| Err(LlmError::EmptyContent));
        let result = run_turn(&llm, MODEL, "resume", &[Utterance::user("hi")]).await;
        assert!(result.speech.starts_with("Connection Exception"));
        assert_eq!(result.analysis, SYSTEM_OFFLINE_ANALYSIS);
    }

    #[tokio::test]
    async fn test_untagged_reply_is_surfaced_as_speech() {
        let llm = FakeCompletion::new(|_| Ok("Quantify that.".to_string()));
        let result = run_turn(&llm, MODEL, "resume", &[Utterance::user("it was fast")]).await;
        assert_eq!(result.speech, "Quantify that.");
        assert_eq!(result.analysis, envelope::NO_ANALYSIS);
    }
}
