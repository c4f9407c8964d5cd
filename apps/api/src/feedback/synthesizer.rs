//! Feedback Synthesizer: grades a finished interview.
//!
//! The grader sees the full transcript plus the interviewer's hidden analysis log, and must
//! answer with a JSON `FeedbackReport`. Upstream failures degrade to an `ErrorReport`;
//! malformed or out-of-range payloads are schema violations and are never coerced.

use tracing::{error, info};

use crate::feedback::models::{ErrorReport, FeedbackError, FeedbackOutcome, FeedbackReport};
use crate::feedback::prompts::render_grading_prompt;
use crate::llm_client::{
    strip_json_fences, CompletionRequest, CompletionService, LlmError, ResponseFormat,
};
use crate::models::transcript::Utterance;

pub const GRADING_TEMPERATURE: f32 = 0.2;

pub fn build_grading_request(
    model: &str,
    transcript: &[Utterance],
    analysis_log: &[String],
) -> CompletionRequest {
    let mut messages = Vec::with_capacity(transcript.len() + 1);
    messages.push(Utterance::system(render_grading_prompt(transcript, analysis_log)));
    messages.extend_from_slice(transcript);

    CompletionRequest {
        model: model.to_string(),
        messages,
        temperature: GRADING_TEMPERATURE,
        max_tokens: None,
        response_format: ResponseFormat::JsonObject,
    }
}

/// Runs the grading pass over the whole interview.
pub async fn synthesize(
    llm: &dyn CompletionService,
    model: &str,
    transcript: &[Utterance],
    analysis_log: &[String],
) -> Result<FeedbackOutcome, FeedbackError> {
    info!(
        "Grading interview: {} utterances, {} analysis notes",
        transcript.len(),
        analysis_log.len()
    );
    let request = build_grading_request(model, transcript, analysis_log);

    let raw = match llm.complete(&request).await {
        Ok(raw) => raw,
        Err(e) => {
            error!("Feedback generation failed: {e}");
            let message = match e {
                LlmError::Api { .. } => "Failed to generate feedback".to_string(),
                other => other.to_string(),
            };
            return Ok(FeedbackOutcome::Error(ErrorReport { error: message }));
        }
    };

    let report = parse_report(&raw)?;
    info!(
        "Interview graded: score={} verdict={}",
        report.score,
        report.verdict.as_str()
    );
    Ok(FeedbackOutcome::Report(report))
}

/// Decodes and range-checks a grader payload.
pub fn parse_report(raw: &str) -> Result<FeedbackReport, FeedbackError> {
    let report: FeedbackReport = serde_json::from_str(strip_json_fences(raw))
        .map_err(|e| FeedbackError::Schema(format!("invalid feedback payload: {e}")))?;
    report.validate()?;
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::models::Verdict;
    use crate::models::transcript::Role;
    use crate::testing::{FakeCompletion, VALID_REPORT};

    fn transcript() -> Vec<Utterance> {
        vec![
            Utterance::assistant("Tell me about yourself."),
            Utterance::user("I built a payment service."),
            Utterance::assistant("What was the peak TPS?"),
            Utterance::user("Around 2k."),
        ]
    }

    #[tokio::test]
    async fn test_valid_payload_becomes_report() {
        let llm = FakeCompletion::new(|_| Ok(VALID_REPORT.to_string()));
        let outcome = synthesize(&llm, "grader", &transcript(), &["vague".to_string()])
            .await
            .unwrap();
        let FeedbackOutcome::Report(report) = outcome else {
            panic!("expected a report");
        };
        assert_eq!(report.score, 72);
        assert_eq!(report.verdict, Verdict::Hire);
        assert_eq!(report.strong_areas, vec!["Go concurrency".to_string()]);
    }

    #[tokio::test]
    async fn test_request_embeds_dossier_and_transcript() {
        let llm = FakeCompletion::new(|_| Ok(VALID_REPORT.to_string()));
        let notes = vec!["Claimed 2k TPS without evidence.".to_string()];
        synthesize(&llm, "grader", &transcript(), &notes).await.unwrap();

        let request = llm.requests().pop().unwrap();
        assert_eq!(request.response_format, ResponseFormat::JsonObject);
        assert_eq!(request.temperature, GRADING_TEMPERATURE);
        assert_eq!(request.messages.len(), 5);
        assert_eq!(request.messages[0].role, Role::System);
        assert!(request.messages[0]
            .content
            .contains("Claimed 2k TPS without evidence."));
        assert_eq!(request.messages[4].content, "Around 2k.");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_error_report() {
        let llm = FakeCompletion::new(|_| {
            Err(LlmError::Api {
                status: 500,
                message: "boom".to_string(),
            })
        });
        let outcome = synthesize(&llm, "grader", &transcript(), &[]).await.unwrap();
        assert_eq!(
            outcome,
            FeedbackOutcome::Error(ErrorReport {
                error: "Failed to generate feedback".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_non_json_payload_is_schema_violation() {
        let llm = FakeCompletion::new(|_| Ok("The candidate did fine.".to_string()));
        let result = synthesize(&llm, "grader", &transcript(), &[]).await;
        assert!(matches!(result, Err(FeedbackError::Schema(_))));
    }

    #[test]
    fn test_fenced_payload_parses() {
        let raw = format!("```json\n{VALID_REPORT}\n```");
        assert!(parse_report(&raw).is_ok());
    }

    #[test]
    fn test_missing_field_is_schema_violation() {
        let raw = VALID_REPORT.replace(r#""verdict": "Hire","#, "");
        let err = parse_report(&raw).unwrap_err();
        assert!(err.to_string().contains("verdict"));
    }

    #[test]
    fn test_negative_score_is_schema_violation() {
        let raw = VALID_REPORT.replace("\"score\": 72", "\"score\": -5");
        assert!(parse_report(&raw).is_err());
    }
}
