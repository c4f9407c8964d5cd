//! Envelope Parser: splits a raw interviewer completion into hidden analysis and visible speech.
//!
//! The model is asked to answer as `[ANALYSIS] ... [SPEECH] ...`. Models drift, so the parser
//! tries each strict layout in order and falls back to treating the whole reply as speech.
//! It never fails: the candidate always gets something to hear.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::llm_client::prompts::{ANALYSIS_TAG, SPEECH_TAG};

/// Analysis recorded when the reply carried no recognizable envelope.
pub const NO_ANALYSIS: &str = "No hidden analysis generated.";

static ANALYSIS_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\[ANALYSIS\]\s*(.*?)\s*\[SPEECH\]\s*(.*)").expect("valid envelope regex")
});

static SPEECH_FIRST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?is)\[SPEECH\]\s*(.*?)\s*\[ANALYSIS\]\s*(.*)").expect("valid envelope regex")
});

static STRAY_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\[(?:ANALYSIS|SPEECH)\]").expect("valid tag regex"));

/// Output of one interviewer turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResult {
    pub speech: String,
    pub analysis: String,
}

impl TurnResult {
    pub fn new(speech: impl Into<String>, analysis: impl Into<String>) -> Self {
        Self {
            speech: speech.into(),
            analysis: analysis.into(),
        }
    }
}

type Strategy = fn(&str) -> Option<TurnResult>;

/// Strict layouts, tried in priority order.
const STRATEGIES: [Strategy; 2] = [analysis_then_speech, speech_then_analysis];

/// Parses a raw completion. First matching strategy wins; otherwise the lenient fallback applies.
pub fn parse(raw: &str) -> TurnResult {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(raw))
        .unwrap_or_else(|| untagged(raw))
}

fn analysis_then_speech(raw: &str) -> Option<TurnResult> {
    let caps = ANALYSIS_FIRST.captures(raw)?;
    Some(TurnResult::new(caps[2].trim(), caps[1].trim()))
}

fn speech_then_analysis(raw: &str) -> Option<TurnResult> {
    let caps = SPEECH_FIRST.captures(raw)?;
    Some(TurnResult::new(caps[1].trim(), caps[2].trim()))
}

fn untagged(raw: &str) -> TurnResult {
    let speech = STRAY_TAG.replace_all(raw, "");
    TurnResult::new(speech.trim(), NO_ANALYSIS)
}

/// True when `text` still carries an envelope tag. Used to sanity-check surfaced speech.
pub fn contains_tag(text: &str) -> bool {
    let upper = text.to_uppercase();
    upper.contains(ANALYSIS_TAG) || upper.contains(SPEECH_TAG)
}
