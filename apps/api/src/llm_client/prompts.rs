// Shared prompt fragments.
// Each service that needs LLM calls defines its own prompts.rs alongside it.

/// Instruction fragment that enforces JSON-only output.
pub const JSON_ONLY_INSTRUCTION: &str = "Return valid JSON ONLY. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences.";

/// Marks the start of the hidden assessment in an interviewer reply.
pub const ANALYSIS_TAG: &str = "[ANALYSIS]";

/// Marks the start of the candidate-facing reply.
pub const SPEECH_TAG: &str = "[SPEECH]";
