// End-of-interview grading: structured report synthesis, validation, persistence hand-off.
// All LLM calls go through llm_client, no direct HTTP calls here.

pub mod handlers;
pub mod models;
pub mod prompts;
pub mod synthesizer;
