// Interview conversation: envelope protocol, history windowing, turn orchestration.
// All LLM calls go through llm_client, no direct HTTP calls here.

pub mod envelope;
pub mod handlers;
pub mod history;
pub mod orchestrator;
pub mod prompts;
