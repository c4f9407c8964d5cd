use anyhow::{Context, Result};

const DEFAULT_GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_INTERVIEW_MODEL: &str = "openai/gpt-oss-120b";
const DEFAULT_FEEDBACK_MODEL: &str = "llama-3.3-70b-versatile";
const DEFAULT_TRANSCRIPTION_MODEL: &str = "whisper-large-v3";
const DEFAULT_VOICE_ID: &str = "EXAVITQu4vr4xnSDxMaL";

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_base_url: String,
    pub interview_model: String,
    pub feedback_model: String,
    pub transcription_model: String,
    /// Primary voice is skipped entirely when unset.
    pub elevenlabs_api_key: Option<String>,
    pub elevenlabs_voice_id: String,
    pub database_path: String,
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_base_url: env_or("GROQ_BASE_URL", DEFAULT_GROQ_BASE_URL),
            interview_model: env_or("INTERVIEW_MODEL", DEFAULT_INTERVIEW_MODEL),
            feedback_model: env_or("FEEDBACK_MODEL", DEFAULT_FEEDBACK_MODEL),
            transcription_model: env_or("TRANSCRIPTION_MODEL", DEFAULT_TRANSCRIPTION_MODEL),
            elevenlabs_api_key: std::env::var("ELEVENLABS_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            elevenlabs_voice_id: env_or("ELEVENLABS_VOICE_ID", DEFAULT_VOICE_ID),
            database_path: env_or("DATABASE_PATH", "mockmate.db"),
            allowed_origins: parse_origins(&env_or("ALLOWED_ORIGINS", "http://localhost:3000")),
            request_timeout_secs: env_or("REQUEST_TIMEOUT_SECS", "120")
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            port: env_or("PORT", "8000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_splits_and_trims() {
        let origins = parse_origins("http://localhost:3000, http://10.0.14.180:3000 ,");
        assert_eq!(
            origins,
            vec![
                "http://localhost:3000".to_string(),
                "http://10.0.14.180:3000".to_string()
            ]
        );
    }

    #[test]
    fn test_parse_origins_empty_yields_nothing() {
        assert!(parse_origins("").is_empty());
    }
}
