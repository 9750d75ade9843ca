//! Application configuration

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// LLM API base URL (OpenAI-compatible)
    pub llm_base_url: String,
    /// Model used for interpretations
    pub llm_model: String,
    /// Bearer token for hosted backends
    pub llm_api_key: Option<String>,
    /// Give up on the backend after this long
    pub request_timeout: Duration,

    /// Where saved result cards are written
    pub export_dir: PathBuf,
}

impl AppConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            llm_base_url: env::var("FORTUNE_LLM_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:11434/v1".to_string()),
            llm_model: env::var("FORTUNE_LLM_MODEL").unwrap_or_else(|_| "qwen3:8b".to_string()),
            llm_api_key: env::var("FORTUNE_LLM_API_KEY").ok(),
            request_timeout: Duration::from_secs(
                env::var("FORTUNE_REQUEST_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "30".to_string())
                    .parse()
                    .context("FORTUNE_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?,
            ),

            export_dir: env::var("FORTUNE_EXPORT_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
        })
    }
}
