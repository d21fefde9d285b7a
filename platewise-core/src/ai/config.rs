//! AI configuration from environment variables.

use std::env;
use thiserror::Error;

/// Default OpenRouter base URL.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Default model to use.
pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";

/// Default sampling temperature for assistant replies.
pub const DEFAULT_TEMPERATURE: f32 = 0.7;

/// Default completion token budget.
pub const DEFAULT_MAX_TOKENS: u32 = 2048;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// AI client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key for OpenRouter.
    pub api_key: String,
    /// Model name (e.g., "openai/gpt-4o-mini").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Completion token budget.
    pub max_tokens: u32,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `OPENROUTER_API_KEY`: API key for OpenRouter
    ///
    /// Optional:
    /// - `PLATEWISE_AI_MODEL`: Model name (default: "openai/gpt-4o-mini")
    /// - `PLATEWISE_AI_BASE_URL`: API base URL (default: OpenRouter)
    /// - `PLATEWISE_AI_TEMPERATURE`: Sampling temperature (default: 0.7)
    /// - `PLATEWISE_AI_MAX_TOKENS`: Completion budget (default: 2048)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = env::var("OPENROUTER_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENROUTER_API_KEY".to_string()))?;

        let model = env::var("PLATEWISE_AI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());

        let base_url =
            env::var("PLATEWISE_AI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        let temperature = env::var("PLATEWISE_AI_TEMPERATURE")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TEMPERATURE);

        let max_tokens = env::var("PLATEWISE_AI_MAX_TOKENS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_MAX_TOKENS);

        Ok(Self {
            api_key,
            model,
            base_url,
            temperature,
            max_tokens,
        })
    }
}
