//! Chat-completion client abstraction.
//!
//! A trait-based abstraction over the hosted completion provider, with a fake
//! implementation for testing. The real client talks to an OpenAI-compatible
//! API (OpenRouter) via async-openai.

mod client;
mod config;
mod fake;
mod types;

pub use client::OpenRouterClient;
pub use config::{AiConfig, ConfigError};
pub use fake::FakeAiClient;
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};

use async_trait::async_trait;
use thiserror::Error;

/// Error type for completion dispatch.
#[derive(Debug, Error)]
pub enum AiError {
    /// Provider unconfigured or unreachable. Maps to a 503 at the API surface.
    #[error("Completion service unavailable: {0}")]
    Unavailable(String),

    /// Any other failure from the provider.
    #[error("Upstream completion error: {0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Trait for chat-completion clients.
///
/// Implementations should be stateless and thread-safe. A single round trip:
/// send the assembled message sequence, get back the raw text of the top
/// choice. No retry policy lives at this layer.
#[async_trait]
pub trait AiClient: Send + Sync {
    /// Complete a chat request and return the raw response text.
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, AiError>;

    /// The model this client dispatches to.
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T> AiClient for std::sync::Arc<T>
where
    T: AiClient + ?Sized,
{
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, AiError> {
        (**self).complete(request).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
