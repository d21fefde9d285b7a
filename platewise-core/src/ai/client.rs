//! Completion client implementation using OpenRouter (OpenAI-compatible API).

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs, ResponseFormat,
    },
    Client,
};
use async_trait::async_trait;

use super::types::{ChatMessage, ChatRequest, ChatResponse, Role, Usage};
use super::{AiClient, AiConfig, AiError};

/// Completion client backed by OpenRouter.
///
/// Constructed once at startup and carried in application state; there is no
/// lazily-initialized global handle.
pub struct OpenRouterClient {
    client: Client<OpenAIConfig>,
    config: AiConfig,
}

impl OpenRouterClient {
    /// Create a new client from environment configuration.
    ///
    /// Fails with `AiError::Unavailable` if `OPENROUTER_API_KEY` is not set, so
    /// startup can decide whether to run without the assistant.
    pub fn from_env() -> Result<Self, AiError> {
        let config = AiConfig::from_env().map_err(|e| AiError::Unavailable(e.to_string()))?;
        Ok(Self::new(config))
    }

    /// Create a new client with the given configuration.
    pub fn new(config: AiConfig) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.base_url);

        let client = Client::with_config(openai_config);

        Self { client, config }
    }

    /// Convert our ChatMessage to async-openai's format.
    fn to_openai_message(msg: &ChatMessage) -> Result<ChatCompletionRequestMessage, AiError> {
        match msg.role {
            Role::System => ChatCompletionRequestSystemMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| AiError::Upstream(format!("Failed to build system message: {}", e))),
            Role::User => ChatCompletionRequestUserMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| AiError::Upstream(format!("Failed to build user message: {}", e))),
            Role::Assistant => ChatCompletionRequestAssistantMessageArgs::default()
                .content(msg.content.clone())
                .build()
                .map(Into::into)
                .map_err(|e| {
                    AiError::Upstream(format!("Failed to build assistant message: {}", e))
                }),
        }
    }

    fn map_error(error: OpenAIError) -> AiError {
        match error {
            // Transport-level failure: the service is unreachable.
            OpenAIError::Reqwest(e) => AiError::Unavailable(e.to_string()),
            other => AiError::Upstream(other.to_string()),
        }
    }
}

#[async_trait]
impl AiClient for OpenRouterClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, AiError> {
        let messages: Vec<ChatCompletionRequestMessage> = request
            .messages
            .iter()
            .map(Self::to_openai_message)
            .collect::<Result<Vec<_>, _>>()?;

        let mut req_builder = CreateChatCompletionRequestArgs::default();
        req_builder.model(&self.config.model).messages(messages);

        let max_tokens = request.max_tokens.unwrap_or(self.config.max_tokens);
        req_builder.max_completion_tokens(max_tokens);

        let temperature = request.temperature.unwrap_or(self.config.temperature);
        req_builder.temperature(temperature);

        if request.json_response {
            req_builder.response_format(ResponseFormat::JsonObject);
        }

        let openai_request = req_builder
            .build()
            .map_err(|e| AiError::Upstream(e.to_string()))?;

        tracing::debug!(model = %self.config.model, "Dispatching chat completion");

        let response = self
            .client
            .chat()
            .create(openai_request)
            .await
            .map_err(Self::map_error)?;

        let content = response
            .choices
            .first()
            .and_then(|c| c.message.content.clone())
            .unwrap_or_default();

        let usage = response
            .usage
            .map(|u| Usage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
                total_tokens: u.total_tokens,
            })
            .unwrap_or_default();

        Ok(ChatResponse { content, usage })
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
