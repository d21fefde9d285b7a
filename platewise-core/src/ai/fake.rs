//! Fake completion client for testing.
//!
//! Returns deterministic responses based on prompt matching, allowing tests to
//! run without network access or API costs. Tracks how many completions were
//! dispatched so tests can assert that failed auth never reaches the provider.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use super::{AiClient, AiError, ChatRequest, ChatResponse, Usage};

/// A fake completion client for testing.
///
/// Responses are matched by checking whether any message in the request
/// contains a registered substring. If no match is found, the default response
/// is returned, or an error if none is configured.
#[derive(Debug)]
pub struct FakeAiClient {
    /// Map of prompt substring -> response
    responses: RwLock<HashMap<String, String>>,
    /// Default response if no match found
    default_response: Option<String>,
    /// Number of complete() calls dispatched.
    calls: AtomicUsize,
}

impl Default for FakeAiClient {
    fn default() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: Some("{}".to_string()),
            calls: AtomicUsize::new(0),
        }
    }
}

impl FakeAiClient {
    /// Create a new FakeAiClient with no registered responses.
    pub fn new() -> Self {
        Self {
            responses: RwLock::new(HashMap::new()),
            default_response: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Create a FakeAiClient that returns a response for prompts containing a substring.
    pub fn with_response(prompt_contains: &str, response: &str) -> Self {
        let mut client = Self::new();
        client.add_response(prompt_contains, response);
        client
    }

    /// Add a response for prompts containing a specific substring.
    pub fn add_response(&mut self, prompt_contains: &str, response: &str) {
        self.responses
            .write()
            .unwrap()
            .insert(prompt_contains.to_string(), response.to_string());
    }

    /// Set the default response when no pattern matches.
    pub fn with_default_response(mut self, response: &str) -> Self {
        self.default_response = Some(response.to_string());
        self
    }

    /// Number of completions dispatched so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AiClient for FakeAiClient {
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse, AiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let prompt_lower = request
            .messages
            .iter()
            .map(|m| m.content.to_lowercase())
            .collect::<Vec<_>>()
            .join("\n");

        let responses = self.responses.read().unwrap();
        for (pattern, response) in responses.iter() {
            if prompt_lower.contains(&pattern.to_lowercase()) {
                return Ok(ChatResponse {
                    content: response.clone(),
                    usage: Usage::default(),
                });
            }
        }

        match &self.default_response {
            Some(response) => Ok(ChatResponse {
                content: response.clone(),
                usage: Usage::default(),
            }),
            None => {
                let preview: String = prompt_lower.chars().take(100).collect();
                Err(AiError::Upstream(format!(
                    "FakeAiClient: no response configured for prompt (first 100 chars): {}",
                    preview
                )))
            }
        }
    }

    fn model_name(&self) -> &str {
        "fake-model"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::ChatMessage;

    fn request(content: &str) -> ChatRequest {
        ChatRequest {
            messages: vec![ChatMessage::user(content)],
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_fake_client_matching() {
        let client = FakeAiClient::with_response("pasta", "carbonara");
        let result = client.complete(request("Suggest a pasta dish")).await.unwrap();
        assert_eq!(result.content, "carbonara");
    }

    #[tokio::test]
    async fn test_fake_client_case_insensitive() {
        let client = FakeAiClient::with_response("PASTA", "carbonara");
        let result = client.complete(request("pasta please")).await.unwrap();
        assert_eq!(result.content, "carbonara");
    }

    #[tokio::test]
    async fn test_fake_client_no_match() {
        let client = FakeAiClient::new();
        let result = client.complete(request("random prompt")).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_client_no_match_multibyte_prompt() {
        let client = FakeAiClient::new();
        let result = client.complete(request(&"é".repeat(150))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_fake_client_counts_calls() {
        let client = FakeAiClient::default();
        assert_eq!(client.call_count(), 0);
        client.complete(request("one")).await.unwrap();
        client.complete(request("two")).await.unwrap();
        assert_eq!(client.call_count(), 2);
    }
}
