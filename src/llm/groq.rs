//! Groq LLM provider
//!
//! Groq exposes the OpenAI chat-completions wire format, so this client
//! speaks that format directly. Credentials are only sent to the configured
//! endpoint.

use super::{LlmError, LlmProvider, LlmResponse, Message, Role, TokenUsage};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const GROQ_CHAT_COMPLETIONS_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Chat-completions client for the Groq API
pub struct GroqProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
    max_tokens: usize,
    temperature: f32,
}

impl GroqProvider {
    /// Create a new provider with default model settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: GROQ_CHAT_COMPLETIONS_URL.to_string(),
            model: "llama-3.1-70b-versatile".to_string(),
            max_tokens: 4096,
            temperature: 0.0,
        }
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set max output tokens
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the chat-completions endpoint (tests point this at a mock server)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Get the current model
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Convert internal messages to the wire format
    fn convert_messages(&self, messages: &[Message]) -> Vec<ChatMessage> {
        messages
            .iter()
            .map(|msg| ChatMessage {
                role: match msg.role {
                    Role::System => "system",
                    Role::User => "user",
                    Role::Assistant => "assistant",
                }
                .to_string(),
                content: msg.content.clone(),
            })
            .collect()
    }

    fn build_request(&self, messages: &[Message]) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: self.convert_messages(messages),
            max_tokens: Some(self.max_tokens),
            temperature: self.temperature,
        }
    }

    fn parse_response(&self, response: ChatResponse) -> LlmResponse {
        let usage = response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        LlmResponse { text, usage }
    }

    async fn chat_impl(&self, messages: &[Message]) -> Result<LlmResponse> {
        tracing::debug!(
            target: "llm",
            model = %self.model,
            messages = messages.len(),
            "Sending chat request"
        );

        let request = self.build_request(messages);

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(LlmError::from_network_error)?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(LlmError::from_http_status(status, error_text).into());
        }

        let api_response: ChatResponse = response
            .json()
            .await
            .context("Failed to parse Groq API response")?;

        Ok(self.parse_response(api_response))
    }
}

#[async_trait]
impl LlmProvider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn chat(&self, messages: &[Message]) -> Result<LlmResponse> {
        self.chat_impl(messages).await
    }
}

// ============================================================================
// API Types (OpenAI chat-completions format)
// ============================================================================

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let provider = GroqProvider::new("gsk_test")
            .with_model("llama-3.3-70b-versatile")
            .with_max_tokens(2048)
            .with_temperature(0.5);

        assert_eq!(provider.model(), "llama-3.3-70b-versatile");
        assert_eq!(provider.max_tokens, 2048);
        assert_eq!(provider.temperature, 0.5);
        assert_eq!(provider.base_url, GROQ_CHAT_COMPLETIONS_URL);
    }

    #[test]
    fn test_message_conversion() {
        let provider = GroqProvider::new("gsk_test");
        let messages = vec![
            Message::system("You are a data assistant"),
            Message::user("How many rows?"),
        ];

        let converted = provider.convert_messages(&messages);
        assert_eq!(converted.len(), 2);
        assert_eq!(converted[0].role, "system");
        assert_eq!(converted[1].role, "user");
        assert_eq!(converted[1].content, "How many rows?");
    }

    #[test]
    fn test_request_serialization() {
        let provider = GroqProvider::new("gsk_test").with_model("llama-3.1-70b-versatile");
        let request = provider.build_request(&[Message::user("hello")]);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "llama-3.1-70b-versatile");
        assert_eq!(value["temperature"], 0.0);
        assert_eq!(value["max_tokens"], 4096);
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
    }

    #[test]
    fn test_parse_response_empty_choices() {
        let provider = GroqProvider::new("gsk_test");
        let response = provider.parse_response(ChatResponse {
            choices: vec![],
            usage: None,
        });
        assert_eq!(response.text, "");
        assert!(response.usage.is_none());
    }

    #[tokio::test]
    async fn test_chat_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .match_header("authorization", "Bearer gsk_test")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"{
                    "choices": [{"message": {"role": "assistant", "content": "Ali attended 3 times."}}],
                    "usage": {"prompt_tokens": 120, "completion_tokens": 9, "total_tokens": 129}
                }"#,
            )
            .create_async()
            .await;

        let provider = GroqProvider::new("gsk_test")
            .with_base_url(format!("{}/openai/v1/chat/completions", server.url()));

        let response = provider
            .chat(&[Message::user("How many times did Ali attend?")])
            .await
            .unwrap();

        assert_eq!(response.text, "Ali attended 3 times.");
        assert_eq!(response.usage.unwrap().total_tokens, 129);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_chat_unauthorized() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .with_status(401)
            .with_body(r#"{"error": {"message": "Invalid API Key"}}"#)
            .create_async()
            .await;

        let provider = GroqProvider::new("gsk_bad")
            .with_base_url(format!("{}/openai/v1/chat/completions", server.url()));

        let err = provider.chat(&[Message::user("hi")]).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LlmError>(),
            Some(LlmError::Unauthorized(_))
        ));
    }

    #[tokio::test]
    async fn test_chat_server_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .with_status(503)
            .with_body("over capacity")
            .create_async()
            .await;

        let provider = GroqProvider::new("gsk_test")
            .with_base_url(format!("{}/openai/v1/chat/completions", server.url()));

        let err = provider.chat(&[Message::user("hi")]).await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<LlmError>(),
            Some(LlmError::ServiceError(_))
        ));
    }

    #[tokio::test]
    async fn test_chat_malformed_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/openai/v1/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let provider = GroqProvider::new("gsk_test")
            .with_base_url(format!("{}/openai/v1/chat/completions", server.url()));

        let err = provider.chat(&[Message::user("hi")]).await.unwrap_err();
        assert!(err.to_string().contains("parse"));
    }
}
