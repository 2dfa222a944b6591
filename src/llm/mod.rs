//! LLM provider implementations

use crate::config::Config;

mod error;
mod groq;
mod types;

pub use error::LlmError;
pub use groq::GroqProvider;
pub use types::*;

use anyhow::Result;
use async_trait::async_trait;

/// Trait for LLM providers
///
/// Each question produces exactly one completion; there is no streaming and
/// no conversation history.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name
    fn name(&self) -> &str;

    /// Send a chat completion request
    async fn chat(&self, messages: &[Message]) -> Result<LlmResponse>;
}

/// Create the configured LLM provider
///
/// The API key comes from the environment, never the config file.
pub fn create_provider(config: &Config, api_key: &str) -> Result<Box<dyn LlmProvider>> {
    if api_key.trim().is_empty() {
        anyhow::bail!("GROQ_API_KEY is not set; export it or add it to a .env file");
    }

    let groq = &config.llm.groq;
    Ok(Box::new(
        GroqProvider::new(api_key)
            .with_model(&groq.model)
            .with_max_tokens(groq.max_tokens)
            .with_temperature(groq.temperature),
    ))
}
