//! Completion provider trait — the abstraction over chat-completion backends.
//!
//! A completion provider takes an assembled message sequence and returns the
//! text of the next assistant turn.
//!
//! Implementations: OpenAI-compatible endpoints (Groq, OpenAI, OpenRouter, ...).

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;
use crate::message::ProviderMessage;

/// Deployment-time sampling settings. Never caller controlled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionOptions {
    /// The model to use (e.g., "llama-3.3-70b-versatile")
    pub model: String,

    /// Temperature (0.0 = deterministic, 2.0 = very creative)
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens to generate
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

fn default_temperature() -> f32 {
    0.7
}

/// The completion capability.
///
/// The gateway calls `complete()` without knowing which backend answers.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// A human-readable name for this provider (e.g., "groq").
    fn name(&self) -> &str;

    /// Send the conversation and return the first choice's text.
    async fn complete(
        &self,
        messages: &[ProviderMessage],
        options: &CompletionOptions,
    ) -> std::result::Result<String, ProviderError>;

    /// List available models for this provider.
    async fn list_models(&self) -> std::result::Result<Vec<String>, ProviderError> {
        Ok(Vec::new())
    }
}
