//! OpenAI-compatible completion provider.
//!
//! Works with: Groq, OpenAI, OpenRouter, Together AI, Fireworks AI, vLLM,
//! Ollama, and any endpoint exposing `/chat/completions`.
//!
//! Supports:
//! - Non-streaming chat completions
//! - Model listing

use std::time::Duration;

use async_trait::async_trait;
use echo_core::{CompletionOptions, CompletionProvider, ProviderError, ProviderMessage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http::{build_client, ensure_success, send_error};

/// An OpenAI-compatible chat-completion provider.
pub struct OpenAiCompatProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiCompatProvider {
    /// Create a new OpenAI-compatible provider.
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: build_client(timeout)?,
        })
    }

    /// Convert our message types to OpenAI API format.
    fn to_api_messages(messages: &[ProviderMessage]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: m.role.as_str().into(),
                content: Some(m.content.clone()),
            })
            .collect()
    }

    fn require_key(&self) -> Result<(), ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(format!(
                "no API key set for provider '{}'",
                self.name
            )));
        }
        Ok(())
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompatProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn complete(
        &self,
        messages: &[ProviderMessage],
        options: &CompletionOptions,
    ) -> Result<String, ProviderError> {
        self.require_key()?;
        let url = format!("{}/chat/completions", self.base_url);

        let mut body = serde_json::json!({
            "model": options.model,
            "messages": Self::to_api_messages(messages),
            "temperature": options.temperature,
            "stream": false,
        });

        if let Some(max_tokens) = options.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        debug!(
            provider = %self.name,
            model = %options.model,
            messages = messages.len(),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(send_error)?;

        let response = ensure_success(&self.name, response).await?;

        let api_response: ApiResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {e}")))?;

        let choice = api_response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("No choices in response".into()))?;

        choice
            .message
            .content
            .ok_or_else(|| ProviderError::InvalidResponse("First choice has no content".into()))
    }

    async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        self.require_key()?;
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(send_error)?;

        let response = ensure_success(&self.name, response).await?;

        let body: ModelList = response
            .json()
            .await
            .map_err(|e| ProviderError::InvalidResponse(e.to_string()))?;

        Ok(body.data.into_iter().map(|m| m.id).collect())
    }
}

// --- OpenAI API types (internal) ---

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Debug, Deserialize)]
struct ApiChoice {
    message: ApiMessage,
}

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
struct ModelEntry {
    id: String,
}
