//! Provider wiring — builds the completion and speech clients from config.
//!
//! Both clients are created once at startup and shared via `Arc`.

use std::sync::Arc;
use std::time::Duration;

use echo_config::AppConfig;
use echo_core::{CompletionProvider, ProviderError, SpeechProvider};
use tracing::{info, warn};

use crate::openai_compat::OpenAiCompatProvider;
use crate::openai_speech::OpenAiSpeechProvider;

/// The two upstream capabilities the gateway depends on.
#[derive(Clone)]
pub struct Providers {
    pub completion: Arc<dyn CompletionProvider>,
    pub speech: Arc<dyn SpeechProvider>,
}

/// Build providers from configuration.
///
/// Missing API keys are not fatal: the affected path answers with its
/// failure shape until a key is configured.
pub fn build_from_config(config: &AppConfig) -> Result<Providers, ProviderError> {
    let completion_key = config.completion.api_key.clone().unwrap_or_default();
    if completion_key.is_empty() {
        warn!(provider = %config.completion.provider, "No completion API key configured");
    }

    let speech_key = config.speech.api_key.clone().unwrap_or_default();
    if speech_key.is_empty() {
        warn!("No speech API key configured");
    }

    let completion = OpenAiCompatProvider::new(
        &config.completion.provider,
        &config.completion.api_url,
        completion_key,
        Duration::from_secs(config.completion.timeout_secs),
    )?;

    let speech = OpenAiSpeechProvider::new(
        &config.speech.api_url,
        speech_key,
        Duration::from_secs(config.speech.timeout_secs),
    )?;

    info!(
        completion = %completion.name(),
        completion_url = %config.completion.api_url,
        speech_url = %config.speech.api_url,
        "Providers initialised"
    );

    Ok(Providers {
        completion: Arc::new(completion),
        speech: Arc::new(speech),
    })
}
