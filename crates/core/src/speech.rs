//! Speech provider trait — text in, encoded audio bytes out.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::ProviderError;

/// Deployment-time voice settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechOptions {
    /// TTS model (e.g., "tts-1")
    pub model: String,

    /// Voice identifier (e.g., "shimmer")
    pub voice: String,

    /// Speaking-rate multiplier (1.0 = normal)
    pub speed: f32,

    /// Container format requested from the provider (e.g., "mp3")
    pub response_format: String,
}

/// The speech-synthesis capability.
#[async_trait]
pub trait SpeechProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Synthesize `text` and return the complete audio payload.
    async fn synthesize(
        &self,
        text: &str,
        options: &SpeechOptions,
    ) -> std::result::Result<Vec<u8>, ProviderError>;
}
