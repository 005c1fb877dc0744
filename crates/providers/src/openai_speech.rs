//! OpenAI text-to-speech provider.
//!
//! Calls `POST {base}/audio/speech` and buffers the whole audio payload.
//! Voices include alloy, echo, fable, onyx, nova and shimmer.

use std::time::Duration;

use async_trait::async_trait;
use echo_core::{ProviderError, SpeechOptions, SpeechProvider};
use serde::Serialize;
use tracing::debug;

use crate::http::{build_client, ensure_success, send_error};

pub struct OpenAiSpeechProvider {
    name: String,
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl OpenAiSpeechProvider {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            name: "openai-tts".into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            client: build_client(timeout)?,
        })
    }
}

#[derive(Debug, Serialize)]
struct SpeechBody<'a> {
    model: &'a str,
    input: &'a str,
    voice: &'a str,
    speed: f32,
    response_format: &'a str,
}

#[async_trait]
impl SpeechProvider for OpenAiSpeechProvider {
    fn name(&self) -> &str {
        &self.name
    }

    async fn synthesize(
        &self,
        text: &str,
        options: &SpeechOptions,
    ) -> Result<Vec<u8>, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::NotConfigured(format!(
                "no API key set for provider '{}'",
                self.name
            )));
        }

        let url = format!("{}/audio/speech", self.base_url);
        let body = SpeechBody {
            model: &options.model,
            input: text,
            voice: &options.voice,
            speed: options.speed,
            response_format: &options.response_format,
        };

        debug!(
            provider = %self.name,
            model = %options.model,
            voice = %options.voice,
            chars = text.len(),
            "Sending speech request"
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

        let audio = response.bytes().await.map_err(send_error)?;
        Ok(audio.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};

    fn options() -> SpeechOptions {
        SpeechOptions {
            model: "tts-1".into(),
            voice: "shimmer".into(),
            speed: 1.05,
            response_format: "mp3".into(),
        }
    }

    #[test]
    fn trailing_slash_trimmed() {
        let provider =
            OpenAiSpeechProvider::new("https://api.openai.com/v1/", "sk", Duration::from_secs(5))
                .unwrap();
        assert_eq!(provider.name(), "openai-tts");
        assert_eq!(provider.base_url, "https://api.openai.com/v1");
    }

    #[test]
    fn body_serialization() {
        let opts = options();
        let body = SpeechBody {
            model: &opts.model,
            input: "hi",
            voice: &opts.voice,
            speed: opts.speed,
            response_format: &opts.response_format,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "tts-1");
        assert_eq!(json["input"], "hi");
        assert_eq!(json["voice"], "shimmer");
        assert_eq!(json["response_format"], "mp3");
    }

    #[tokio::test]
    async fn synthesize_returns_raw_bytes() {
        let app = Router::new().route(
            "/audio/speech",
            post(|Json(body): Json<serde_json::Value>| async move {
                assert_eq!(body["voice"], "shimmer");
                // Echo the input back as the "audio" payload.
                body["input"].as_str().unwrap_or_default().as_bytes().to_vec()
            }),
        );
        let base = serve(app).await;

        let provider = OpenAiSpeechProvider::new(&base, "sk", Duration::from_secs(5)).unwrap();
        let audio = provider.synthesize("abc", &options()).await.unwrap();
        assert_eq!(audio, b"abc");
    }

    #[tokio::test]
    async fn empty_text_is_passed_through() {
        let app = Router::new().route(
            "/audio/speech",
            post(|Json(body): Json<serde_json::Value>| async move {
                if body["input"] == "" { vec![0u8] } else { vec![1u8] }
            }),
        );
        let base = serve(app).await;

        let provider = OpenAiSpeechProvider::new(&base, "sk", Duration::from_secs(5)).unwrap();
        assert_eq!(provider.synthesize("", &options()).await.unwrap(), vec![0u8]);
    }

    #[tokio::test]
    async fn upstream_error_surfaces_body() {
        let app = Router::new().route(
            "/audio/speech",
            post(|| async { (StatusCode::BAD_REQUEST, "voice not found") }),
        );
        let base = serve(app).await;

        let provider = OpenAiSpeechProvider::new(&base, "sk", Duration::from_secs(5)).unwrap();
        let err = provider.synthesize("hi", &options()).await.unwrap_err();
        assert!(err.to_string().contains("voice not found"));
        assert!(err.to_string().contains("400"));
    }

    #[tokio::test]
    async fn missing_key_is_not_configured() {
        let provider =
            OpenAiSpeechProvider::new("http://127.0.0.1:9", "", Duration::from_secs(5)).unwrap();
        let err = provider.synthesize("hi", &options()).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
