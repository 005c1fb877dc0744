//! HTTP plumbing shared by the provider clients.

use std::time::Duration;

use echo_core::ProviderError;
use tracing::warn;

/// Build a `reqwest` client with a whole-request timeout.
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProviderError::NotConfigured(format!("Failed to create HTTP client: {e}")))
}

/// Map a transport failure onto the provider error taxonomy.
pub(crate) fn send_error(e: reqwest::Error) -> ProviderError {
    ProviderError::transport(e.to_string(), e.is_timeout())
}

/// Turn non-2xx responses into typed errors; pass successes through.
pub(crate) async fn ensure_success(
    provider: &str,
    response: reqwest::Response,
) -> Result<reqwest::Response, ProviderError> {
    let status = response.status().as_u16();

    if response.status().is_success() {
        return Ok(response);
    }

    if status == 429 {
        let retry_after_secs = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(5);
        return Err(ProviderError::RateLimited { retry_after_secs });
    }

    if status == 401 || status == 403 {
        return Err(ProviderError::AuthenticationFailed(
            "Invalid API key or insufficient permissions".into(),
        ));
    }

    let error_body = response.text().await.unwrap_or_default();
    warn!(provider, status, body = %error_body, "Provider returned error");
    Err(ProviderError::ApiError {
        status_code: status,
        message: error_body,
    })
}
