//! Error types for the Echo domain.
//!
//! Uses `thiserror` for ergonomic error definitions.

use thiserror::Error;

/// The top-level error type for process-level operations (startup, CLI).
#[derive(Debug, Error)]
pub enum Error {
    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- I/O (socket bind, audio output) ---
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of an upstream completion or speech call.
///
/// The gateway never forwards these as HTTP errors; they are logged and
/// folded into the reply body.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("API request failed: {message} (status: {status_code})")]
    ApiError { status_code: u16, message: String },

    #[error("Rate limited by provider, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Invalid provider response: {0}")]
    InvalidResponse(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Request timed out: {0}")]
    Timeout(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Free-form failure; displays the message verbatim.
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Classify a transport-level `reqwest`-style failure message.
    pub fn transport(message: impl Into<String>, timed_out: bool) -> Self {
        if timed_out {
            Self::Timeout(message.into())
        } else {
            Self::Network(message.into())
        }
    }
}
