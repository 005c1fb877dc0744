//! HTTP gateway for the Echo interviewer proxy.
//!
//! Endpoints:
//!
//! - `POST /chat`   — persona + history + message → `{ reply }`
//! - `POST /speech` — text → `{ audio }` (base64) or `{ error }`
//! - `GET  /health` — liveness probe
//!
//! Upstream failures never change the status code: both proxy endpoints
//! always answer 200 with a well-formed body.
//!
//! Built on Axum.

pub mod handlers;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::{
    Router,
    response::Json,
    routing::{get, post},
};
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use echo_config::AppConfig;
use echo_core::{
    CompletionOptions, CompletionProvider, ConversationAssembler, SpeechOptions, SpeechProvider,
};
use echo_providers::Providers;

/// Shared, read-only application state for the gateway.
pub struct GatewayState {
    pub completion: Arc<dyn CompletionProvider>,
    pub speech: Arc<dyn SpeechProvider>,
    pub assembler: ConversationAssembler,
    pub completion_options: CompletionOptions,
    pub speech_options: SpeechOptions,
    /// Reply used when the completion provider fails
    pub fallback_reply: String,
}

impl GatewayState {
    /// Bind the configured persona and tuning to a pair of providers.
    pub fn new(config: &AppConfig, providers: Providers) -> Self {
        Self {
            completion: providers.completion,
            speech: providers.speech,
            assembler: ConversationAssembler::new(&config.persona.system_prompt),
            completion_options: config.completion_options(),
            speech_options: config.speech_options(),
            fallback_reply: config.persona.fallback_reply.clone(),
        }
    }
}

pub type SharedState = Arc<GatewayState>;

/// Build the Axum router with all gateway routes.
///
/// Layers applied:
/// - CORS open to any origin, method and header (when `cors_permissive`)
/// - Request body size limit (1 MB)
/// - HTTP trace logging
pub fn build_router(state: SharedState, cors_permissive: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler))
        .route("/chat", post(handlers::chat_handler))
        .route("/speech", post(handlers::speech_handler))
        .with_state(state)
        .layer(DefaultBodyLimit::max(1024 * 1024));

    let router = if cors_permissive {
        router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        router
    };

    router.layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Start the gateway HTTP server.
///
/// Providers are built once here and shared by every request.
pub async fn start(config: AppConfig) -> echo_core::Result<()> {
    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);

    let providers = echo_providers::build_from_config(&config)?;
    let state = Arc::new(GatewayState::new(&config, providers));
    let app = build_router(state, config.gateway.cors_permissive);

    info!(
        addr = %addr,
        model = %config.completion.model,
        voice = %config.speech.voice,
        "Gateway starting"
    );
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
