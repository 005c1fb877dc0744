//! Proxy handlers for `/chat` and `/speech`.
//!
//! Each handler makes exactly one upstream call and always answers 200.
//! Failures are logged here and folded into the response body.

use axum::extract::State;
use axum::response::Json;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::{error, info};

use echo_core::{ChatReply, ChatRequest, SpeechReply, SpeechRequest};

use crate::SharedState;

/// `POST /chat` — assemble the conversation and ask the completion provider.
pub async fn chat_handler(
    State(state): State<SharedState>,
    Json(request): Json<ChatRequest>,
) -> Json<ChatReply> {
    let messages = state.assembler.assemble(&request);

    info!(
        history = request.history.len(),
        message_len = request.message.len(),
        "Chat request received"
    );

    match state
        .completion
        .complete(&messages, &state.completion_options)
        .await
    {
        Ok(reply) => Json(ChatReply { reply }),
        Err(e) => {
            error!(
                provider = %state.completion.name(),
                error = %e,
                "Chat completion failed"
            );
            Json(ChatReply {
                reply: state.fallback_reply.clone(),
            })
        }
    }
}

/// `POST /speech` — synthesize the text and return it base64-encoded.
pub async fn speech_handler(
    State(state): State<SharedState>,
    Json(request): Json<SpeechRequest>,
) -> Json<SpeechReply> {
    info!(text_len = request.text.len(), "Speech request received");

    match state
        .speech
        .synthesize(&request.text, &state.speech_options)
        .await
    {
        Ok(audio) => Json(SpeechReply::Audio {
            audio: STANDARD.encode(&audio),
        }),
        Err(e) => {
            error!(
                provider = %state.speech.name(),
                error = %e,
                "Speech synthesis failed"
            );
            Json(SpeechReply::Error {
                error: e.to_string(),
            })
        }
    }
}
