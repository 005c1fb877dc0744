//! Wire and provider message types.
//!
//! Callers send a [`ChatRequest`] made of loosely-typed [`ChatTurn`]s; the
//! assembler turns those into strictly-typed [`ProviderMessage`]s for the
//! completion backend.

use serde::{Deserialize, Serialize};

/// Role tag the frontend uses for assistant turns.
pub const AI_ROLE: &str = "ai";

/// The role of a message sent to the completion provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Persona / instructions
    System,
    /// The candidate
    User,
    /// The interviewer
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One historical turn as supplied by the caller.
///
/// `role` is kept as a raw string: anything other than `"ai"` is a user turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user".into(),
            text: text.into(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            role: AI_ROLE.into(),
            text: text.into(),
        }
    }

    /// Map the caller's role onto the provider's role vocabulary.
    pub fn provider_role(&self) -> Role {
        if self.role == AI_ROLE {
            Role::Assistant
        } else {
            Role::User
        }
    }
}

/// Body of `POST /chat`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub history: Vec<ChatTurn>,
}

/// A message in the form the completion provider expects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderMessage {
    pub role: Role,
    pub content: String,
}

impl ProviderMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Body returned by `POST /chat`, on success and on failure alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
}

/// Body of `POST /speech`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeechRequest {
    pub text: String,
}

/// Body returned by `POST /speech`: exactly one of `audio` or `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeechReply {
    /// Base64-encoded audio bytes
    Audio { audio: String },
    /// Stringified upstream failure
    Error { error: String },
}
