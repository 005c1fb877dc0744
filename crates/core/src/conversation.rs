//! Conversation assembly.
//!
//! Builds the message sequence for one completion call:
//!
//! ```text
//! [system: persona prompt]
//! [history[0] .. history[n-1]]  (roles remapped, order kept)
//! [user: request.message]
//! ```

use crate::message::{ChatRequest, ProviderMessage};

/// Prepends a fixed persona prompt to caller-supplied history.
///
/// Holds no per-request state; `assemble` is a pure function of its input.
#[derive(Debug, Clone)]
pub struct ConversationAssembler {
    system_prompt: String,
}

impl ConversationAssembler {
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
        }
    }

    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Produce `1 + history.len() + 1` provider messages.
    pub fn assemble(&self, request: &ChatRequest) -> Vec<ProviderMessage> {
        let mut messages = Vec::with_capacity(request.history.len() + 2);
        messages.push(ProviderMessage::system(&self.system_prompt));
        messages.extend(request.history.iter().map(|turn| ProviderMessage {
            role: turn.provider_role(),
            content: turn.text.clone(),
        }));
        messages.push(ProviderMessage::user(&request.message));
        messages
    }
}
