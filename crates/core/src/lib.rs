//! # Echo Core
//!
//! Domain types, traits, and error definitions for the Echo interviewer proxy.
//! This crate has **zero framework dependencies**: it defines the wire types
//! the gateway speaks and the two capability traits the providers implement.
//!
//! ## Design Philosophy
//!
//! Each upstream capability is a trait here, with implementations living in
//! `echo-providers`. This enables:
//! - Swapping the completion or speech backend via configuration
//! - Testing the gateway with mock providers
//! - Clean dependency graph (all crates depend inward on core)

pub mod conversation;
pub mod error;
pub mod message;
pub mod provider;
pub mod speech;

// Re-export key types at crate root for ergonomics
pub use conversation::ConversationAssembler;
pub use error::{Error, ProviderError, Result};
pub use message::{
    ChatReply, ChatRequest, ChatTurn, ProviderMessage, Role, SpeechReply, SpeechRequest,
};
pub use provider::{CompletionOptions, CompletionProvider};
pub use speech::{SpeechOptions, SpeechProvider};
