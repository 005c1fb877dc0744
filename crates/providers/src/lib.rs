//! Provider implementations for the Echo interviewer proxy.
//!
//! The completion client implements `echo_core::CompletionProvider`; the
//! speech client implements `echo_core::SpeechProvider`.
//! [`build_from_config`] constructs both once at process start.

mod http;
pub mod openai_compat;
pub mod openai_speech;
pub mod router;
#[cfg(test)]
mod test_support;

pub use openai_compat::OpenAiCompatProvider;
pub use openai_speech::OpenAiSpeechProvider;
pub use router::{Providers, build_from_config};
