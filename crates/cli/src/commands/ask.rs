//! `echo-interviewer ask` — One-shot completion without the HTTP layer.

use std::path::Path;

use echo_core::{ChatRequest, ConversationAssembler};

use super::load_config;

pub async fn run(
    config_path: Option<&Path>,
    message: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let providers = echo_providers::build_from_config(&config)?;

    let assembler = ConversationAssembler::new(&config.persona.system_prompt);
    let messages = assembler.assemble(&ChatRequest {
        message,
        history: Vec::new(),
    });

    let reply = providers
        .completion
        .complete(&messages, &config.completion_options())
        .await?;

    println!("{reply}");
    Ok(())
}
