//! `echo-interviewer status` — Show the resolved configuration.

use std::path::Path;

use super::{config_file, load_config};

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let path = config_file(config_path);

    let key_state = |k: &Option<String>| if k.is_some() { "set" } else { "missing" };
    let prompt_preview: String = config.persona.system_prompt.chars().take(60).collect();

    println!("Echo interviewer status");
    println!("=======================");
    println!("  Config file:   {}", path.display());
    println!("  Bind:          {}:{}", config.gateway.host, config.gateway.port);
    println!("  CORS:          {}", if config.gateway.cors_permissive { "open" } else { "closed" });
    println!("  Completion:    {} @ {}", config.completion.provider, config.completion.api_url);
    println!("  Model:         {}", config.completion.model);
    println!("  Temperature:   {}", config.completion.temperature);
    match config.completion_options().max_tokens {
        Some(n) => println!("  Max tokens:    {n}"),
        None => println!("  Max tokens:    provider default"),
    }
    println!("  Completion key: {}", key_state(&config.completion.api_key));
    println!("  Speech:        {} @ {}", config.speech.model, config.speech.api_url);
    println!("  Voice:         {} (x{})", config.speech.voice, config.speech.speed);
    println!("  Speech key:    {}", key_state(&config.speech.api_key));
    println!("  Persona:       {prompt_preview}...");

    Ok(())
}
