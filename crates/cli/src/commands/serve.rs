//! `echo-interviewer serve` — Start the HTTP proxy.

use std::path::Path;

use super::load_config;

pub async fn run(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(config_path)?;

    if let Some(host) = host {
        config.gateway.host = host;
    }
    if let Some(port) = port {
        config.gateway.port = port;
    }

    println!("Echo interviewer proxy");
    println!("   Listening:  {}:{}", config.gateway.host, config.gateway.port);
    println!("   Completion: {} ({})", config.completion.provider, config.completion.model);
    println!("   Speech:     {} / {}", config.speech.model, config.speech.voice);

    echo_gateway::start(config).await?;

    Ok(())
}
