//! `echo-interviewer models` — List models offered by the completion provider.

use std::path::Path;

use super::load_config;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let providers = echo_providers::build_from_config(&config)?;

    let models = providers.completion.list_models().await?;

    println!("Models available from {}:", providers.completion.name());
    if models.is_empty() {
        println!("  (none reported)");
    }
    for model in &models {
        let marker = if *model == config.completion.model { " (configured)" } else { "" };
        println!("  {model}{marker}");
    }

    Ok(())
}
