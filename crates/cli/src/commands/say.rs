//! `echo-interviewer say` — Synthesize one utterance to a file.

use std::path::{Path, PathBuf};

use tracing::info;

use super::load_config;

pub async fn run(
    config_path: Option<&Path>,
    text: String,
    out: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(config_path)?;
    let providers = echo_providers::build_from_config(&config)?;

    let audio = providers
        .speech
        .synthesize(&text, &config.speech_options())
        .await?;

    tokio::fs::write(&out, &audio).await?;
    info!(bytes = audio.len(), path = %out.display(), "Audio written");
    println!("Wrote {} bytes to {}", audio.len(), out.display());

    Ok(())
}
