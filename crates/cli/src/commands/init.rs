//! `echo-interviewer init` — Write a default configuration file.

use std::path::Path;

use echo_config::AppConfig;

use super::config_file;

pub async fn run(
    config_path: Option<&Path>,
    force: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let path = config_file(config_path);

    if path.exists() && !force {
        println!("Config already exists at: {}", path.display());
        println!("   Edit it manually or re-run with --force.");
        return Ok(());
    }

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    std::fs::write(&path, AppConfig::default_toml())?;

    println!("Created config at: {}", path.display());
    println!();
    println!("Next steps:");
    println!("   1. export GROQ_API_KEY=...   (completion)");
    println!("   2. export OPENAI_API_KEY=... (speech)");
    println!("   3. Edit [persona] in {} to change the interviewer", path.display());
    println!("   4. Run: echo-interviewer serve");

    Ok(())
}
