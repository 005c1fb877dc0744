//! `echo-interviewer doctor` — Diagnose configuration health.

use std::path::Path;

use echo_config::{AppConfig, COMPLETION_KEY_ENV, SPEECH_KEY_ENV};

use super::config_file;

pub async fn run(config_path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    println!("Echo interviewer doctor");
    println!("=======================\n");

    let mut issues = 0;
    let path = config_file(config_path);

    if path.exists() {
        println!("  [ok]   Config file found: {}", path.display());
    } else {
        println!("  [warn] No config file, using defaults (run `echo-interviewer init`)");
    }

    match AppConfig::load_path(&path) {
        Ok(config) => {
            println!("  [ok]   Configuration valid");

            if config.completion.api_key.is_some() {
                println!("  [ok]   Completion API key configured");
            } else {
                println!("  [fail] No completion API key: set {COMPLETION_KEY_ENV}");
                issues += 1;
            }

            if config.speech.api_key.is_some() {
                println!("  [ok]   Speech API key configured");
            } else {
                println!("  [fail] No speech API key: set {SPEECH_KEY_ENV}");
                issues += 1;
            }
        }
        Err(e) => {
            println!("  [fail] Configuration invalid: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  All checks passed!");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
