//! Subcommand implementations.

pub mod ask;
pub mod doctor;
pub mod init;
pub mod models;
pub mod say;
pub mod serve;
pub mod status;

use std::path::{Path, PathBuf};

use echo_config::AppConfig;

/// Resolve the config file: explicit `--config` or the default location.
pub fn config_file(path: Option<&Path>) -> PathBuf {
    path.map(Path::to_path_buf).unwrap_or_else(AppConfig::config_path)
}

/// Load configuration with environment overrides applied.
pub fn load_config(path: Option<&Path>) -> echo_core::Result<AppConfig> {
    Ok(AppConfig::load_path(&config_file(path))?)
}
