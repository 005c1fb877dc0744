//! Configuration loading, validation, and management for the Echo proxy.
//!
//! Loads configuration from `~/.echo-interviewer/config.toml` with environment
//! variable overrides. Validates all settings at startup.
//!
//! Everything that shapes the interviewer (persona prompt, model, sampling,
//! voice, speaking rate) lives here so a deployment can swap persona without
//! touching code.

use echo_core::{CompletionOptions, SpeechOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The root configuration structure.
///
/// Maps directly to `~/.echo-interviewer/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Interviewer persona and failure wording
    #[serde(default)]
    pub persona: PersonaConfig,

    /// Chat-completion backend
    #[serde(default)]
    pub completion: CompletionConfig,

    /// Text-to-speech backend
    #[serde(default)]
    pub speech: SpeechConfig,

    /// HTTP server settings
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Redact a secret for Debug output.
fn redact(s: &Option<String>) -> &'static str {
    match s {
        Some(_) => "[REDACTED]",
        None => "None",
    }
}

// --- Persona ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonaConfig {
    /// System prompt prepended to every conversation
    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,

    /// Load the system prompt from this file instead (overrides `system_prompt`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_file: Option<PathBuf>,

    /// Reply sent to the caller when the completion provider fails
    #[serde(default = "default_fallback_reply")]
    pub fallback_reply: String,
}

fn default_system_prompt() -> String {
    concat!(
        "You are ECHO AI, an elite Executive Technical Recruiter. ",
        "Your persona: Sophisticated, professional, and rigorous. ",
        "\n\nINTERVIEW RULES:",
        "1. Conduct a structured technical and behavioral interview. ",
        "2. Ask ONE high-impact question at a time. ",
        "3. Do not be overly chatty; stay focused on the candidate's experience. ",
        "\n\nEVALUATION RULES:",
        "1. After 4-5 questions, you must conclude the interview. ",
        "2. You MUST start your final evaluation message with exactly: [FINAL_REPORT] ",
        "3. Evaluate the candidate using the STAR (Situation, Task, Action, Result) ",
        "and PAR (Problem, Action, Result) frameworks. ",
        "4. Include sections for: TECHNICAL DEPTH, COMMUNICATION, and LEADERSHIP POTENTIAL.",
    )
    .into()
}

fn default_fallback_reply() -> String {
    "ECHO AI system error. Connection lost. Please re-transmit.".into()
}

impl Default for PersonaConfig {
    fn default() -> Self {
        Self {
            system_prompt: default_system_prompt(),
            prompt_file: None,
            fallback_reply: default_fallback_reply(),
        }
    }
}

// --- Completion ---

#[derive(Clone, Serialize, Deserialize)]
pub struct CompletionConfig {
    /// Provider label used in logs
    #[serde(default = "default_completion_provider")]
    pub provider: String,

    /// OpenAI-compatible base URL (without `/chat/completions`)
    #[serde(default = "default_completion_url")]
    pub api_url: String,

    /// API key (falls back to `GROQ_API_KEY`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_completion_model")]
    pub model: String,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens per reply; `0` leaves the cap to the provider
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Client-side request timeout
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_completion_provider() -> String {
    "groq".into()
}
fn default_completion_url() -> String {
    "https://api.groq.com/openai/v1".into()
}
fn default_completion_model() -> String {
    "llama-3.3-70b-versatile".into()
}
fn default_temperature() -> f32 {
    0.6
}
fn default_max_tokens() -> u32 {
    1024
}
fn default_timeout_secs() -> u64 {
    120
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            provider: default_completion_provider(),
            api_url: default_completion_url(),
            api_key: None,
            model: default_completion_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for CompletionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompletionConfig")
            .field("provider", &self.provider)
            .field("api_url", &self.api_url)
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// --- Speech ---

#[derive(Clone, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// OpenAI-style base URL (without `/audio/speech`)
    #[serde(default = "default_speech_url")]
    pub api_url: String,

    /// API key (falls back to `OPENAI_API_KEY`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_speech_model")]
    pub model: String,

    #[serde(default = "default_voice")]
    pub voice: String,

    /// Speaking-rate multiplier
    #[serde(default = "default_speed")]
    pub speed: f32,

    #[serde(default = "default_response_format")]
    pub response_format: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_speech_url() -> String {
    "https://api.openai.com/v1".into()
}
fn default_speech_model() -> String {
    "tts-1".into()
}
fn default_voice() -> String {
    "shimmer".into()
}
fn default_speed() -> f32 {
    1.05
}
fn default_response_format() -> String {
    "mp3".into()
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            api_url: default_speech_url(),
            api_key: None,
            model: default_speech_model(),
            voice: default_voice(),
            speed: default_speed(),
            response_format: default_response_format(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl std::fmt::Debug for SpeechConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechConfig")
            .field("api_url", &self.api_url)
            .field("api_key", &redact(&self.api_key))
            .field("model", &self.model)
            .field("voice", &self.voice)
            .field("speed", &self.speed)
            .field("response_format", &self.response_format)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

// --- Gateway ---

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_host")]
    pub host: String,

    /// Allow any origin, method and header
    #[serde(default = "default_true")]
    pub cors_permissive: bool,
}

fn default_port() -> u16 {
    8000
}
fn default_host() -> String {
    "0.0.0.0".into()
}
fn default_true() -> bool {
    true
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            host: default_host(),
            cors_permissive: true,
        }
    }
}

// --- Loading ---

/// Environment variable for the completion API key.
pub const COMPLETION_KEY_ENV: &str = "GROQ_API_KEY";
/// Environment variable for the speech API key.
pub const SPEECH_KEY_ENV: &str = "OPENAI_API_KEY";

impl AppConfig {
    /// Load configuration from the default path (~/.echo-interviewer/config.toml).
    ///
    /// Environment overrides:
    /// - `GROQ_API_KEY` / `OPENAI_API_KEY` when the file sets no key
    /// - `ECHO_COMPLETION_MODEL`, `ECHO_HOST`, `ECHO_PORT`
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_path(&Self::config_path())
    }

    /// Load configuration from `path`, then apply environment overrides.
    pub fn load_path(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load_from(path)?;
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!("No config file found at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config: Self = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        config.drop_blank_keys();
        config.load_prompt_file(path.parent().unwrap_or(Path::new(".")))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides through `lookup` (normally `std::env::var`).
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        self.drop_blank_keys();
        if self.completion.api_key.is_none() {
            self.completion.api_key = lookup(COMPLETION_KEY_ENV).filter(|k| !k.is_empty());
        }
        if self.speech.api_key.is_none() {
            self.speech.api_key = lookup(SPEECH_KEY_ENV).filter(|k| !k.is_empty());
        }
        if let Some(model) = lookup("ECHO_COMPLETION_MODEL") {
            self.completion.model = model;
        }
        if let Some(host) = lookup("ECHO_HOST") {
            self.gateway.host = host;
        }
        if let Some(port) = lookup("ECHO_PORT") {
            self.gateway.port = port.parse().map_err(|_| {
                ConfigError::ValidationError(format!("ECHO_PORT is not a valid port: {port}"))
            })?;
        }
        self.validate()
    }

    /// An empty `api_key = ""` counts as unset so the environment can fill it.
    fn drop_blank_keys(&mut self) {
        for key in [&mut self.completion.api_key, &mut self.speech.api_key] {
            if key.as_deref().is_some_and(|k| k.trim().is_empty()) {
                *key = None;
            }
        }
    }

    /// Replace the inline prompt with the contents of `persona.prompt_file`.
    ///
    /// Relative paths are resolved against `base_dir` (the config file's directory).
    fn load_prompt_file(&mut self, base_dir: &Path) -> Result<(), ConfigError> {
        let Some(path) = self.persona.prompt_file.as_ref().map(|p| base_dir.join(p)) else {
            return Ok(());
        };
        let prompt = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "Loaded persona prompt from file");
        self.persona.system_prompt = prompt.trim_end().to_string();
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir() -> PathBuf {
        dirs_home().join(".echo-interviewer")
    }

    /// Get the default configuration file path.
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.toml")
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=2.0).contains(&self.completion.temperature) {
            return Err(ConfigError::ValidationError(
                "completion.temperature must be between 0.0 and 2.0".into(),
            ));
        }

        if !(0.25..=4.0).contains(&self.speech.speed) {
            return Err(ConfigError::ValidationError(
                "speech.speed must be between 0.25 and 4.0".into(),
            ));
        }

        for (field, value) in [
            ("persona.system_prompt", &self.persona.system_prompt),
            ("persona.fallback_reply", &self.persona.fallback_reply),
            ("completion.model", &self.completion.model),
            ("completion.api_url", &self.completion.api_url),
            ("speech.model", &self.speech.model),
            ("speech.voice", &self.speech.voice),
            ("speech.api_url", &self.speech.api_url),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!("{field} must not be empty")));
            }
        }

        Ok(())
    }

    /// Sampling options passed to the completion provider on every call.
    pub fn completion_options(&self) -> CompletionOptions {
        CompletionOptions {
            model: self.completion.model.clone(),
            temperature: self.completion.temperature,
            max_tokens: (self.completion.max_tokens > 0).then_some(self.completion.max_tokens),
        }
    }

    /// Voice options passed to the speech provider on every call.
    pub fn speech_options(&self) -> SpeechOptions {
        SpeechOptions {
            model: self.speech.model.clone(),
            voice: self.speech.voice.clone(),
            speed: self.speech.speed,
            response_format: self.speech.response_format.clone(),
        }
    }

    /// Generate a default config TOML string (for the `init` command).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_default()
    }
}

/// Get the user's home directory.
fn dirs_home() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("C:\\Users\\Default"))
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("/tmp"))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError { path: PathBuf, reason: String },

    #[error("Failed to parse config file at {path}: {reason}")]
    ParseError { path: PathBuf, reason: String },

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigError> for echo_core::Error {
    fn from(err: ConfigError) -> Self {
        echo_core::Error::Config {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.gateway.port, 8000);
        assert_eq!(config.gateway.host, "0.0.0.0");
        assert_eq!(config.completion.model, "llama-3.3-70b-versatile");
        assert_eq!(config.completion.max_tokens, 1024);
        assert_eq!(config.speech.voice, "shimmer");
        assert!(config.persona.system_prompt.starts_with("You are ECHO AI"));
        assert!(config.persona.system_prompt.contains("[FINAL_REPORT]"));
    }

    #[test]
    fn config_roundtrip_toml() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.completion.model, config.completion.model);
        assert_eq!(parsed.persona.system_prompt, config.persona.system_prompt);
        assert_eq!(parsed.gateway.port, config.gateway.port);
    }

    #[test]
    fn invalid_temperature_rejected() {
        let mut config = AppConfig::default();
        config.completion.temperature = 5.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn invalid_speed_rejected() {
        let mut config = AppConfig::default();
        config.speech.speed = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_fallback_rejected() {
        let mut config = AppConfig::default();
        config.persona.fallback_reply = "  ".into();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("persona.fallback_reply"));
    }

    #[test]
    fn missing_config_file_returns_defaults() {
        let config = AppConfig::load_from(Path::new("/nonexistent/config.toml")).unwrap();
        assert_eq!(config.completion.provider, "groq");
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[persona]
system_prompt = "You are a friendly coach."

[speech]
voice = "nova"
speed = 0.95
"#,
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.persona.system_prompt, "You are a friendly coach.");
        assert_eq!(config.speech.voice, "nova");
        assert!((config.speech.speed - 0.95).abs() < f32::EPSILON);
        assert_eq!(config.speech.model, "tts-1");
        assert_eq!(config.completion.model, "llama-3.3-70b-versatile");
    }

    #[test]
    fn prompt_file_overrides_inline_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let prompt_path = dir.path().join("persona.md");
        let mut f = std::fs::File::create(&prompt_path).unwrap();
        writeln!(f, "You are Rachel Lee, a calm recruiter.").unwrap();

        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            format!(
                "[persona]\nsystem_prompt = \"ignored\"\nprompt_file = {:?}\n",
                prompt_path.display().to_string()
            ),
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.persona.system_prompt, "You are Rachel Lee, a calm recruiter.");
    }

    #[test]
    fn relative_prompt_file_resolves_next_to_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("personas")).unwrap();
        std::fs::write(dir.path().join("personas/coach.md"), "You are a career coach.\n")
            .unwrap();

        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[persona]\nprompt_file = \"personas/coach.md\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.persona.system_prompt, "You are a career coach.");
    }

    #[test]
    fn missing_prompt_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[persona]\nprompt_file = \"/nonexistent/persona.md\"\n").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ReadError { .. })
        ));
    }

    #[test]
    fn malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gateway\nport = 1").unwrap();
        assert!(matches!(
            AppConfig::load_from(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn env_supplies_missing_keys() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[("GROQ_API_KEY", "gsk-1"), ("OPENAI_API_KEY", "sk-2")]))
            .unwrap();
        assert_eq!(config.completion.api_key.as_deref(), Some("gsk-1"));
        assert_eq!(config.speech.api_key.as_deref(), Some("sk-2"));
    }

    #[test]
    fn file_key_wins_over_env() {
        let mut config = AppConfig::default();
        config.completion.api_key = Some("from-file".into());
        config.apply_env(env(&[("GROQ_API_KEY", "from-env")])).unwrap();
        assert_eq!(config.completion.api_key.as_deref(), Some("from-file"));
    }

    #[test]
    fn blank_file_key_falls_back_to_env() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[completion]\napi_key = \"\"\n\n[speech]\napi_key = \"  \"\n",
        )
        .unwrap();

        let mut config = AppConfig::load_from(&path).unwrap();
        assert!(config.completion.api_key.is_none());
        assert!(config.speech.api_key.is_none());

        config.apply_env(env(&[("GROQ_API_KEY", "gsk-env")])).unwrap();
        assert_eq!(config.completion.api_key.as_deref(), Some("gsk-env"));
        assert!(config.speech.api_key.is_none());
    }

    #[test]
    fn env_overrides_bind_and_model() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("ECHO_HOST", "127.0.0.1"),
                ("ECHO_PORT", "9000"),
                ("ECHO_COMPLETION_MODEL", "llama-3.1-8b-instant"),
            ]))
            .unwrap();
        assert_eq!(config.gateway.host, "127.0.0.1");
        assert_eq!(config.gateway.port, 9000);
        assert_eq!(config.completion.model, "llama-3.1-8b-instant");
    }

    #[test]
    fn bad_port_env_rejected() {
        let mut config = AppConfig::default();
        assert!(config.apply_env(env(&[("ECHO_PORT", "eighty")])).is_err());
    }

    #[test]
    fn debug_redacts_keys() {
        let mut config = AppConfig::default();
        config.completion.api_key = Some("gsk-secret".into());
        config.speech.api_key = Some("sk-secret".into());
        let dbg = format!("{config:?}");
        assert!(!dbg.contains("secret"));
        assert!(dbg.contains("[REDACTED]"));
    }

    #[test]
    fn options_mirror_config() {
        let config = AppConfig::default();
        let c = config.completion_options();
        assert_eq!(c.model, "llama-3.3-70b-versatile");
        assert!((c.temperature - 0.6).abs() < f32::EPSILON);
        assert_eq!(c.max_tokens, Some(1024));

        let s = config.speech_options();
        assert_eq!(s.model, "tts-1");
        assert_eq!(s.voice, "shimmer");
        assert!((s.speed - 1.05).abs() < f32::EPSILON);
        assert_eq!(s.response_format, "mp3");
    }

    #[test]
    fn zero_max_tokens_disables_cap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[completion]\nmax_tokens = 0\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.completion.max_tokens, 0);
        assert_eq!(config.completion_options().max_tokens, None);
    }

    #[test]
    fn omitted_max_tokens_keeps_default_cap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[completion]\nmodel = \"llama-3.1-8b-instant\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.completion_options().max_tokens, Some(1024));
    }

    #[test]
    fn uncapped_config_survives_save_and_load() {
        let mut config = AppConfig::default();
        config.completion.max_tokens = 0;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = AppConfig::load_from(&path).unwrap();
        assert_eq!(loaded.completion_options().max_tokens, None);
    }

    #[test]
    fn config_error_converts_into_core_error() {
        let err: echo_core::Error = ConfigError::ValidationError("bad port".into()).into();
        assert!(matches!(err, echo_core::Error::Config { .. }));
        assert!(err.to_string().contains("bad port"));
    }

    #[test]
    fn default_toml_generation() {
        let toml_str = AppConfig::default_toml();
        assert!(toml_str.contains("llama-3.3-70b-versatile"));
        assert!(toml_str.contains("shimmer"));
        assert!(!toml_str.contains("api_key"));
    }
}
