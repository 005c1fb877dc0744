//! Echo interviewer CLI — the main entry point.
//!
//! Commands:
//! - `serve`   — Start the HTTP proxy (`/chat`, `/speech`)
//! - `init`    — Write a default config file
//! - `status`  — Show resolved configuration
//! - `doctor`  — Diagnose configuration and keys
//! - `models`  — List models offered by the completion provider
//! - `ask`     — Send one message through the completion path
//! - `say`     — Synthesize one utterance to an audio file

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "echo-interviewer",
    about = "Echo interviewer — chat-completion and text-to-speech proxy",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config.toml (default: ~/.echo-interviewer/config.toml)
    #[arg(short, long, global = true, env = "ECHO_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP proxy server
    Serve {
        /// Override the bind host
        #[arg(long)]
        host: Option<String>,

        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the resolved configuration
    Status,

    /// Diagnose configuration health
    Doctor,

    /// List models available from the completion provider
    Models,

    /// Send a single message to the interviewer
    Ask {
        /// The candidate's message
        message: String,
    },

    /// Synthesize speech and write the audio to a file
    Say {
        /// Text to speak
        text: String,

        /// Output file
        #[arg(short, long, default_value = "speech.mp3")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Serve { host, port } => commands::serve::run(config_path, host, port).await?,
        Commands::Init { force } => commands::init::run(config_path, force).await?,
        Commands::Status => commands::status::run(config_path).await?,
        Commands::Doctor => commands::doctor::run(config_path).await?,
        Commands::Models => commands::models::run(config_path).await?,
        Commands::Ask { message } => commands::ask::run(config_path, message).await?,
        Commands::Say { text, out } => commands::say::run(config_path, text, out).await?,
    }

    Ok(())
}
