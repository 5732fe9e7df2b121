//! prompt-architect server and dry-run CLI.
//!
//! Usage:
//!   prompt-architect serve [--bind 0.0.0.0:8787]
//!   prompt-architect compose --framework race --format markdown "a 30-day workout plan"

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

use prompt_architect::{
    CompletionGateway, Config, FrameworkId, GenerationRequest, OutputFormat, PromptInput,
    clients::create_provider, compose, config::RuntimeConfig, http::start_http_server,
};

#[derive(Parser)]
#[command(name = "prompt-architect")]
#[command(about = "Turn short ideas into structured prompts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Override the configured bind address
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Print the composed system instruction and user content without calling the API
    Compose {
        #[arg(long, default_value = "standard")]
        framework: FrameworkId,
        #[arg(long, default_value = "markdown")]
        format: OutputFormat,
        /// Emit JSON instead of plain text
        #[arg(long)]
        json: bool,
        input: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Subscriber first: Config::load reports through tracing
    Config::load_env_file();
    let log_level = RuntimeConfig::load_from_env().log_level;
    tracing_subscriber::fmt()
        .with_env_filter(log_level.as_str())
        .with_ansi(false)
        .init();

    let mut config = Config::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        e
    })?;

    match cli.command {
        Commands::Serve { bind } => {
            if let Some(addr) = bind {
                config.server.bind = addr;
            }
            let provider = create_provider(&config)?;
            info!(
                "Completion provider ready: {} ({})",
                provider.provider_name(),
                provider.model_name()
            );
            let gateway = Arc::new(CompletionGateway::new(provider));
            start_http_server(Arc::new(config), gateway).await
        }
        Commands::Compose {
            framework,
            format,
            json,
            input,
        } => {
            let request = GenerationRequest::new(PromptInput::Simple(input), format, framework)?;
            let composed = compose(&request);
            if json {
                println!("{}", serde_json::to_string_pretty(&composed)?);
            } else {
                println!("{}\n\n---\n{}", composed.system_instruction, composed.user_content);
            }
            Ok(())
        }
    }
}
