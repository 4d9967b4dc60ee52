//! stay-mcp: MCP server for the Stay AI property booking API.

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use stay_mcp::{McpServer, StayClient, StayConfig, API_KEY_ENV, DEFAULT_BASE_URL};

/// MCP server exposing Stay AI property search, bookings, availability,
/// pricing and customers over stdio.
#[derive(Parser, Debug)]
#[command(name = "stay-mcp", version, about)]
struct Args {
    /// Stay AI API key
    #[arg(long, env = "STAY_AI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base URL of the Stay AI REST API
    #[arg(long, env = "STAY_AI_BASE_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Log filter used when RUST_LOG is unset (e.g. "info", "stay_mcp=debug")
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    info!("Starting Stay AI MCP server...");

    let config = match StayConfig::new(&args.base_url, args.api_key) {
        Ok(config) => config,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if !config.has_api_key() {
        warn!("{} not found in environment variables.", API_KEY_ENV);
        warn!("Please create a .env file with your Stay AI API key or set it in your environment.");
        warn!("Example: {}=your_api_key_here", API_KEY_ENV);
    }

    let client = match StayClient::new(&config) {
        Ok(client) => client,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(base_url = %config.base_url, "Stay AI client ready");

    match McpServer::new(client).run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    }
}
