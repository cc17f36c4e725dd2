use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use contrib_analyzer::{AppState, Config, router};
use std::path::PathBuf;
use tokio::net::TcpListener;
use tracing::{Level, info};

#[derive(Parser)]
#[command(name = "contrib-analyzer")]
#[command(about = "An HTTP service that rates an author's contribution to a GitHub repository")]
#[command(version)]
struct Cli {
    /// Address to listen on (overrides config and ANALYZER_HOST)
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on (overrides config and ANALYZER_PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Configuration file path (default: contrib-analyzer.yaml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

/// Load layered configuration, apply command-line overrides and validate
fn prepare_config(cli: &Cli) -> Result<Config> {
    let mut config =
        Config::load_layered(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(host) = &cli.host {
        config.server.host = host.clone();
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    dotenv::dotenv().ok();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    let config = prepare_config(&cli)?;

    let address = config.bind_address();
    let debug_endpoint = config.server.debug_endpoint;
    let state = AppState::from_config(config).context("Failed to initialize agent")?;
    let app = router(state);

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind to {}", address))?;

    println!(
        "{} {}",
        "contrib-analyzer listening on".green(),
        format!("http://{}", address).cyan().bold()
    );
    println!("  POST /api/analyze-contribution");
    println!("  GET  /health");
    if debug_endpoint {
        println!("  GET  /debug");
    }
    info!("Server listening on {}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
