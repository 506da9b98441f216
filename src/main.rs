//! # OKPets — OK.ru chat-bot relay with mpets.mobi autopilot
//!
//! Wires the gateway (webhook + OAuth), the OK.ru channel, and the
//! autopilot scheduler together, and tears them down in order on ctrl-c.
//!
//! Usage:
//!   okpets                      # Serve with ~/.okpets/config.toml + env
//!   okpets --port 8080          # Override the listen port
//!   okpets -c ./okpets.toml -v  # Explicit config, debug logging

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use okpets_autopilot::{ActionClient, ActionSpec, MpetsClient, SchedulerRuntime, TaskRegistry};
use okpets_channels::{Dispatcher, OkClient};
use okpets_core::OkpetsConfig;
use okpets_core::credentials::CredentialStore;
use okpets_gateway::{AppState, build_router, serve};

#[derive(Parser)]
#[command(name = "okpets", version, about = "🐾 OKPets — OK.ru chat-bot relay with mpets.mobi autopilot")]
struct Cli {
    /// Config file path (default: ~/.okpets/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen host override
    #[arg(long)]
    host: Option<String>,

    /// Listen port override
    #[arg(short, long)]
    port: Option<u16>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "okpets=debug,tower_http=debug"
    } else {
        "okpets=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    let mut config = match &cli.config {
        Some(path) => OkpetsConfig::load_from(path)?,
        None => OkpetsConfig::load()?,
    };
    config.apply_env();
    if let Some(host) = cli.host {
        config.gateway.host = host;
    }
    if let Some(port) = cli.port {
        config.gateway.port = port;
    }
    if config.ok.secret_key.is_empty() {
        tracing::warn!("⚠️ OK secret key is not configured; chat replies will fail");
    }

    // Shared stores and clients.
    let store = Arc::new(CredentialStore::new());
    let game: Arc<dyn ActionClient> = Arc::new(MpetsClient::new(&config.mpets.base_url));
    let ok = Arc::new(OkClient::new(config.ok.clone()));

    // The autopilot: one worker thread, all loops cooperative on it.
    let runtime = Arc::new(SchedulerRuntime::start()?);
    let registry = Arc::new(TaskRegistry::new(
        Arc::clone(&runtime),
        Arc::clone(&game),
        Arc::new(ActionSpec::standard()),
    ));

    let dispatcher = Arc::new(Dispatcher::new(
        Arc::clone(&registry),
        Arc::clone(&game),
        Arc::clone(&store),
    ));

    let router = build_router(AppState {
        ok,
        dispatcher,
        store,
        registry: Arc::clone(&registry),
        start_time: std::time::Instant::now(),
    });

    let addr = format!("{}:{}", config.gateway.host, config.gateway.port);
    tracing::info!("🐾 okpets gateway listening on {addr}");
    serve(&addr, router, shutdown_signal()).await?;

    // Explicit teardown: drain the loops, then stop their runtime.
    registry.stop_all();
    runtime.shutdown();
    tracing::info!("bye 👋");
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    tracing::info!("shutdown signal received");
}
