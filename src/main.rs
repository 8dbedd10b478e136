//! Stockcast Dashboard Server
//!
//! Run with: cargo run -- [--config stockcast.toml] [--data predicted_stock_prices.csv] [--debug]
//!
//! # Configuration
//!
//! Settings come from the config file (explicit `--config`, else
//! `~/.config/stockcast/config.toml` or `./stockcast.toml`), then
//! `STOCKCAST_*` environment variables, then command-line flags.
//! `RUST_LOG` overrides the configured log level unless `--debug` is given.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use stockcast::api::{serve, AppState};
use stockcast::config::{generate_default_config, Config, LoggingConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "stockcast")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Dashboard of actual vs. predicted stock closing prices")]
struct Cli {
    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Prediction CSV to serve
    #[arg(short, long)]
    data: Option<PathBuf>,

    /// Host to bind to
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Verbose logging for the server and HTTP layer
    #[arg(long)]
    debug: bool,

    /// Print a commented default config file and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", generate_default_config());
        return Ok(());
    }

    let loaded = match &cli.config {
        Some(path) => Config::load_with_env(path)?,
        None => Config::load_default(),
    };
    let mut config = loaded.config;
    if let Some(data) = cli.data {
        config.data.path = data;
    }
    if let Some(host) = cli.host {
        config.server.host = host;
    }
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    init_tracing(&config.logging, cli.debug);

    tracing::info!("Starting Stockcast v{}", env!("CARGO_PKG_VERSION"));
    match &loaded.source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }
    for warning in &loaded.warnings {
        tracing::warn!("{}", warning);
    }
    tracing::info!("Data file: {:?}", config.data.path);

    // Loading: nothing is served until the table is in memory
    let loader = config.data.loader()?;
    let table = match loader.load(&config.data.path) {
        Ok(table) => Arc::new(table),
        Err(e) => {
            tracing::error!(
                error = %e,
                path = ?config.data.path,
                malformed = e.is_parse_error(),
                "Failed to load prediction table"
            );
            return Err(e).with_context(|| format!("loading {:?}", config.data.path));
        }
    };

    tracing::info!(
        symbols = table.symbols().len(),
        default_symbol = %table.default_symbol(),
        "Prediction table ready"
    );

    let state = AppState::new(table, config.server.clone());
    serve(state, &config.server).await?;

    tracing::info!("Stockcast stopped");
    Ok(())
}

/// Install the global tracing subscriber
fn init_tracing(logging: &LoggingConfig, debug: bool) {
    let filter = if debug {
        EnvFilter::new("stockcast=debug,tower_http=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("stockcast={},tower_http=info", logging.level))
        })
    };

    let registry = tracing_subscriber::registry().with(filter);

    if logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
