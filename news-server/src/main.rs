use anyhow::{Context, Result};
use clap::Parser;
use news_server::{AppState, CachePolicy, ServerConfig, create_router, init_metrics};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "news-server")]
#[command(about = "News service with a read-through LRU/LFU cache", long_about = None)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yml")]
    config: PathBuf,

    /// Bind host (overrides config)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides config)
    #[arg(short, long)]
    port: Option<u16>,

    /// Cache eviction policy: LRU or LFU (overrides config)
    #[arg(long)]
    cache_algorithm: Option<String>,

    /// Maximum cached articles (overrides config)
    #[arg(long)]
    cache_capacity: Option<usize>,
}

fn load_config(args: &Args) -> Result<ServerConfig> {
    let mut config = if args.config.exists() {
        ServerConfig::from_file(&args.config)
            .with_context(|| format!("Failed to load config {}", args.config.display()))?
    } else {
        ServerConfig::default()
    };

    if let Some(host) = &args.host {
        config.server.host = host.clone();
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(algorithm) = &args.cache_algorithm {
        config.cache.algorithm = algorithm.parse::<CachePolicy>()?;
    }
    if let Some(capacity) = args.cache_capacity {
        config.cache.capacity = capacity;
    }

    Ok(config)
}

fn init_tracing(config: &ServerConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "pretty" => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .pretty()
            .init(),
        _ => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    init_tracing(&config);
    info!("Starting News Server v{}", env!("CARGO_PKG_VERSION"));

    // Misconfigured cache aborts startup
    config.validate().context("Invalid cache configuration")?;
    let state = AppState::from_config(&config.cache)?;

    init_metrics();
    let app = create_router(state);

    let addr = config.server_addr();
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
