//! FeeGateway server
//!
//! Loads configuration (TOML file or defaults, then environment overrides),
//! starts the REST API, and shuts down gracefully on Ctrl+C.

use anyhow::{Context, Result};
use clap::Parser;
use fee_gateway::{create_routes, logging, GatewayConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser)]
#[command(name = "fee-gateway")]
#[command(about = "REST API for marketplace fee quotes")]
#[command(version)]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GatewayConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?
            .with_overrides(|key| std::env::var(key).ok())?,
        None => GatewayConfig::from_env()?,
    };

    logging::initialize_logging(&config.logging)?;

    let addr = config.server_addr()?;
    info!("Starting FeeGateway v{} on {}", env!("CARGO_PKG_VERSION"), addr);
    info!("Batch quotes limited to {} prices", config.limits.max_batch_size);

    let routes = create_routes(Arc::new(config));
    let (bound, server) = warp::serve(routes).try_bind_with_graceful_shutdown(addr, async {
        tokio::signal::ctrl_c().await.ok();
        info!("Shutdown signal received");
    })?;

    info!("FeeGateway listening on {}", bound);
    server.await;

    info!("FeeGateway shutdown complete");
    Ok(())
}
