//! HTTP server for the payroll engine.
//!
//! Environment:
//! - `PAYROLL_BIND_ADDR`: listen address, default `127.0.0.1:3000`
//! - `PAYROLL_CONFIG_DIR`: configuration directory; the embedded BR-RJ
//!   configuration is used when unset
//! - `RUST_LOG`: log filter, default `info`

use std::env;
use std::net::SocketAddr;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let loader = match env::var("PAYROLL_CONFIG_DIR") {
        Ok(dir) => {
            info!(config_dir = %dir, "Loading configuration from directory");
            ConfigLoader::load(&dir)?
        }
        Err(_) => {
            info!("Using embedded configuration");
            ConfigLoader::builtin()?
        }
    };
    info!(
        region = %loader.region().code,
        name = %loader.region().name,
        "Configuration loaded"
    );

    let addr: SocketAddr = env::var("PAYROLL_BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
        .parse()?;

    let router = create_router(AppState::new(loader));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "Payroll engine listening");

    axum::serve(listener, router).await?;

    Ok(())
}
