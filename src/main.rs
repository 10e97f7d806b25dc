//! Rate card preview server.
//!
//! Usage: `rate-card-engine [--config <dir>] [--addr <host:port>]`

use anyhow::{Context, Result};
use rate_card_engine::api::{AppState, create_router};
use rate_card_engine::config::ConfigLoader;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_DIR: &str = "./config";
const DEFAULT_ADDR: &str = "127.0.0.1:3000";

fn parse_args() -> (String, String) {
    let mut config_dir = DEFAULT_CONFIG_DIR.to_string();
    let mut addr = DEFAULT_ADDR.to_string();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => config_dir = it.next().unwrap_or(config_dir),
            "--addr" => addr = it.next().unwrap_or(addr),
            _ => {}
        }
    }
    (config_dir, addr)
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let (config_dir, addr) = parse_args();
    info!(%config_dir, %addr, "starting rate card engine");

    let catalogue = ConfigLoader::load(&config_dir)
        .with_context(|| format!("loading contract catalogue from {}", config_dir))?;
    let router = create_router(AppState::new(catalogue));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, "listening");
    axum::serve(listener, router).await.context("serving HTTP")?;

    Ok(())
}
