//! HTTP server binary for the market research API.
//!
//! Usage: `marketscope-server [CONFIG_PATH]`. Without a path the default
//! config file is used when present. `TAVILY_API_KEY`, `OPENAI_API_KEY`,
//! `FRONTEND_URL` and `BACKEND_PORT` override the file.

use std::path::PathBuf;

use marketscope::{ApiServer, ServiceConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = ServiceConfig::load(config_path.as_deref())
        .map_err(|e| anyhow::anyhow!("failed to load config: {e}"))?;

    if !config.provider.is_configured() {
        tracing::warn!("TAVILY_API_KEY is not set; searches will fail until it is configured");
    }
    if !config.llm.is_configured() {
        tracing::warn!("OPENAI_API_KEY is not set; analyses use the built-in narrative");
    }

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "marketscope-server starting");

    let server = ApiServer::start(&config)
        .await
        .map_err(|e| anyhow::anyhow!("marketscope-server failed to start: {e}"))?;

    tokio::signal::ctrl_c().await?;
    server.shutdown();

    tracing::info!(addr = %server.addr(), "marketscope-server shut down cleanly");
    Ok(())
}
