use anyhow::{Error, Result, anyhow};
use deepseas_ops::{api::run_api_server, config::Config};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::load()?;

    run_api_server(config)
        .await
        .map_err(|e| anyhow!("API server failed: {}", e))
}
