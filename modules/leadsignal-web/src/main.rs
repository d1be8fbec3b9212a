use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use leadsignal_common::Config;
use leadsignal_scout::{RunController, Scout};
use leadsignal_web::{app, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("leadsignal=info".parse()?))
        .init();

    let config = Config::from_env()?;
    config.log_redacted();

    let state = Arc::new(AppState {
        scout: Arc::new(Scout::from_config(&config)),
        controller: RunController::new(),
    });

    let addr = format!("{}:{}", config.web_host, config.web_port);
    info!("Lead signal dashboard starting on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
