use std::sync::Arc;

use anyhow::Context;
use server::{AppState, routes};
use services::services::{airtable::AirtableClient, config::AirtableConfig};
use tracing::{error, info};
use utils::{env, log::init_tracing};

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing("server=info,services=info,tower_http=info");

    let config = AirtableConfig::from_env().context("invalid Airtable configuration")?;
    let client = AirtableClient::new(config).context("failed to build Airtable client")?;
    info!(url = %client.records_url(), "Reading records from Airtable");

    let app = routes::router(AppState::new(Arc::new(client)));

    let host = env::optional("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = env::parsed::<u16>("PORT")?.unwrap_or(DEFAULT_PORT);
    let listener = tokio::net::TcpListener::bind((host.as_str(), port))
        .await
        .with_context(|| format!("failed to bind {}:{}", host, port))?;

    info!("Server running on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
