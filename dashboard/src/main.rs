// Dashboard entry point: a terminal rendition of the moving-averages page.
mod app;
mod components;
mod config;
mod state;

use anyhow::Context;
use app::App;
use client::services::HttpMovingAverageApi;
use client::storage::JsonFileStore;
use config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the dashboard, logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting Moving Averages dashboard...");

    let app_config = AppConfig::load().context("Failed to load dashboard configuration")?;
    tracing::info!(
        "Loaded configuration version {} ({:?} dashboard).",
        app_config.version,
        app_config.dashboard.variant
    );

    let store = JsonFileStore::open(&app_config.client.storage_path);
    let api = HttpMovingAverageApi::new(&app_config.client)?;
    let mut app = App::new(&app_config.dashboard, api, store);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    app.run(stdin, tokio::io::stdout()).await?;

    tracing::info!("Moving Averages dashboard finished.");
    Ok(())
}
