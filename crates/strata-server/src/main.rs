//! Strata Config Server binary.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use strata_server::{AppState, Settings, run_server};
use strata_store::{ConfigStore, GitHubProvider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load().context("failed to load settings")?;

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid listen address")?;

    tracing::info!(
        "Starting Strata Config Server v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Repository: {}", settings.github.repo);
    tracing::info!(
        "Supported formats: {:?}",
        settings
            .supported_formats
            .iter()
            .map(|f| f.extension())
            .collect::<Vec<_>>()
    );

    let provider = GitHubProvider::from_repo_spec_with_api_base(
        settings.github.token.clone(),
        &settings.github.repo,
        settings.github.api_base.clone(),
    )
    .context("github.repo must be 'owner/repo' or a GitHub URL")?;

    let store = Arc::new(ConfigStore::new(Arc::new(provider)));
    let state = AppState::new(store, Arc::new(settings));

    run_server(addr, state).await?;
    Ok(())
}
