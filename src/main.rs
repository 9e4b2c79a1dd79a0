use anyhow::{Context, Result};
use institute_site::{config, scheduler, server};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file (ignored in production)
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("institute_site=info".parse()?),
        )
        .init();

    info!("Starting institute site v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration from environment
    let config = config::Config::from_env()?;
    info!(
        "CMS: {} (default language: {})",
        config.api_url, config.default_language
    );
    if config.api_key.is_none() {
        info!("API_KEY not set, cache refresh endpoint disabled");
    }

    let port = config.port;
    let state = server::AppState::new(config).context("Failed to create CMS client")?;

    // Warm the layout cache; pages retry on demand if the CMS is down
    if let Err(e) = scheduler::refresh_layout(&state.cms, &state.cache).await {
        warn!("Initial layout load failed: {}", e);
    }

    let _scheduler = scheduler::start_scheduler(
        Arc::clone(&state.config),
        state.cms.clone(),
        Arc::clone(&state.cache),
    )
    .await?;

    server::run(state, port).await
}
