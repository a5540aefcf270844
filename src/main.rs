use std::sync::Arc;

use anyhow::Context;
use scratch_tutor_relay::{
    config::{self, Settings},
    routes,
    state::AppState,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .init();

    let settings_path = std::env::var(config::CONFIG_PATH_ENV)
        .unwrap_or_else(|_| config::DEFAULT_CONFIG_PATH.to_string());
    let settings = Settings::load(&settings_path)?;

    let relay_config = settings.relay_config(std::env::var(config::API_KEY_ENV).ok());
    if relay_config.api_key.is_none() {
        tracing::warn!(
            "No completion API key found in {} or {}; /api/chat will answer 500",
            config::API_KEY_ENV,
            settings_path
        );
    }
    tracing::info!(
        "Relaying to {} with model {}",
        relay_config.endpoint,
        relay_config.model
    );

    let http = reqwest::Client::builder()
        .user_agent(format!("scratch-tutor-relay/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let state = Arc::new(AppState::new(http, relay_config));
    let app = routes::create_router().with_state(state);

    let addr = std::env::var(config::BIND_ADDR_ENV).unwrap_or(settings.bind_addr);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Scratch tutor relay running at http://{}", addr);
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
