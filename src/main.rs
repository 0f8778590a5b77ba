use std::sync::Arc;

use anyhow::Context;
use portfolio_chat::{config::Config, routes, state::AppState};
use tower_http::cors::CorsLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,portfolio_chat=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    let state = Arc::new(AppState::from_config(&config)?);

    if state.credential.resolve().is_none() {
        tracing::warn!(var = %config.api_key_var, "credential not set; /api/chat will answer 500 until it is");
    }

    let app = routes::create_router(&config.site_dir)
        .with_state(state)
        .layer(CorsLayer::very_permissive());

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("binding {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, site = %config.site_dir.display(), "portfolio chat relay listening");
    axum::serve(listener, app).await?;
    Ok(())
}
