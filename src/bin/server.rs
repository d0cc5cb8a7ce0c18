//! giftwise HTTP server binary.
//!
//! Starts an axum HTTP server that maps questionnaire answers and fetches
//! gift ideas from the configured LLM provider.
//!
//! # Environment Variables
//!
//! - `PORT` — HTTP port (default: 8080)
//! - `GIFTWISE_BIND` — bind address (default: 0.0.0.0)
//! - `OPENROUTER_API_KEY` — provider credential; without it every fetch fails with 500
//! - `GIFTWISE_MODEL`, `GIFTWISE_BASE_URL`, `GIFTWISE_TIMEOUT_SECS`, `GIFTWISE_TEMPERATURE`
//! - `RUST_LOG` — Tracing filter (default: "info,giftwise=debug")
//!
//! # Usage
//!
//! ```bash
//! OPENROUTER_API_KEY=sk-... cargo run --bin server
//! ```

use anyhow::Context;
use giftwise::config::{GatewayConfig, ServerConfig};
use giftwise::server::{app_router, AppState};
use giftwise::{GiftAssistant, PayloadMapper, RecommendationGateway};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,giftwise=debug".into()),
        )
        .init();

    let server_config = ServerConfig::from_env();
    let gateway_config = GatewayConfig::from_env();
    tracing::info!(config = ?gateway_config, "Loaded gateway configuration");

    let gateway = RecommendationGateway::new(gateway_config)?;
    if !gateway.is_configured() {
        tracing::warn!(
            "{} is not set; every recommendation request will fail with a configuration error",
            giftwise::config::API_KEY_ENV
        );
    }

    let state = AppState::new(GiftAssistant::new(PayloadMapper::default(), gateway));
    let app = app_router(state);

    let bind_addr = server_config.bind_addr();
    tracing::info!("giftwise server starting on {}", bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health      — liveness probe");
    tracing::info!("  POST /gift-helper — canonical payload -> gift ideas");
    tracing::info!("  POST /gift-ideas  — questionnaire values -> gift ideas");

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", bind_addr))?;

    axum::serve(listener, app).await.context("Server failed")?;
    Ok(())
}
