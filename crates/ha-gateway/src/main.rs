//! Home Assistant guest-room gateway.
//!
//! This is the main entry point for the gateway service.
//!
//! # Configuration
//!
//! `HA_BASE_URL` and `HA_TOKEN` are required. They are read from the process
//! environment, falling back to `.env` (or `$HA_GATEWAY_ENV_FILE`). The
//! gateway refuses to start without them.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ha_gateway::{create_router, AliasRegistry, GatewayConfig, GatewayState};
use ha_gateway_core::Domain;
use ha_gateway_upstream::{HttpHomeAssistant, Settings, UPSTREAM_TIMEOUT};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ha_gateway=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Home Assistant gateway");

    let settings = Settings::load().inspect_err(|e| {
        tracing::error!(error = %e, "Refusing to start without upstream credentials");
    })?;
    let config = GatewayConfig::from_env()?;

    tracing::info!(
        listen_addr = %config.listen_addr,
        cors_origin = %config.cors_origin,
        upstream = %settings.base_url(),
        upstream_timeout_secs = UPSTREAM_TIMEOUT.as_secs(),
        "Gateway configuration loaded"
    );

    let registry = Arc::new(AliasRegistry::guest_room());
    for domain in Domain::ALL {
        tracing::debug!(%domain, aliases = registry.len(domain), "Alias table loaded");
    }

    let upstream = Arc::new(HttpHomeAssistant::new(settings));

    let listen_addr = config.listen_addr.clone();
    let state = GatewayState::new(upstream, registry, config);
    let app = create_router(state);

    // Start HTTP server
    tracing::info!(listen_addr = %listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
