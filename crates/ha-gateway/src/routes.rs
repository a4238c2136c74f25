//! Router configuration.
//!
//! This module sets up the Axum router with all routes and middleware.

use std::sync::Arc;
use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use ha_gateway_upstream::HomeAssistant;

use crate::handlers::{blinds, fallback, health, lights, passthrough};
use crate::state::GatewayState;

/// Create the gateway router with all routes and middleware.
///
/// # Routes
///
/// - `GET /health` - Liveness check
/// - `GET /ha-test` - Home Assistant API root passthrough
/// - `GET /api/lights` - List light aliases
/// - `POST /api/lights/:alias` - Switch a light on or off
/// - `GET /api/covers` - List cover aliases
/// - `POST /api/blinds/position` - Set the blind position
/// - `POST /api/blinds/tilt` - Set the blind tilt
///
/// Unknown paths answer 404 and unsupported methods 405, both in the
/// standard error format.
pub fn create_router<H>(state: GatewayState<H>) -> Router
where
    H: HomeAssistant + 'static,
{
    // Extract config values before moving state
    let cors = build_cors_layer(&state.config.cors_origin);
    let max_body_bytes = state.config.max_body_bytes;
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let state = Arc::new(state);

    Router::new()
        .route("/health", get(health::health))
        .route("/ha-test", get(passthrough::ha_test::<H>))
        // Lights
        .route("/api/lights", get(lights::list_lights::<H>))
        .route("/api/lights/:alias", post(lights::set_light::<H>))
        // Covers
        .route("/api/covers", get(lights::list_covers::<H>))
        .route("/api/blinds/position", post(blinds::set_position::<H>))
        .route("/api/blinds/tilt", post(blinds::set_tilt::<H>))
        .fallback(fallback::not_found)
        .method_not_allowed_fallback(fallback::method_not_allowed)
        // Middleware
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(max_body_bytes))
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer for the configured origin.
///
/// A concrete origin gets credentialed access with request methods and
/// headers mirrored back. `*` allows any origin without credentials. An
/// origin that is not a valid header value disables cross-origin access.
fn build_cors_layer(origin: &str) -> CorsLayer {
    if origin == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    match HeaderValue::from_str(origin) {
        Ok(origin) => CorsLayer::new()
            .allow_origin(origin)
            .allow_credentials(true)
            .allow_methods(AllowMethods::mirror_request())
            .allow_headers(AllowHeaders::mirror_request()),
        Err(_) => {
            tracing::warn!(origin, "Invalid CORS origin, cross-origin requests disabled");
            CorsLayer::new()
        }
    }
}
