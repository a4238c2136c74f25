//! HTTP gateway for the Home Assistant guest room.
//!
//! This crate provides the public-facing REST API. It handles:
//!
//! - Alias whitelisting: only entities in the [`AliasRegistry`] are reachable
//! - Payload validation before anything is sent upstream
//! - Forwarding one service call per request to Home Assistant
//! - Mapping upstream failures to JSON error responses
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Clients                              │
//! │                     (HTTP / JSON)                           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        ha-gateway                           │
//! │  ┌─────────────┐ ┌─────────────┐ ┌─────────────────────┐    │
//! │  │   Router    │ │   Alias     │ │    Upstream         │    │
//! │  │ + Handlers  │ │  Registry   │ │    client           │    │
//! │  └─────────────┘ └─────────────┘ └─────────────────────┘    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │ Bearer token
//!                              ▼
//!                    ┌──────────────────┐
//!                    │  Home Assistant  │
//!                    └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use ha_gateway::{create_router, GatewayConfig, GatewayState};
//! use ha_gateway_core::AliasRegistry;
//! use ha_gateway_upstream::{HttpHomeAssistant, Settings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load()?;
//! let upstream = Arc::new(HttpHomeAssistant::new(settings));
//! let registry = Arc::new(AliasRegistry::guest_room());
//!
//! let state = GatewayState::new(upstream, registry, GatewayConfig::default());
//! let app = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:8000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use config::{ConfigError, GatewayConfig};
pub use error::ApiError;
pub use ha_gateway_core::AliasRegistry;
pub use routes::create_router;
pub use state::GatewayState;
