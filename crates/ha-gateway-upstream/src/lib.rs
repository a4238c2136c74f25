//! Home Assistant REST client for the guest-room gateway.
//!
//! This crate owns everything that talks to Home Assistant:
//!
//! - [`Settings`]: the upstream base URL and access token, loaded once at
//!   startup from the environment or a `.env` file
//! - [`HomeAssistant`]: the call interface used by the gateway handlers
//! - [`HttpHomeAssistant`]: the reqwest implementation, one attempt per call
//!   with a fixed timeout
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────┐     ┌──────────────────┐
//! │   Gateway        │────▶│  HomeAssistant   │
//! │   handlers       │     │  (trait)         │
//! └──────────────────┘     └────────┬─────────┘
//!                                   │
//!                          ┌────────▼─────────┐
//!                          │ HttpHomeAssistant│
//!                          │ (reqwest)        │
//!                          └────────┬─────────┘
//!                                   │ Bearer token
//!                          ┌────────▼─────────┐
//!                          │ Home Assistant   │
//!                          │ REST API         │
//!                          └──────────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use ha_gateway_core::EntityId;
//! use ha_gateway_upstream::{HomeAssistant, HttpHomeAssistant, Service, ServiceCall, Settings};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = Settings::load()?;
//! let client = HttpHomeAssistant::new(settings);
//!
//! let entity = EntityId::parse("light.gastezimmer_licht")?;
//! client.call_service(&ServiceCall::new(Service::TurnOn, entity)).await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod client;
pub mod error;
pub mod service;
pub mod settings;

pub use client::{
    HomeAssistant, HttpHomeAssistant, UpstreamReply, API_ROOT_PATH, UPSTREAM_TIMEOUT,
};
pub use error::{Result, UpstreamError};
pub use reqwest::Method;
pub use service::{Service, ServiceCall};
pub use settings::{Settings, SettingsError};

#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

#[cfg(any(test, feature = "test-utils"))]
pub use mock::{MockHomeAssistant, RecordedCall};
