//! Gateway application state.
//!
//! This module defines the shared state that is available to all request handlers.
//! Everything in it is read-only after startup.

use std::sync::Arc;

use ha_gateway_core::AliasRegistry;
use ha_gateway_upstream::HomeAssistant;

use crate::config::GatewayConfig;

/// Shared application state for the gateway.
pub struct GatewayState<H>
where
    H: HomeAssistant,
{
    /// Client for the Home Assistant REST API.
    pub upstream: Arc<H>,
    /// Whitelist of addressable entities.
    pub registry: Arc<AliasRegistry>,
    /// Gateway configuration.
    pub config: GatewayConfig,
}

impl<H> GatewayState<H>
where
    H: HomeAssistant,
{
    /// Create a new gateway state.
    #[must_use]
    pub fn new(upstream: Arc<H>, registry: Arc<AliasRegistry>, config: GatewayConfig) -> Self {
        Self {
            upstream,
            registry,
            config,
        }
    }
}

impl<H> Clone for GatewayState<H>
where
    H: HomeAssistant,
{
    fn clone(&self) -> Self {
        Self {
            upstream: Arc::clone(&self.upstream),
            registry: Arc::clone(&self.registry),
            config: self.config.clone(),
        }
    }
}
