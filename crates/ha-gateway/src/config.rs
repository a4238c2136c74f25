//! Gateway configuration types.
//!
//! This module defines the server-side settings of the gateway. Upstream
//! credentials live in [`ha_gateway_upstream::Settings`].

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Errors raised while reading gateway configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable could not be parsed.
    #[error("invalid value for {name}: {value:?}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Configuration for the gateway service.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    /// Listen address (e.g., "0.0.0.0:8000").
    #[serde(default = "GatewayConfig::default_listen_addr")]
    pub listen_addr: String,

    /// The single origin allowed to make credentialed cross-origin requests.
    #[serde(default = "GatewayConfig::default_cors_origin")]
    pub cors_origin: String,

    /// Maximum request body size in bytes.
    #[serde(default = "GatewayConfig::default_max_body")]
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    #[serde(default = "GatewayConfig::default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl GatewayConfig {
    fn default_listen_addr() -> String {
        "0.0.0.0:8000".to_string()
    }

    fn default_cors_origin() -> String {
        "https://guest-room-ha-gateway.ddev.site".to_string()
    }

    const fn default_max_body() -> usize {
        64 * 1024 // 64 KiB
    }

    // Must exceed the upstream timeout so upstream timeouts surface as 502.
    const fn default_request_timeout() -> u64 {
        30
    }

    /// Read overrides from the process environment.
    ///
    /// Recognised variables: `LISTEN_ADDR`, `CORS_ORIGIN`, `MAX_BODY_BYTES`
    /// and `REQUEST_TIMEOUT_SECONDS`. Unset or empty variables keep their
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`GatewayConfig::from_env`], reading through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());
        let mut config = Self::default();

        if let Some(addr) = get("LISTEN_ADDR") {
            config.listen_addr = addr;
        }
        if let Some(origin) = get("CORS_ORIGIN") {
            config.cors_origin = origin;
        }
        if let Some(raw) = get("MAX_BODY_BYTES") {
            config.max_body_bytes = raw.parse().map_err(|_| ConfigError::Invalid {
                name: "MAX_BODY_BYTES",
                value: raw,
            })?;
        }
        if let Some(raw) = get("REQUEST_TIMEOUT_SECONDS") {
            config.request_timeout_seconds = raw.parse().map_err(|_| ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECONDS",
                value: raw,
            })?;
        }

        Ok(config)
    }

    /// Get the request timeout as a `Duration`.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            listen_addr: Self::default_listen_addr(),
            cors_origin: Self::default_cors_origin(),
            max_body_bytes: Self::default_max_body(),
            request_timeout_seconds: Self::default_request_timeout(),
        }
    }
}
