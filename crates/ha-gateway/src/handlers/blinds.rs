//! Blind (cover) endpoints.
//!
//! The gateway drives a single blind, registered under
//! [`AliasRegistry::BLIND_ALIAS`]. Values are validated before any upstream
//! call is made.

use std::sync::Arc;

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use ha_gateway_core::{AliasRegistry, CoverPercent, Domain, EntityId};
use ha_gateway_upstream::{HomeAssistant, Service, ServiceCall};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::GatewayState;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Request carrying a percentage.
#[derive(Debug, Deserialize)]
pub struct CoverCommand {
    /// Target percentage; must be in `0..=100`.
    pub value: i64,
}

/// Response for a position command.
#[derive(Debug, Serialize)]
pub struct PositionResponse {
    /// The blind's entity.
    pub entity_id: String,
    /// Position that was requested.
    pub position: CoverPercent,
    /// Always `"ok"`.
    pub result: &'static str,
}

/// Response for a tilt command.
#[derive(Debug, Serialize)]
pub struct TiltResponse {
    /// The blind's entity.
    pub entity_id: String,
    /// Tilt that was requested.
    pub tilt_position: CoverPercent,
    /// Always `"ok"`.
    pub result: &'static str,
}

// =============================================================================
// Handlers
// =============================================================================

/// Move the blind to a position.
///
/// # Errors
///
/// Returns an error if:
/// - The value is outside `0..=100` (422)
/// - No blind is configured (500)
/// - Home Assistant rejects the call or cannot be reached
pub async fn set_position<H>(
    State(state): State<Arc<GatewayState<H>>>,
    ApiJson(command): ApiJson<CoverCommand>,
) -> Result<impl IntoResponse, ApiError>
where
    H: HomeAssistant + 'static,
{
    let position = CoverPercent::try_from(command.value)?;
    let entity_id = blind_entity(&state.registry)?;

    let call = ServiceCall::new(Service::SetCoverPosition, entity_id.clone())
        .with_field("position", position.get());
    state.upstream.call_service(&call).await?;

    tracing::info!(entity_id = %entity_id, %position, "Blind position set");

    Ok(Json(PositionResponse {
        entity_id: entity_id.to_string(),
        position,
        result: "ok",
    }))
}

/// Tilt the blind's slats.
///
/// # Errors
///
/// Same as [`set_position`].
pub async fn set_tilt<H>(
    State(state): State<Arc<GatewayState<H>>>,
    ApiJson(command): ApiJson<CoverCommand>,
) -> Result<impl IntoResponse, ApiError>
where
    H: HomeAssistant + 'static,
{
    let tilt_position = CoverPercent::try_from(command.value)?;
    let entity_id = blind_entity(&state.registry)?;

    let call = ServiceCall::new(Service::SetCoverTiltPosition, entity_id.clone())
        .with_field("tilt_position", tilt_position.get());
    state.upstream.call_service(&call).await?;

    tracing::info!(entity_id = %entity_id, %tilt_position, "Blind tilt set");

    Ok(Json(TiltResponse {
        entity_id: entity_id.to_string(),
        tilt_position,
        result: "ok",
    }))
}

/// The configured blind, or a configuration-gap error.
fn blind_entity(registry: &AliasRegistry) -> Result<EntityId, ApiError> {
    registry
        .resolve(Domain::Cover, AliasRegistry::BLIND_ALIAS)
        .cloned()
        .map_err(|_| {
            tracing::error!(alias = AliasRegistry::BLIND_ALIAS, "No blind cover configured");
            ApiError::NotConfigured("No blind cover configured".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blind_entity_resolves() {
        let entity = blind_entity(&AliasRegistry::guest_room()).unwrap();
        assert_eq!(entity.as_str(), "cover.guest_room_blinds");
    }

    #[test]
    fn missing_blind_is_configuration_gap() {
        let err = blind_entity(&AliasRegistry::builder().build()).unwrap_err();
        assert!(matches!(err, ApiError::NotConfigured(_)));
    }
}
