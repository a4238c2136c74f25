//! Light endpoints and alias discovery.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};

use ha_gateway_core::{Alias, Domain};
use ha_gateway_upstream::{HomeAssistant, Service, ServiceCall};

use crate::error::ApiError;
use crate::extract::ApiJson;
use crate::state::GatewayState;

// =============================================================================
// Request/Response Types
// =============================================================================

/// Request to switch a light.
#[derive(Debug, Deserialize)]
pub struct LightCommand {
    /// Desired state.
    pub on: bool,
}

/// Response for a light command.
#[derive(Debug, Serialize)]
pub struct LightResponse {
    /// Alias from the request path.
    pub alias: String,
    /// Entity the alias resolved to.
    pub entity_id: String,
    /// State that was requested.
    pub on: bool,
    /// Always `"ok"`.
    pub result: &'static str,
}

/// Response listing the aliases of one domain.
#[derive(Debug, Serialize)]
pub struct AliasListResponse {
    /// Aliases in lexicographic order.
    pub aliases: Vec<String>,
}

impl AliasListResponse {
    fn for_domain<H: HomeAssistant>(state: &GatewayState<H>, domain: Domain) -> Self {
        Self {
            aliases: state
                .registry
                .list_aliases(domain)
                .map(Alias::to_string)
                .collect(),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// List all light aliases.
pub async fn list_lights<H>(State(state): State<Arc<GatewayState<H>>>) -> impl IntoResponse
where
    H: HomeAssistant + 'static,
{
    Json(AliasListResponse::for_domain(&state, Domain::Light))
}

/// List all cover aliases.
pub async fn list_covers<H>(State(state): State<Arc<GatewayState<H>>>) -> impl IntoResponse
where
    H: HomeAssistant + 'static,
{
    Json(AliasListResponse::for_domain(&state, Domain::Cover))
}

/// Switch a whitelisted light on or off.
///
/// # Errors
///
/// Returns an error if:
/// - The body is not `{"on": bool}` (422)
/// - The alias is not whitelisted (404)
/// - Home Assistant rejects the call or cannot be reached
pub async fn set_light<H>(
    State(state): State<Arc<GatewayState<H>>>,
    Path(alias): Path<String>,
    ApiJson(command): ApiJson<LightCommand>,
) -> Result<impl IntoResponse, ApiError>
where
    H: HomeAssistant + 'static,
{
    let entity_id = state.registry.resolve(Domain::Light, &alias)?.clone();

    let call = ServiceCall::new(Service::for_light(command.on), entity_id);
    state.upstream.call_service(&call).await?;

    tracing::info!(
        alias = %alias,
        entity_id = %call.entity_id(),
        on = command.on,
        "Light switched"
    );

    Ok(Json(LightResponse {
        alias,
        entity_id: call.entity_id().to_string(),
        on: command.on,
        result: "ok",
    }))
}
