//! Upstream connectivity check.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use ha_gateway_upstream::HomeAssistant;

use crate::error::ApiError;
use crate::state::GatewayState;

/// Call the Home Assistant API root and return its body verbatim.
///
/// # Errors
///
/// Mirrors the upstream status on a non-2xx reply; 502 if Home Assistant is
/// unreachable.
pub async fn ha_test<H>(
    State(state): State<Arc<GatewayState<H>>>,
) -> Result<impl IntoResponse, ApiError>
where
    H: HomeAssistant + 'static,
{
    let reply = state.upstream.api_root().await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], reply.body))
}
