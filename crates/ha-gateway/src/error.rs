//! API error types and responses.
//!
//! This module defines the standard error format for all API responses:
//!
//! ```text
//! { "detail": "Unknown light alias: garage", "code": "not_found" }
//! ```

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use ha_gateway_core::CoreError;
use ha_gateway_upstream::UpstreamError;

/// API error type that implements `IntoResponse`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The alias is not whitelisted.
    #[error("{0}")]
    NotFound(String),

    /// The path exists but not for this method.
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    /// The request body has the wrong shape or an out-of-range value.
    #[error("{0}")]
    Validation(String),

    /// The request body exceeds the configured size limit.
    #[error("{0}")]
    PayloadTooLarge(String),

    /// The endpoint needs an entity the deployment does not configure.
    #[error("{0}")]
    NotConfigured(String),

    /// Home Assistant answered with a non-success status.
    #[error("upstream returned HTTP {status}")]
    Upstream {
        /// Status returned by Home Assistant.
        status: u16,
        /// Raw upstream body, surfaced as the detail.
        body: String,
    },

    /// Home Assistant could not be reached.
    #[error("{0}")]
    BadGateway(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
struct ErrorResponse {
    detail: String,
    code: &'static str,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    ///
    /// Upstream statuses are mirrored; values that are not valid HTTP status
    /// codes fall back to 502.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            Self::NotConfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Get the error code string for this error.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::MethodNotAllowed => "method_not_allowed",
            Self::Validation(_) => "validation_error",
            Self::PayloadTooLarge(_) => "payload_too_large",
            Self::NotConfigured(_) => "not_configured",
            Self::Upstream { .. } => "upstream_error",
            Self::BadGateway(_) => "upstream_unreachable",
        }
    }

    /// The `detail` string returned to the client.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Upstream { body, .. } => body.clone(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            detail: self.detail(),
            code: self.code(),
        };

        (self.status_code(), Json(body)).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownAlias { domain, alias } => {
                Self::NotFound(format!("Unknown {domain} alias: {alias}"))
            }
            CoreError::OutOfRange(_) => Self::Validation(err.to_string()),
            CoreError::UnknownDomain(_)
            | CoreError::DuplicateAlias { .. }
            | CoreError::EmptyAlias
            | CoreError::InvalidEntityId(_)
            | CoreError::DomainMismatch { .. } => {
                tracing::error!(error = %err, "Alias registry error");
                Self::NotConfigured(err.to_string())
            }
        }
    }
}

impl From<UpstreamError> for ApiError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Status { status, body } => Self::Upstream { status, body },
            UpstreamError::Transport(msg) => Self::BadGateway(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            Self::PayloadTooLarge(rejection.body_text())
        } else {
            Self::Validation(rejection.body_text())
        }
    }
}

#[cfg(test)]
mod tests {
    use ha_gateway_core::Domain;

    use super::*;

    #[test]
    fn error_status_codes() {
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Validation("x".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::PayloadTooLarge("x".into()).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::NotConfigured("x".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::BadGateway("x".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn upstream_status_mirrored() {
        let err = ApiError::from(UpstreamError::Status {
            status: 401,
            body: "401: Unauthorized".into(),
        });
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.detail(), "401: Unauthorized");
        assert_eq!(err.code(), "upstream_error");
    }

    #[test]
    fn invalid_upstream_status_falls_back() {
        let err = ApiError::Upstream {
            status: 42,
            body: String::new(),
        };
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn transport_maps_to_bad_gateway() {
        let err = ApiError::from(UpstreamError::Transport("connection refused".into()));
        assert_eq!(err.status_code(), StatusCode::BAD_GATEWAY);
        assert_eq!(err.detail(), "connection refused");
    }

    #[test]
    fn core_errors_map() {
        let unknown = ApiError::from(CoreError::UnknownAlias {
            domain: Domain::Light,
            alias: "garage".into(),
        });
        assert_eq!(unknown.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(unknown.detail(), "Unknown light alias: garage");

        let range = ApiError::from(CoreError::OutOfRange(101));
        assert_eq!(range.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn error_codes() {
        assert_eq!(ApiError::NotFound("x".into()).code(), "not_found");
        assert_eq!(ApiError::Validation("x".into()).code(), "validation_error");
        assert_eq!(ApiError::MethodNotAllowed.code(), "method_not_allowed");
        assert_eq!(ApiError::PayloadTooLarge("x".into()).code(), "payload_too_large");
        assert_eq!(ApiError::BadGateway("x".into()).code(), "upstream_unreachable");
    }
}
