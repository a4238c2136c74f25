//! Upstream call errors.

use thiserror::Error;

/// A result type using `UpstreamError`.
pub type Result<T> = std::result::Result<T, UpstreamError>;

/// Failure of a single call to Home Assistant.
///
/// These are the only two outcomes besides success; the gateway maps them to
/// client-facing statuses.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// Home Assistant answered with a non-2xx status.
    #[error("upstream returned HTTP {status}")]
    Status {
        /// Status code returned by Home Assistant.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// No response was obtained (DNS, connection refused, timeout).
    #[error("upstream request failed: {0}")]
    Transport(String),
}

impl UpstreamError {
    /// Build a transport error from a reqwest error, keeping the source chain.
    pub(crate) fn transport(err: &reqwest::Error) -> Self {
        let mut message = err.to_string();
        let mut source = std::error::Error::source(err);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = std::error::Error::source(cause);
        }
        Self::Transport(message)
    }

    /// Returns `true` if no response was obtained.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = UpstreamError::Status {
            status: 401,
            body: "401: Unauthorized".to_string(),
        };
        assert_eq!(err.to_string(), "upstream returned HTTP 401");
        assert!(!err.is_transport());
    }

    #[test]
    fn transport_error_display() {
        let err = UpstreamError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "upstream request failed: connection refused");
        assert!(err.is_transport());
    }
}
