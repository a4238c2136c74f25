//! In-memory [`HomeAssistant`] for tests.
//!
//! Records every call and answers with a canned reply or error, so tests can
//! assert exactly how many upstream requests a handler issued.

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Method;
use serde_json::Value;

use crate::client::{HomeAssistant, UpstreamReply};
use crate::error::{Result, UpstreamError};

/// A call captured by [`MockHomeAssistant`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedCall {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the base URL.
    pub path: String,
    /// JSON body, if any.
    pub body: Option<Value>,
}

/// Recording test double for [`HomeAssistant`].
pub struct MockHomeAssistant {
    calls: Mutex<Vec<RecordedCall>>,
    outcome: Mutex<Result<UpstreamReply>>,
}

impl Default for MockHomeAssistant {
    fn default() -> Self {
        Self::replying(200, "[]")
    }
}

impl MockHomeAssistant {
    /// A mock that answers every call with `status` and `body`.
    #[must_use]
    pub fn replying(status: u16, body: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Mutex::new(Ok(UpstreamReply {
                status,
                body: body.into(),
            })),
        }
    }

    /// A mock that fails every call with `error`.
    #[must_use]
    pub fn failing(error: UpstreamError) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            outcome: Mutex::new(Err(error)),
        }
    }

    /// Replace the canned outcome.
    pub fn set_outcome(&self, outcome: Result<UpstreamReply>) {
        *self.outcome.lock() = outcome;
    }

    /// All calls received so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().clone()
    }

    /// Number of calls received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

#[async_trait]
impl HomeAssistant for MockHomeAssistant {
    async fn call(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
    ) -> Result<UpstreamReply> {
        self.calls.lock().push(RecordedCall {
            method,
            path: path.to_string(),
            body: body.cloned(),
        });
        self.outcome.lock().clone()
    }
}
