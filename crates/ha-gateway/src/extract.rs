//! Request extractors.

use axum::extract::FromRequest;

use crate::error::ApiError;

/// JSON body extractor whose rejections use the gateway error format.
///
/// Malformed JSON, a missing `Content-Type` and wrong field types all become
/// [`ApiError::Validation`] (422). A body over the size limit becomes
/// [`ApiError::PayloadTooLarge`] (413).
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);
