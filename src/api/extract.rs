//! Request extractors.
//!
//! [`JsonBody`] wraps `axum::Json` so that malformed or mistyped bodies are
//! answered through [`ApiError`] (400 with `{message, error}`) instead of
//! axum's plain-text rejection.

use axum::extract::FromRequest;

use super::error::ApiError;

/// JSON request body whose rejection is an [`ApiError`].
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonBody<T>(pub T);
