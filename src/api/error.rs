//! Maps [`Error`] onto HTTP responses.
//!
//! Every failure is answered with `{ "message", "error" }`: a short human
//! readable summary plus the detail of the error that triggered it.

use crate::errors::Error;
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use super::types::ErrorResponse;

/// Handler error wrapper implementing [`IntoResponse`].
#[derive(Debug)]
pub struct ApiError(pub Error);

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self(value)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(Error::validation("body", rejection.body_text()))
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            Error::SettingsNotFound | Error::SectionNotFound { .. } | Error::CenterNotFound { .. } => {
                StatusCode::NOT_FOUND
            }
            Error::Validation { .. } => StatusCode::BAD_REQUEST,
            Error::Config { .. }
            | Error::Database(_)
            | Error::Serialization(_)
            | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn summary(&self) -> &'static str {
        match &self.0 {
            Error::SettingsNotFound => "Settings not found",
            Error::SectionNotFound { .. } => "Settings section not found",
            Error::CenterNotFound { .. } => "Anganwadi center not found",
            Error::Validation { .. } => "Invalid data",
            _ => "Internal server error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("Request failed: {}", self.0);
        }

        let body = ErrorResponse {
            message: self.summary().to_string(),
            error: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type returned by handlers
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError(Error::SettingsNotFound).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(Error::SectionNotFound {
                name: "billing".to_string()
            })
            .status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(Error::validation("waste", "bad")).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError(Error::Database(sea_orm::DbErr::Custom("disk full".to_string()))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
