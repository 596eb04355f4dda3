use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

/// Application-specific error types.
///
/// A closed taxonomy: every failure a caller can observe maps to exactly
/// one of these variants, and each variant carries a stable wire code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// Malformed or missing required input.
    InvalidArgument(String),
    /// Missing server-side configuration (e.g. the upstream API key).
    FailedPrecondition(String),
    /// No caller identity was supplied.
    Unauthenticated(String),
    /// Caller identity does not match the required identity.
    PermissionDenied(String),
    /// Upstream failure, or upstream succeeded but returned unusable data.
    Internal(String),
}

impl AppError {
    /// Stable error code exposed to clients.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidArgument(_) => "invalid-argument",
            AppError::FailedPrecondition(_) => "failed-precondition",
            AppError::Unauthenticated(_) => "unauthenticated",
            AppError::PermissionDenied(_) => "permission-denied",
            AppError::Internal(_) => "internal",
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            AppError::FailedPrecondition(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            AppError::PermissionDenied(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    /// Formats the error for display.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidArgument(msg) => write!(f, "Invalid argument: {}", msg),
            AppError::FailedPrecondition(msg) => write!(f, "Failed precondition: {}", msg),
            AppError::Unauthenticated(msg) => write!(f, "Unauthenticated: {}", msg),
            AppError::PermissionDenied(msg) => write!(f, "Permission denied: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl IntoResponse for AppError {
    /// Converts the error into an HTTP response.
    ///
    /// Maps each variant to its HTTP status code and a JSON body carrying
    /// the wire code. Server-side failures are logged here; caller
    /// mistakes are not.
    fn into_response(self) -> Response {
        match &self {
            AppError::FailedPrecondition(msg) => {
                tracing::error!("Failed precondition: {}", msg);
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
            }
            AppError::Unauthenticated(msg) => {
                tracing::warn!("Unauthenticated request: {}", msg);
            }
            AppError::PermissionDenied(msg) => {
                tracing::warn!("Permission denied: {}", msg);
            }
            AppError::InvalidArgument(_) => {}
        }

        let message = match &self {
            AppError::InvalidArgument(msg)
            | AppError::FailedPrecondition(msg)
            | AppError::Unauthenticated(msg)
            | AppError::PermissionDenied(msg)
            | AppError::Internal(msg) => msg.clone(),
        };

        let body = Json(json!({
            "error": {
                "code": self.code(),
                "message": message,
            }
        }));

        (self.status(), body).into_response()
    }
}

impl From<reqwest::Error> for AppError {
    /// Converts a `reqwest::Error` into an `AppError`.
    fn from(err: reqwest::Error) -> Self {
        AppError::Internal(format!("Upstream request failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_codes_are_stable() {
        assert_eq!(
            AppError::InvalidArgument(String::new()).code(),
            "invalid-argument"
        );
        assert_eq!(
            AppError::FailedPrecondition(String::new()).code(),
            "failed-precondition"
        );
        assert_eq!(
            AppError::Unauthenticated(String::new()).code(),
            "unauthenticated"
        );
        assert_eq!(
            AppError::PermissionDenied(String::new()).code(),
            "permission-denied"
        );
        assert_eq!(AppError::Internal(String::new()).code(), "internal");
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            AppError::InvalidArgument("x".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Unauthenticated("x".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::PermissionDenied("x".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::Internal("x".into()).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
