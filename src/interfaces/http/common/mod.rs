//! Response envelope and error mapping shared by all handlers

mod validated_json;

use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::domain::DomainError;

pub use validated_json::{ValidatedJson, ValidatedJsonRejection};

/// Standard API response wrapper.
///
/// Success: `{"success": true, "data": {...}}`,
/// failure: `{"success": false, "error": "..."}`.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

pub fn error_status(error: &DomainError) -> StatusCode {
    match error {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Validation(_) | DomainError::InvalidInput(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        DomainError::InvalidState(_) | DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
        DomainError::Forbidden(_) => StatusCode::FORBIDDEN,
        DomainError::Device(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Map a domain error onto its HTTP status and envelope.
pub fn domain_error(error: DomainError) -> ApiError {
    let status = error_status(&error);
    if status.is_server_error() {
        warn!(error = %error, "Request failed");
    }
    (status, Json(ApiResponse::error(error.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EngineError;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (
                DomainError::NotFound {
                    entity: "Session",
                    field: "id",
                    value: "x".into(),
                },
                StatusCode::NOT_FOUND,
            ),
            (
                EngineError::missing("width_cm").into(),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (DomainError::Validation("bad".into()), StatusCode::UNPROCESSABLE_ENTITY),
            (DomainError::InvalidState("done".into()), StatusCode::CONFLICT),
            (DomainError::Unauthorized("no".into()), StatusCode::UNAUTHORIZED),
            (DomainError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (DomainError::Device("down".into()), StatusCode::SERVICE_UNAVAILABLE),
        ];
        for (error, status) in cases {
            assert_eq!(error_status(&error), status, "{}", error);
        }
    }

    #[test]
    fn envelope_carries_message() {
        let (status, Json(body)) = domain_error(DomainError::InvalidState("closed".into()));
        assert_eq!(status, StatusCode::CONFLICT);
        assert!(!body.success);
        assert_eq!(body.error.as_deref(), Some("Invalid state: closed"));
    }
}
