//! Authentication middleware for Axum
//!
//! Operator and admin tokens come from `POST /api/v1/auth/login`. Handlers
//! behind [`auth_middleware`] read the caller from
//! `Extension<AuthenticatedUser>` and check the role themselves.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{PinAuthenticator, Role};
use crate::domain::{DomainError, DomainResult};
use crate::interfaces::http::common::ApiResponse;

#[derive(Debug)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
}

#[derive(Clone)]
pub struct AuthState {
    pub authenticator: Arc<PinAuthenticator>,
}

#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub subject: String,
    pub role: Role,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Fail with `Forbidden` unless the caller is an admin.
    pub fn require_admin(&self) -> DomainResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Forbidden(format!(
                "role '{}' cannot change rules",
                self.role
            )))
        }
    }
}

fn extract_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Bearer JWT authentication middleware
pub async fn auth_middleware(
    State(auth_state): State<AuthState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .map(String::from);
    let Some(auth_header) = token else {
        return auth_error_response(AuthError::MissingToken);
    };
    let Some(token) = extract_token(&auth_header) else {
        return auth_error_response(AuthError::InvalidToken);
    };

    match auth_state.authenticator.authorize(token) {
        Ok((role, claims)) => {
            if claims.is_expired() {
                return auth_error_response(AuthError::ExpiredToken);
            }
            request.extensions_mut().insert(AuthenticatedUser {
                subject: claims.sub,
                role,
            });
            next.run(request).await
        }
        Err(_) => auth_error_response(AuthError::InvalidToken),
    }
}

fn auth_error_response(error: AuthError) -> Response {
    let message = match error {
        AuthError::MissingToken => "Missing authentication token",
        AuthError::InvalidToken => "Invalid authentication token",
        AuthError::ExpiredToken => "Token has expired",
    };

    (
        StatusCode::UNAUTHORIZED,
        Json(ApiResponse::<()>::error(message)),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bearer_prefix_is_required() {
        assert_eq!(extract_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_token("Basic abc"), None);
        assert_eq!(extract_token("Bearer   "), None);
    }

    #[test]
    fn only_admin_passes_admin_check() {
        let operator = AuthenticatedUser {
            subject: "operator".into(),
            role: Role::Operator,
        };
        assert!(matches!(
            operator.require_admin(),
            Err(DomainError::Forbidden(_))
        ));
        let admin = AuthenticatedUser {
            subject: "admin".into(),
            role: Role::Admin,
        };
        assert!(admin.require_admin().is_ok());
    }
}
