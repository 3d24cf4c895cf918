//! Authentication API handlers

use std::sync::Arc;

use axum::{extract::State, Json};

use super::dto::{LoginRequest, LoginResponse};
use crate::application::{PinAuthenticator, Role};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};

#[derive(Clone)]
pub struct AuthHandlerState {
    pub authenticator: Arc<PinAuthenticator>,
}

#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    tag = "Authentication",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Successful login", body = ApiResponse<LoginResponse>),
        (status = 401, description = "Invalid PIN"),
        (status = 422, description = "Unknown role or malformed PIN")
    )
)]
pub async fn login(
    State(state): State<AuthHandlerState>,
    ValidatedJson(request): ValidatedJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>, ApiError> {
    let role: Role = request.role.parse().map_err(domain_error)?;
    let result = state
        .authenticator
        .login(role, &request.pin)
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(LoginResponse {
        token: result.token,
        token_type: "Bearer".to_string(),
        role: result.role.as_str().to_string(),
        expires_at: result.expires_at.to_rfc3339(),
    })))
}
