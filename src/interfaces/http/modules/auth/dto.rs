//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// `operator` or `admin`
    #[validate(length(min = 1, message = "role is required"))]
    pub role: String,
    #[validate(length(min = 4, max = 8, message = "PIN must be 4-8 digits"))]
    pub pin: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub role: String,
    /// RFC 3339
    pub expires_at: String,
}
