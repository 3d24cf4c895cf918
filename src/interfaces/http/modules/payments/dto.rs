use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::interfaces::http::modules::sessions::{PaymentDto, SessionDto};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct PaymentRequest {
    #[validate(length(min = 1, message = "session_id is required"))]
    pub session_id: String,
    /// `card`, `cash` or `qr`
    pub method: String,
    /// Amount shown to the passenger; must match the fee due
    #[validate(range(min = 0.0, message = "amount must not be negative"))]
    pub amount: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentResultDto {
    pub payment: PaymentDto,
    pub session: SessionDto,
}
