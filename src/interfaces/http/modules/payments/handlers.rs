//! Payment API handler

use axum::{extract::State, http::StatusCode, Json};

use super::dto::{PaymentRequest, PaymentResultDto};
use crate::application::PaymentRequest as PaymentCommand;
use crate::domain::PaymentMethod;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::sessions::{KioskState, PaymentDto, SessionDto};

/// A rejected charge is still a recorded payment: it returns 201 with
/// `status = "rejected"` and the session in `payment_rejected`.
#[utoipa::path(
    post,
    path = "/api/v1/payments",
    tag = "Payments",
    request_body = PaymentRequest,
    responses(
        (status = 201, description = "Charge attempted", body = ApiResponse<PaymentResultDto>),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Nothing to pay in the current state"),
        (status = 422, description = "Unknown method or amount mismatch"),
        (status = 503, description = "Payment terminal failed")
    )
)]
pub async fn create_payment(
    State(state): State<KioskState>,
    ValidatedJson(body): ValidatedJson<PaymentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PaymentResultDto>>), ApiError> {
    let method: PaymentMethod = body.method.parse().map_err(domain_error)?;

    let (payment, session) = state
        .kiosk
        .pay(PaymentCommand {
            session_id: body.session_id,
            method,
            amount: body.amount,
        })
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(PaymentResultDto {
            payment: PaymentDto::from(&payment),
            session: SessionDto::from(&session),
        })),
    ))
}
