//! Scan API handler

use axum::{extract::State, http::StatusCode, Json};

use super::dto::ScanRequest;
use crate::application::ScanRequest as ScanCommand;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::rules::handlers::parse_bag_class;
use crate::interfaces::http::modules::sessions::{KioskState, ScanDto};

#[utoipa::path(
    post,
    path = "/api/v1/scans",
    tag = "Scans",
    request_body = ScanRequest,
    responses(
        (status = 201, description = "Bag measured and evaluated", body = ApiResponse<ScanDto>),
        (status = 404, description = "Unknown session or no rules for bag class"),
        (status = 409, description = "Session already completed"),
        (status = 422, description = "Invalid measurement"),
        (status = 503, description = "Measurement device failed")
    )
)]
pub async fn create_scan(
    State(state): State<KioskState>,
    ValidatedJson(body): ValidatedJson<ScanRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ScanDto>>), ApiError> {
    let bag_class = parse_bag_class(body.bag_class.as_deref()).map_err(domain_error)?;
    let measurement = body
        .measurement
        .map(|m| m.into_domain())
        .transpose()
        .map_err(|e| domain_error(e.into()))?;

    let (scan, session) = state
        .kiosk
        .scan(ScanCommand {
            session_id: body.session_id,
            bag_class,
            weight_kg: body.weight_kg,
            measurement,
        })
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(ScanDto::from_domain(&scan, &session))),
    ))
}
