//! Session API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{SessionDto, SessionSummaryDto, StartSessionRequest};
use crate::application::KioskService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::evaluate::handlers::parse_language;

/// State shared by the session, scan and payment handlers
#[derive(Clone)]
pub struct KioskState {
    pub kiosk: Arc<KioskService>,
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions",
    tag = "Sessions",
    request_body = StartSessionRequest,
    responses(
        (status = 201, description = "Session started", body = ApiResponse<SessionDto>),
        (status = 404, description = "Unknown airline or no rules"),
        (status = 422, description = "Unsupported language")
    )
)]
pub async fn start_session(
    State(state): State<KioskState>,
    ValidatedJson(body): ValidatedJson<StartSessionRequest>,
) -> Result<(StatusCode, Json<ApiResponse<SessionDto>>), ApiError> {
    let language = parse_language(body.language.as_deref()).map_err(domain_error)?;
    let session = state
        .kiosk
        .start_session(&body.airline_code, language)
        .await
        .map_err(domain_error)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(SessionDto::from(&session))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/sessions/{id}",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session with latest scan and payments", body = ApiResponse<SessionSummaryDto>),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn get_session(
    State(state): State<KioskState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SessionSummaryDto>>, ApiError> {
    let summary = state.kiosk.summary(&id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(SessionSummaryDto::from(&summary))))
}

#[utoipa::path(
    post,
    path = "/api/v1/sessions/{id}/complete",
    tag = "Sessions",
    params(("id" = String, Path, description = "Session id")),
    responses(
        (status = 200, description = "Session completed", body = ApiResponse<SessionDto>),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Bag not compliant and not paid")
    )
)]
pub async fn complete_session(
    State(state): State<KioskState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<SessionDto>>, ApiError> {
    let session = state.kiosk.complete(&id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(SessionDto::from(&session))))
}
