//! Airline API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::dto::AirlineDto;
use crate::application::ProfileService;
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct AirlineState {
    pub profiles: Arc<ProfileService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/airlines",
    tag = "Airlines",
    responses(
        (status = 200, description = "All airlines, by code", body = ApiResponse<Vec<AirlineDto>>)
    )
)]
pub async fn list_airlines(
    State(state): State<AirlineState>,
) -> Result<Json<ApiResponse<Vec<AirlineDto>>>, ApiError> {
    let airlines = state.profiles.list_airlines().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        airlines.into_iter().map(AirlineDto::from).collect(),
    )))
}

#[utoipa::path(
    get,
    path = "/api/v1/airlines/{code}",
    tag = "Airlines",
    params(("code" = String, Path, description = "Airline code")),
    responses(
        (status = 200, description = "Airline", body = ApiResponse<AirlineDto>),
        (status = 404, description = "Unknown airline")
    )
)]
pub async fn get_airline(
    State(state): State<AirlineState>,
    Path(code): Path<String>,
) -> Result<Json<ApiResponse<AirlineDto>>, ApiError> {
    let airline = state.profiles.get_airline(&code).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(airline.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/airlines",
    tag = "Airlines",
    request_body = AirlineDto,
    responses(
        (status = 200, description = "Airline saved", body = ApiResponse<AirlineDto>),
        (status = 401, description = "Not logged in"),
        (status = 422, description = "Validation error")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upsert_airline(
    State(state): State<AirlineState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(body): ValidatedJson<AirlineDto>,
) -> Result<Json<ApiResponse<AirlineDto>>, ApiError> {
    tracing::debug!(role = %user.role, code = %body.code, "Airline upsert");
    let saved = state
        .profiles
        .upsert_airline(body.into_domain())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(saved.into())))
}
