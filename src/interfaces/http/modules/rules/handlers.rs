//! Rule-set API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use super::dto::{RuleSetDto, RulesQuery, UpsertRulesRequest};
use crate::application::ProfileService;
use crate::domain::{BagClass, DomainError};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct RulesState {
    pub profiles: Arc<ProfileService>,
}

pub(crate) fn parse_bag_class(raw: Option<&str>) -> Result<BagClass, DomainError> {
    raw.map(str::parse).transpose().map(Option::unwrap_or_default)
}

#[utoipa::path(
    get,
    path = "/api/v1/rules/{airline_code}",
    tag = "Rules",
    params(
        ("airline_code" = String, Path, description = "Airline code"),
        RulesQuery
    ),
    responses(
        (status = 200, description = "Rule set", body = ApiResponse<RuleSetDto>),
        (status = 404, description = "No rules for this airline / bag class")
    )
)]
pub async fn get_rules(
    State(state): State<RulesState>,
    Path(airline_code): Path<String>,
    Query(query): Query<RulesQuery>,
) -> Result<Json<ApiResponse<RuleSetDto>>, ApiError> {
    let bag_class = parse_bag_class(query.bag_class.as_deref()).map_err(domain_error)?;
    let rules = state
        .profiles
        .get_rules(&airline_code, bag_class)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(rules.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/rules",
    tag = "Rules",
    request_body = UpsertRulesRequest,
    responses(
        (status = 200, description = "Rule set saved", body = ApiResponse<RuleSetDto>),
        (status = 401, description = "Not logged in"),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Unknown airline"),
        (status = 422, description = "Invalid limits")
    ),
    security(("bearer_auth" = []))
)]
pub async fn upsert_rules(
    State(state): State<RulesState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(body): ValidatedJson<UpsertRulesRequest>,
) -> Result<Json<ApiResponse<RuleSetDto>>, ApiError> {
    user.require_admin().map_err(domain_error)?;

    let bag_class = parse_bag_class(body.bag_class.as_deref()).map_err(domain_error)?;
    let profile = body
        .profile
        .into_domain()
        .map_err(|e| domain_error(e.into()))?;

    let saved = state
        .profiles
        .upsert_rules(&body.airline_code, bag_class, profile)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(saved.into())))
}
