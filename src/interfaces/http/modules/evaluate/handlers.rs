//! `POST /api/v1/evaluate`: the compliance engine as a single request

use axum::{extract::Query, Json};

use super::dto::{EvaluateQuery, EvaluateRequest};
use crate::domain::{evaluate as evaluate_bag, DomainError, EngineError, Language};
use crate::interfaces::http::common::{domain_error, ApiError, ApiResponse, ValidatedJson};
use crate::interfaces::http::dto::VerdictDto;

pub(crate) fn parse_language(raw: Option<&str>) -> Result<Language, DomainError> {
    raw.map(|s| s.parse().map_err(DomainError::Validation))
        .transpose()
        .map(Option::unwrap_or_default)
}

#[utoipa::path(
    post,
    path = "/api/v1/evaluate",
    tag = "Compliance",
    params(EvaluateQuery),
    request_body = EvaluateRequest,
    responses(
        (status = 200, description = "Verdict", body = ApiResponse<VerdictDto>),
        (status = 400, description = "Malformed JSON"),
        (status = 422, description = "Missing, non-numeric or negative field")
    )
)]
pub async fn evaluate(
    Query(query): Query<EvaluateQuery>,
    ValidatedJson(request): ValidatedJson<EvaluateRequest>,
) -> Result<Json<ApiResponse<VerdictDto>>, ApiError> {
    let lang = parse_language(query.language.as_deref()).map_err(domain_error)?;

    let measurement = request
        .measurement
        .ok_or(EngineError::missing("measurement"))
        .and_then(|m| m.into_domain())
        .map_err(|e| domain_error(e.into()))?;
    let profile = request
        .profile
        .ok_or(EngineError::missing("profile"))
        .and_then(|p| p.into_domain())
        .map_err(|e| domain_error(e.into()))?;

    let verdict = evaluate_bag(&measurement, &profile, request.compute_fees)
        .map_err(|e| domain_error(e.into()))?
        .localized(lang);

    Ok(Json(ApiResponse::success(VerdictDto::from_domain(&verdict, lang))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_defaults_to_spanish() {
        assert_eq!(parse_language(None).unwrap(), Language::Es);
        assert_eq!(parse_language(Some("en")).unwrap(), Language::En);
        assert!(matches!(
            parse_language(Some("de")),
            Err(DomainError::Validation(_))
        ));
    }
}
