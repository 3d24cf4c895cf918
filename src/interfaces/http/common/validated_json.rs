//! Validated JSON extractor for Axum
//!
//! `ValidatedJson<T>` works like `axum::Json<T>`, but additionally runs
//! `validator::Validate::validate()` on the deserialized value.
//!
//! - body is not JSON at all → 400
//! - JSON with wrong field types → 422
//! - validation rules fail → 422 with field-level details

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::de::DeserializeOwned;
use validator::Validate;

use super::ApiResponse;

/// An extractor that deserializes JSON and validates it.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct LoginRequest {
///     #[validate(length(min = 4, max = 8))]
///     pin: String,
/// }
///
/// async fn handler(ValidatedJson(body): ValidatedJson<LoginRequest>) {
///     // `body` is guaranteed to pass validation
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

pub enum ValidatedJsonRejection {
    JsonError(JsonRejection),
    ValidationError(validator::ValidationErrors),
}

impl IntoResponse for ValidatedJsonRejection {
    fn into_response(self) -> Response {
        match self {
            Self::JsonError(rejection) => {
                let status = match rejection {
                    JsonRejection::JsonDataError(_) => StatusCode::UNPROCESSABLE_ENTITY,
                    _ => StatusCode::BAD_REQUEST,
                };
                let body = ApiResponse::<()>::error(format!("Invalid JSON: {}", rejection.body_text()));
                (status, Json(body)).into_response()
            }
            Self::ValidationError(errors) => {
                let mut field_errors: Vec<String> = errors
                    .field_errors()
                    .iter()
                    .flat_map(|(field, errs)| {
                        errs.iter().map(move |e| {
                            let msg = e
                                .message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string());
                            format!("{}: {}", field, msg)
                        })
                    })
                    .collect();
                field_errors.sort();

                let message = if field_errors.is_empty() {
                    "Validation failed".to_string()
                } else {
                    field_errors.join("; ")
                };

                let body = ApiResponse::<()>::error(message);
                (StatusCode::UNPROCESSABLE_ENTITY, Json(body)).into_response()
            }
        }
    }
}

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidatedJsonRejection;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(ValidatedJsonRejection::JsonError)?;

        value
            .validate()
            .map_err(ValidatedJsonRejection::ValidationError)?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::routing::post;
    use axum::Router;
    use serde::Deserialize;
    use tower::ServiceExt;

    #[derive(Debug, Deserialize, Validate)]
    struct PinBody {
        #[validate(length(min = 4, max = 8, message = "PIN must be 4-8 digits"))]
        pin: String,
        #[validate(range(min = 0.0, max = 100.0))]
        weight_kg: f64,
    }

    async fn handler(ValidatedJson(_body): ValidatedJson<PinBody>) -> &'static str {
        "ok"
    }

    async fn send(body: &'static str) -> StatusCode {
        let req = Request::builder()
            .method("POST")
            .uri("/test")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        Router::new()
            .route("/test", post(handler))
            .oneshot(req)
            .await
            .unwrap()
            .status()
    }

    #[tokio::test]
    async fn valid_body_returns_ok() {
        assert_eq!(send(r#"{"pin": "1234", "weight_kg": 8.5}"#).await, StatusCode::OK);
    }

    #[tokio::test]
    async fn invalid_json_returns_400() {
        assert_eq!(send("not json").await, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn wrong_field_type_returns_422() {
        assert_eq!(
            send(r#"{"pin": "1234", "weight_kg": "heavy"}"#).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }

    #[tokio::test]
    async fn validation_failure_returns_422() {
        assert_eq!(
            send(r#"{"pin": "12", "weight_kg": 8.5}"#).await,
            StatusCode::UNPROCESSABLE_ENTITY
        );
    }
}
