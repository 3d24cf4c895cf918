use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::interfaces::http::dto::{LimitProfileDto, MeasurementDto};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct EvaluateRequest {
    #[validate(nested)]
    pub measurement: Option<MeasurementDto>,
    #[validate(nested)]
    pub profile: Option<LimitProfileDto>,
    /// Defaults to `false`
    #[serde(default)]
    pub compute_fees: bool,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct EvaluateQuery {
    /// `es` (default) or `en`
    pub language: Option<String>,
}
