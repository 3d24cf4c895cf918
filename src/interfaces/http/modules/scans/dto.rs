use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::interfaces::http::dto::MeasurementDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ScanRequest {
    #[validate(length(min = 1, message = "session_id is required"))]
    pub session_id: String,
    /// `cabin` (default) or `handbag`
    pub bag_class: Option<String>,
    /// Operator-entered weight; replaces the scale reading
    pub weight_kg: Option<f64>,
    /// Manual reading; skips the camera and scale entirely
    #[validate(nested)]
    pub measurement: Option<MeasurementDto>,
}
