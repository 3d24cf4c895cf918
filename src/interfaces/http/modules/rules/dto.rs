use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::RuleSet;
use crate::interfaces::http::dto::LimitProfileDto;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RuleSetDto {
    pub id: String,
    pub airline_code: String,
    pub bag_class: String,
    pub profile: LimitProfileDto,
    pub updated_at: String,
}

impl From<RuleSet> for RuleSetDto {
    fn from(r: RuleSet) -> Self {
        Self {
            profile: LimitProfileDto::from(&r.profile),
            id: r.id,
            airline_code: r.airline_code,
            bag_class: r.bag_class.as_str().to_string(),
            updated_at: r.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpsertRulesRequest {
    #[validate(length(min = 1, message = "airline_code is required"))]
    pub airline_code: String,
    /// `cabin` (default) or `handbag`
    pub bag_class: Option<String>,
    #[validate(nested)]
    pub profile: LimitProfileDto,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct RulesQuery {
    /// `cabin` (default) or `handbag`
    pub bag_class: Option<String>,
}
