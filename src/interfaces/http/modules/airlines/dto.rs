use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::Airline;

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct AirlineDto {
    /// IATA-style code, stored upper-case
    #[validate(length(min = 2, max = 8, message = "code must be 2-8 characters"))]
    pub code: String,
    #[validate(length(min = 1, max = 100, message = "name is required"))]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(url(message = "logo_url must be a URL"))]
    pub logo_url: Option<String>,
    /// Kiosk colours, e.g. `{"primary": "#003595"}`
    #[serde(default)]
    pub palette: BTreeMap<String, String>,
}

impl From<Airline> for AirlineDto {
    fn from(a: Airline) -> Self {
        Self {
            code: a.code,
            name: a.name,
            logo_url: a.logo_url,
            palette: a.palette,
        }
    }
}

impl AirlineDto {
    pub fn into_domain(self) -> Airline {
        let mut airline = Airline::new(self.code, self.name);
        airline.logo_url = self.logo_url;
        airline.palette = self.palette;
        airline
    }
}
