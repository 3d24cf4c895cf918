//! Measurement, limit profile and verdict DTOs
//!
//! Request-side numeric fields are optional so that an absent field is
//! reported as `InvalidInput` for that field instead of a generic JSON error.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::i18n::verdict_headline;
use crate::domain::{EngineError, FeeBreakdown, Language, LimitProfile, Measurement, Verdict};

fn required(field: &'static str, value: Option<f64>) -> Result<f64, EngineError> {
    value.ok_or(EngineError::missing(field))
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct MeasurementDto {
    pub width_cm: Option<f64>,
    pub length_cm: Option<f64>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
}

impl MeasurementDto {
    pub fn into_domain(self) -> Result<Measurement, EngineError> {
        Ok(Measurement::new(
            required("width_cm", self.width_cm)?,
            required("length_cm", self.length_cm)?,
            required("height_cm", self.height_cm)?,
            required("weight_kg", self.weight_kg)?,
        ))
    }
}

impl From<&Measurement> for MeasurementDto {
    fn from(m: &Measurement) -> Self {
        Self {
            width_cm: Some(m.width_cm),
            length_cm: Some(m.length_cm),
            height_cm: Some(m.height_cm),
            weight_kg: Some(m.weight_kg),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct LimitProfileDto {
    pub max_width_cm: Option<f64>,
    pub max_length_cm: Option<f64>,
    pub max_height_cm: Option<f64>,
    pub max_linear_cm: Option<f64>,
    pub max_weight_kg: Option<f64>,
    pub tolerance_cm: Option<f64>,
    pub overweight_fee_per_kg: Option<f64>,
    pub oversize_fee_flat: Option<f64>,
    #[validate(length(max = 8, message = "currency code is too long"))]
    pub currency: Option<String>,
}

impl LimitProfileDto {
    pub fn into_domain(self) -> Result<LimitProfile, EngineError> {
        Ok(LimitProfile {
            max_width_cm: required("max_width_cm", self.max_width_cm)?,
            max_length_cm: required("max_length_cm", self.max_length_cm)?,
            max_height_cm: required("max_height_cm", self.max_height_cm)?,
            max_linear_cm: required("max_linear_cm", self.max_linear_cm)?,
            max_weight_kg: required("max_weight_kg", self.max_weight_kg)?,
            tolerance_cm: required("tolerance_cm", self.tolerance_cm)?,
            overweight_fee_per_kg: required("overweight_fee_per_kg", self.overweight_fee_per_kg)?,
            oversize_fee_flat: required("oversize_fee_flat", self.oversize_fee_flat)?,
            currency: self.currency.ok_or(EngineError::missing("currency"))?,
        })
    }
}

impl From<&LimitProfile> for LimitProfileDto {
    fn from(p: &LimitProfile) -> Self {
        Self {
            max_width_cm: Some(p.max_width_cm),
            max_length_cm: Some(p.max_length_cm),
            max_height_cm: Some(p.max_height_cm),
            max_linear_cm: Some(p.max_linear_cm),
            max_weight_kg: Some(p.max_weight_kg),
            tolerance_cm: Some(p.tolerance_cm),
            overweight_fee_per_kg: Some(p.overweight_fee_per_kg),
            oversize_fee_flat: Some(p.oversize_fee_flat),
            currency: Some(p.currency.clone()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ViolationDto {
    /// `WIDTH`, `LENGTH`, `HEIGHT`, `LINEAR_SUM` or `WEIGHT`
    pub code: String,
    /// Exact excess in cm or kg
    pub excess: f64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeesDto {
    pub oversize_fee: f64,
    pub overweight_fee: f64,
    pub total: f64,
    pub currency: String,
    /// Display string, e.g. `75.00 USD`
    pub formatted_total: String,
}

impl From<&FeeBreakdown> for FeesDto {
    fn from(f: &FeeBreakdown) -> Self {
        Self {
            oversize_fee: f.oversize_fee,
            overweight_fee: f.overweight_fee,
            total: f.total,
            currency: f.currency.clone(),
            formatted_total: f.format_total(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerdictDto {
    pub compliant: bool,
    /// `AUTORIZADO` / `NO CUMPLE` or `AUTHORIZED` / `NOT ALLOWED`
    pub headline: String,
    pub violations: Vec<ViolationDto>,
    /// Omitted when compliant or when fees were not requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees: Option<FeesDto>,
}

impl VerdictDto {
    /// `verdict` messages are expected to be rendered in `lang` already.
    pub fn from_domain(verdict: &Verdict, lang: Language) -> Self {
        Self {
            compliant: verdict.compliant,
            headline: verdict_headline(verdict.compliant, lang).to_string(),
            violations: verdict
                .violations
                .iter()
                .map(|v| ViolationDto {
                    code: v.code.as_str().to_string(),
                    excess: v.excess,
                    message: v.message.clone(),
                })
                .collect(),
            fees: verdict.fees.as_ref().map(FeesDto::from),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::evaluate;

    #[test]
    fn missing_measurement_field_names_the_field() {
        let dto = MeasurementDto {
            width_cm: Some(30.0),
            length_cm: None,
            height_cm: Some(20.0),
            weight_kg: Some(8.0),
        };
        assert_eq!(dto.into_domain().unwrap_err().field(), "length_cm");
    }

    #[test]
    fn profile_round_trips_through_dto() {
        let profile = LimitProfile::default();
        let back = LimitProfileDto::from(&profile).into_domain().unwrap();
        assert_eq!(back, profile);
    }

    #[test]
    fn missing_currency_is_invalid_input() {
        let mut dto = LimitProfileDto::from(&LimitProfile::default());
        dto.currency = None;
        assert_eq!(dto.into_domain().unwrap_err().field(), "currency");
    }

    #[test]
    fn verdict_dto_omits_fees_when_compliant() {
        let verdict = evaluate(
            &Measurement::new(30.0, 50.0, 20.0, 8.0),
            &LimitProfile::default(),
            true,
        )
        .unwrap();
        let json = serde_json::to_value(VerdictDto::from_domain(&verdict, Language::Es)).unwrap();
        assert_eq!(json["headline"], "AUTORIZADO");
        assert!(json.get("fees").is_none());
    }

    #[test]
    fn verdict_dto_formats_total() {
        let verdict = evaluate(
            &Measurement::new(40.0, 60.0, 30.0, 13.0),
            &LimitProfile::default(),
            true,
        )
        .unwrap();
        let dto = VerdictDto::from_domain(&verdict, Language::En);
        assert_eq!(dto.headline, "NOT ALLOWED");
        assert_eq!(dto.violations.len(), 5);
        assert_eq!(dto.violations[3].code, "LINEAR_SUM");
        assert_eq!(dto.fees.unwrap().formatted_total, "75.00 USD");
    }
}
