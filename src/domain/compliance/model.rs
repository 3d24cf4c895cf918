//! Compliance value types: limits, measurements and verdicts

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::i18n::{violation_message, Language};
use crate::support::errors::EngineError;

/// Compliance envelope for one airline / bag class.
///
/// The three per-axis maxima and `max_linear_cm` are independent: a bag can
/// pass every axis and still fail the linear sum, or the other way round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LimitProfile {
    pub max_width_cm: f64,
    pub max_length_cm: f64,
    pub max_height_cm: f64,
    /// Ceiling on `width + length + height`
    pub max_linear_cm: f64,
    pub max_weight_kg: f64,
    /// Grace margin on each single-axis check
    pub tolerance_cm: f64,
    pub overweight_fee_per_kg: f64,
    pub oversize_fee_flat: f64,
    /// Currency code (ISO 4217), display only
    pub currency: String,
}

impl LimitProfile {
    /// Check every numeric field is finite and non-negative.
    pub fn validate(&self) -> Result<(), EngineError> {
        non_negative("max_width_cm", self.max_width_cm)?;
        non_negative("max_length_cm", self.max_length_cm)?;
        non_negative("max_height_cm", self.max_height_cm)?;
        non_negative("max_linear_cm", self.max_linear_cm)?;
        non_negative("max_weight_kg", self.max_weight_kg)?;
        non_negative("tolerance_cm", self.tolerance_cm)?;
        non_negative("overweight_fee_per_kg", self.overweight_fee_per_kg)?;
        non_negative("oversize_fee_flat", self.oversize_fee_flat)?;
        Ok(())
    }
}

impl Default for LimitProfile {
    fn default() -> Self {
        Self {
            max_width_cm: 35.0,
            max_length_cm: 55.0,
            max_height_cm: 25.0,
            max_linear_cm: 115.0,
            max_weight_kg: 10.0,
            tolerance_cm: 1.0,
            overweight_fee_per_kg: 15.0,
            oversize_fee_flat: 30.0,
            currency: "USD".to_string(),
        }
    }
}

/// One candidate bag reading
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurement {
    pub width_cm: f64,
    pub length_cm: f64,
    pub height_cm: f64,
    pub weight_kg: f64,
}

impl Measurement {
    pub fn new(width_cm: f64, length_cm: f64, height_cm: f64, weight_kg: f64) -> Self {
        Self {
            width_cm,
            length_cm,
            height_cm,
            weight_kg,
        }
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        non_negative("width_cm", self.width_cm)?;
        non_negative("length_cm", self.length_cm)?;
        non_negative("height_cm", self.height_cm)?;
        non_negative("weight_kg", self.weight_kg)?;
        Ok(())
    }

    pub fn linear_sum(&self) -> f64 {
        self.width_cm + self.length_cm + self.height_cm
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), EngineError> {
    if !value.is_finite() {
        return Err(EngineError::InvalidInput {
            field,
            reason: "must be a finite number",
        });
    }
    if value < 0.0 {
        return Err(EngineError::InvalidInput {
            field,
            reason: "must not be negative",
        });
    }
    Ok(())
}

/// Rule that a measurement breached.
///
/// Declaration order is the reporting order of a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ViolationCode {
    Width,
    Length,
    Height,
    LinearSum,
    Weight,
}

impl ViolationCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Width => "WIDTH",
            Self::Length => "LENGTH",
            Self::Height => "HEIGHT",
            Self::LinearSum => "LINEAR_SUM",
            Self::Weight => "WEIGHT",
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Weight => "kg",
            _ => "cm",
        }
    }

    /// Dimension rules share the flat oversize fee.
    pub fn is_oversize(&self) -> bool {
        !matches!(self, Self::Weight)
    }
}

impl fmt::Display for ViolationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Violation {
    pub code: ViolationCode,
    /// Exact amount over the limit, in cm or kg
    pub excess: f64,
    pub message: String,
}

impl Violation {
    pub fn new(code: ViolationCode, excess: f64, lang: Language) -> Self {
        Self {
            code,
            excess,
            message: violation_message(code, excess, lang),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeeBreakdown {
    pub oversize_fee: f64,
    pub overweight_fee: f64,
    pub total: f64,
    pub currency: String,
}

impl FeeBreakdown {
    pub fn format_total(&self) -> String {
        format!("{:.2} {}", self.total, self.currency)
    }
}

/// Result of one evaluation
#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    pub compliant: bool,
    pub violations: Vec<Violation>,
    /// Absent when compliant or when fees were not requested
    pub fees: Option<FeeBreakdown>,
}

impl Verdict {
    /// Re-render violation messages; codes and magnitudes are untouched.
    pub fn localized(mut self, lang: Language) -> Self {
        for v in &mut self.violations {
            v.message = violation_message(v.code, v.excess, lang);
        }
        self
    }

    pub fn excess_of(&self, code: ViolationCode) -> f64 {
        self.violations
            .iter()
            .find(|v| v.code == code)
            .map(|v| v.excess)
            .unwrap_or(0.0)
    }

    pub fn codes(&self) -> Vec<ViolationCode> {
        self.violations.iter().map(|v| v.code).collect()
    }
}
