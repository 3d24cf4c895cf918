//! Rule set domain entity

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::compliance::LimitProfile;
use crate::domain::DomainResult;
use crate::support::errors::DomainError;

/// Bag class a rule set applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BagClass {
    /// Overhead-bin carry-on
    #[default]
    Cabin,
    /// Personal item under the seat
    Handbag,
}

impl BagClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cabin => "cabin",
            Self::Handbag => "handbag",
        }
    }
}

impl fmt::Display for BagClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BagClass {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cabin" => Ok(Self::Cabin),
            "handbag" => Ok(Self::Handbag),
            other => Err(DomainError::Validation(format!(
                "unknown bag class '{}'",
                other
            ))),
        }
    }
}

/// Configured limits for one airline / bag class
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    pub id: String,
    pub airline_code: String,
    pub bag_class: BagClass,
    pub profile: LimitProfile,
    pub updated_at: DateTime<Utc>,
}

impl RuleSet {
    pub fn new(airline_code: impl Into<String>, bag_class: BagClass, profile: LimitProfile) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            airline_code: airline_code.into(),
            bag_class,
            profile,
            updated_at: Utc::now(),
        }
    }

    /// Stricter than the engine's own check: stored limits must be usable.
    pub fn validate(&self) -> DomainResult<()> {
        self.profile.validate()?;

        let p = &self.profile;
        let maxima = [
            ("max_width_cm", p.max_width_cm),
            ("max_length_cm", p.max_length_cm),
            ("max_height_cm", p.max_height_cm),
            ("max_linear_cm", p.max_linear_cm),
            ("max_weight_kg", p.max_weight_kg),
        ];
        if let Some((field, _)) = maxima.iter().find(|(_, v)| *v <= 0.0) {
            return Err(DomainError::Validation(format!(
                "{} must be greater than zero",
                field
            )));
        }
        if p.currency.trim().is_empty() {
            return Err(DomainError::Validation("currency is required".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_is_valid() {
        let r = RuleSet::new("JSM", BagClass::Cabin, LimitProfile::default());
        assert!(r.validate().is_ok());
    }

    #[test]
    fn zero_maximum_is_rejected() {
        let mut profile = LimitProfile::default();
        profile.max_linear_cm = 0.0;
        let err = RuleSet::new("JSM", BagClass::Cabin, profile)
            .validate()
            .unwrap_err();
        assert!(err.to_string().contains("max_linear_cm"));
    }

    #[test]
    fn negative_field_surfaces_as_invalid_input() {
        let mut profile = LimitProfile::default();
        profile.oversize_fee_flat = -1.0;
        let err = RuleSet::new("JSM", BagClass::Cabin, profile)
            .validate()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidInput(_)));
    }

    #[test]
    fn bag_class_parses() {
        assert_eq!("Handbag".parse::<BagClass>().unwrap(), BagClass::Handbag);
        assert!("trunk".parse::<BagClass>().is_err());
    }
}
