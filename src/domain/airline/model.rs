//! Airline domain entity

use std::collections::BTreeMap;

use crate::domain::DomainResult;
use crate::support::errors::DomainError;

/// Airline served by the kiosk, keyed by its code (e.g. `JSM`)
#[derive(Debug, Clone, PartialEq)]
pub struct Airline {
    pub code: String,
    pub name: String,
    pub logo_url: Option<String>,
    /// Kiosk colour palette: `primary`, `accent`, `bg`, ...
    pub palette: BTreeMap<String, String>,
}

impl Airline {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: normalize_code(&code.into()),
            name: name.into(),
            logo_url: None,
            palette: BTreeMap::new(),
        }
    }

    pub fn with_color(mut self, key: &str, value: &str) -> Self {
        self.palette.insert(key.to_string(), value.to_string());
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.code.is_empty() || !self.code.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::Validation(format!(
                "airline code '{}' must be non-empty and alphanumeric",
                self.code
            )));
        }
        if self.name.trim().is_empty() {
            return Err(DomainError::Validation("airline name is required".into()));
        }
        Ok(())
    }
}

/// Airline codes are stored upper-case and trimmed.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_is_normalized() {
        let a = Airline::new(" jsm ", "JetSMART");
        assert_eq!(a.code, "JSM");
        assert!(a.validate().is_ok());
    }

    #[test]
    fn rejects_blank_name_and_bad_code() {
        assert!(Airline::new("JSM", "  ").validate().is_err());
        assert!(Airline::new("J-S", "JetSMART").validate().is_err());
        assert!(Airline::new("", "JetSMART").validate().is_err());
    }

    #[test]
    fn palette_builder() {
        let a = Airline::new("JSM", "JetSMART").with_color("primary", "#003595");
        assert_eq!(a.palette.get("primary").map(String::as_str), Some("#003595"));
    }
}
