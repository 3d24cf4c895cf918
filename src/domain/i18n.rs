//! Kiosk display languages and message catalogue
//!
//! The engine exposes `code` + `excess` on every violation; this module turns
//! them into text for a given language. Rounding happens here only, never in
//! the engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::compliance::ViolationCode;

/// Display language for kiosk messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Es,
    En,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Es => "es",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" => Ok(Self::Es),
            "en" => Ok(Self::En),
            other => Err(format!("unsupported language '{}'", other)),
        }
    }
}

/// Render one violation as a sentence, e.g. `Excede ancho por 4.0 cm`.
pub fn violation_message(code: ViolationCode, excess: f64, lang: Language) -> String {
    let unit = code.unit();
    match lang {
        Language::Es => {
            let what = match code {
                ViolationCode::Width => "ancho",
                ViolationCode::Length => "largo",
                ViolationCode::Height => "alto",
                ViolationCode::LinearSum => "suma lineal",
                ViolationCode::Weight => "peso",
            };
            format!("Excede {} por {:.1} {}", what, excess, unit)
        }
        Language::En => {
            let what = match code {
                ViolationCode::Width => "Width",
                ViolationCode::Length => "Length",
                ViolationCode::Height => "Height",
                ViolationCode::LinearSum => "Linear sum",
                ViolationCode::Weight => "Weight",
            };
            format!("{} exceeds limit by {:.1} {}", what, excess, unit)
        }
    }
}

/// Headline shown on the validation screen.
pub fn verdict_headline(compliant: bool, lang: Language) -> &'static str {
    match (lang, compliant) {
        (Language::Es, true) => "AUTORIZADO",
        (Language::Es, false) => "NO CUMPLE",
        (Language::En, true) => "AUTHORIZED",
        (Language::En, false) => "NOT ALLOWED",
    }
}
