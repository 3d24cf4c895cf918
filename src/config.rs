//! Configuration module
//!
//! The kiosk reads a single TOML file, by default
//! `~/.config/baggage-kiosk/config.toml`. Every section and field has a
//! default, so a missing file or a partial file is fine.
//!
//! ```toml
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//!
//! [logging]
//! level = "info"
//! format = "json"
//!
//! [devices]
//! simulate = true
//! payment_approval_rate = 0.85
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{Airline, BagClass, LimitProfile, RuleSet};
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::crypto::password::DEFAULT_COST;

const APP_DIR: &str = "baggage-kiosk";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("cannot serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Default location of the config file
pub fn default_config_path() -> PathBuf {
    dirs_next::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
        .join(CONFIG_FILE)
}

// ── Sections ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing` env-filter directive, e.g. `info` or `baggage_kiosk=debug`
    pub level: String,
    /// `plain` or `json`
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "plain".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub operator_pin: String,
    pub admin_pin: String,
    pub bcrypt_cost: u32,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: JwtConfig::default().secret,
            jwt_expiration_hours: 12,
            operator_pin: "1234".to_string(),
            admin_pin: "9999".to_string(),
            bcrypt_cost: DEFAULT_COST,
        }
    }
}

impl SecurityConfig {
    pub fn jwt(&self) -> JwtConfig {
        JwtConfig {
            secret: self.jwt_secret.clone(),
            expiration_hours: self.jwt_expiration_hours,
            ..JwtConfig::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DevicesConfig {
    /// Use the simulated camera/scale and payment terminal. When off, scans
    /// must carry a manual measurement and payments are operator-confirmed.
    pub simulate: bool,
    pub payment_approval_rate: f64,
    pub px_per_cm: f64,
    /// Optional 3×3 image → floor perspective transform
    pub homography: Option<[[f64; 3]; 3]>,
}

impl Default for DevicesConfig {
    fn default() -> Self {
        Self {
            simulate: true,
            payment_approval_rate: 0.85,
            px_per_cm: 10.0,
            homography: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirlineSeed {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub palette: BTreeMap<String, String>,
}

impl AirlineSeed {
    pub fn to_airline(&self) -> Airline {
        let mut airline = Airline::new(&self.code, &self.name);
        airline.logo_url = self.logo_url.clone();
        airline.palette = self.palette.clone();
        airline
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSeed {
    pub bag_class: BagClass,
    pub profile: LimitProfile,
}

/// Airline and rules loaded into the store at startup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub airline: AirlineSeed,
    pub rules: Vec<RuleSeed>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        let palette = [("primary", "#003595"), ("accent", "#E20C18"), ("bg", "#F7FAFF")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let handbag = LimitProfile {
            max_length_cm: 45.0,
            max_linear_cm: 105.0,
            max_weight_kg: 8.0,
            ..LimitProfile::default()
        };

        Self {
            airline: AirlineSeed {
                code: "JSM".to_string(),
                name: "JetSMART".to_string(),
                logo_url: None,
                palette,
            },
            rules: vec![
                RuleSeed {
                    bag_class: BagClass::Cabin,
                    profile: LimitProfile::default(),
                },
                RuleSeed {
                    bag_class: BagClass::Handbag,
                    profile: handbag,
                },
            ],
        }
    }
}

impl DefaultsConfig {
    pub fn rule_pairs(&self) -> Vec<(BagClass, LimitProfile)> {
        self.rules
            .iter()
            .map(|r| (r.bag_class, r.profile.clone()))
            .collect()
    }
}

// ── AppConfig ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub security: SecurityConfig,
    pub devices: DevicesConfig,
    pub defaults: DefaultsConfig,
}

impl AppConfig {
    /// Read and validate `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let config = match std::fs::read_to_string(path) {
            Ok(text) => toml::from_str::<AppConfig>(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => AppConfig::default(),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Write the config as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let text = toml::to_string_pretty(self)?;
        std::fs::write(path, text).map_err(io_err)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if self.server.host.trim().is_empty() {
            return invalid("server.host is empty".into());
        }
        if !matches!(self.logging.format.to_lowercase().as_str(), "plain" | "json") {
            return invalid(format!(
                "logging.format must be 'plain' or 'json', got '{}'",
                self.logging.format
            ));
        }

        let sec = &self.security;
        if sec.jwt_secret.trim().is_empty() {
            return invalid("security.jwt_secret is empty".into());
        }
        if sec.jwt_expiration_hours <= 0 {
            return invalid("security.jwt_expiration_hours must be positive".into());
        }
        for (name, pin) in [("operator_pin", &sec.operator_pin), ("admin_pin", &sec.admin_pin)] {
            if !(4..=8).contains(&pin.len()) || !pin.chars().all(|c| c.is_ascii_digit()) {
                return invalid(format!("security.{} must be 4 to 8 digits", name));
            }
        }
        if sec.operator_pin == sec.admin_pin {
            return invalid("security.operator_pin and admin_pin must differ".into());
        }
        if !(4..=31).contains(&sec.bcrypt_cost) {
            return invalid("security.bcrypt_cost must be within 4..=31".into());
        }

        let dev = &self.devices;
        if !(0.0..=1.0).contains(&dev.payment_approval_rate) {
            return invalid("devices.payment_approval_rate must be within 0..=1".into());
        }
        if !dev.px_per_cm.is_finite() || dev.px_per_cm <= 0.0 {
            return invalid("devices.px_per_cm must be greater than zero".into());
        }

        let airline = self.defaults.airline.to_airline();
        airline
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("defaults.airline: {}", e)))?;
        for seed in &self.defaults.rules {
            RuleSet::new(airline.code.clone(), seed.bag_class, seed.profile.clone())
                .validate()
                .map_err(|e| {
                    ConfigError::Invalid(format!("defaults.rules[{}]: {}", seed.bag_class, e))
                })?;
        }
        Ok(())
    }
}
