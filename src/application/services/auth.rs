//! Operator PIN login
//!
//! The kiosk has two fixed accounts, `operator` and `admin`, each unlocked
//! by a PIN. PINs are hashed once at startup and never kept in clear.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::crypto::jwt::{create_token, verify_token, JwtConfig, TokenClaims};
use crate::infrastructure::crypto::password::{hash_pin, verify_pin};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Operator,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Operator => "operator",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "operator" => Ok(Self::Operator),
            "admin" => Ok(Self::Admin),
            other => Err(DomainError::Validation(format!("unknown role '{}'", other))),
        }
    }
}

/// Token handed out after a successful login
#[derive(Debug, Clone)]
pub struct LoginResult {
    pub token: String,
    pub role: Role,
    pub expires_at: DateTime<Utc>,
}

pub struct PinAuthenticator {
    operator_hash: String,
    admin_hash: String,
    jwt: JwtConfig,
}

impl PinAuthenticator {
    pub fn new(
        operator_pin: &str,
        admin_pin: &str,
        bcrypt_cost: u32,
        jwt: JwtConfig,
    ) -> DomainResult<Self> {
        let hash = |pin: &str| {
            hash_pin(pin, bcrypt_cost)
                .map_err(|e| DomainError::Validation(format!("Failed to hash PIN: {}", e)))
        };
        Ok(Self {
            operator_hash: hash(operator_pin)?,
            admin_hash: hash(admin_pin)?,
            jwt,
        })
    }

    pub fn login(&self, role: Role, pin: &str) -> DomainResult<LoginResult> {
        let hash = match role {
            Role::Operator => &self.operator_hash,
            Role::Admin => &self.admin_hash,
        };

        if !verify_pin(pin, hash).unwrap_or(false) {
            warn!(role = %role, "Rejected PIN login");
            return Err(DomainError::Unauthorized("Invalid PIN".into()));
        }

        let (token, claims) = create_token(role.as_str(), role.as_str(), &self.jwt)
            .map_err(|e| DomainError::Validation(format!("Failed to create token: {}", e)))?;
        let expires_at = Utc
            .timestamp_opt(claims.exp, 0)
            .single()
            .unwrap_or_else(Utc::now);

        info!(role = %role, "Operator logged in");
        Ok(LoginResult {
            token,
            role,
            expires_at,
        })
    }

    /// Decode a bearer token and return the role it grants.
    pub fn authorize(&self, token: &str) -> DomainResult<(Role, TokenClaims)> {
        let claims = verify_token(token, &self.jwt)
            .map_err(|e| DomainError::Unauthorized(format!("Invalid token: {}", e)))?;
        let role = claims
            .role
            .parse()
            .map_err(|_| DomainError::Unauthorized("Invalid token role".into()))?;
        Ok((role, claims))
    }
}
