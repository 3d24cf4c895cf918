use thiserror::Error;

/// Failure raised by the compliance engine.
///
/// The engine has exactly one failure mode: a field that is absent,
/// non-finite or negative. It never clamps or substitutes defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("Invalid input: {field} {reason}")]
    InvalidInput {
        field: &'static str,
        reason: &'static str,
    },
}

impl EngineError {
    pub fn missing(field: &'static str) -> Self {
        Self::InvalidInput {
            field,
            reason: "is required",
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidInput { field, .. } => field,
        }
    }
}

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error(transparent)]
    InvalidInput(#[from] EngineError),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Device error: {0}")]
    Device(String),
}
