//! Cross-cutting support code: error taxonomy and shutdown coordination.

pub mod errors;
pub mod shutdown;

pub use errors::{DomainError, EngineError};
