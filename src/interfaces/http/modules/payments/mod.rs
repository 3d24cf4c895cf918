//! Fee payment for a non-compliant scan

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
