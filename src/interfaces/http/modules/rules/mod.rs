//! Per-airline compliance limits

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
