//! Kiosk sessions: start, inspect, complete

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
