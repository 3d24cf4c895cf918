//! Kiosk session aggregate
//!
//! One passenger interaction: scan(s), optional payment, completion.

pub mod model;
pub mod repository;

pub use model::{KioskSession, SessionState};
pub use repository::SessionRepository;
