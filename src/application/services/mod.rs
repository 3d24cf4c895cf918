//! Application services

mod auth;
mod kiosk;
mod profiles;

pub use auth::{LoginResult, PinAuthenticator, Role};
pub use kiosk::{KioskService, PaymentRequest, ScanRequest, SessionSummary};
pub use profiles::ProfileService;
