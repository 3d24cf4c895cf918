//! Application layer: use-case orchestration over the domain

pub mod services;

// Re-export key types for convenience
pub use services::{
    KioskService, LoginResult, PaymentRequest, PinAuthenticator, ProfileService, Role,
    ScanRequest, SessionSummary,
};
