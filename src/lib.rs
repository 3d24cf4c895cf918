//! # Baggage Kiosk
//!
//! Self-service carry-on baggage compliance kiosk backend: a bag is measured,
//! checked against the airline's limits for its class, and any excess fee is
//! charged before the passenger continues.
//!
//! ## Architecture
//!
//! The project follows Clean Architecture principles:
//!
//! - **domain**: the compliance engine, aggregates, repository traits and device ports
//! - **application**: kiosk workflow, airline/rule profiles and PIN authentication
//! - **infrastructure**: in-memory storage, vision helpers, simulated devices, crypto
//! - **interfaces**: REST API with Swagger documentation
//! - **server**: service lifecycle and logging setup

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod support;

pub use config::{default_config_path, AppConfig, ConfigError};

pub use domain::{evaluate, EngineError, LimitProfile, Measurement, Verdict};

// Re-export API router
pub use interfaces::http::{create_api_router, ApiDoc, ApiState};

pub use server::{init_tracing, ServerHandle, ServerOptions};
