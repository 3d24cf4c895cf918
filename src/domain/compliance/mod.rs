//! Compliance aggregate
//!
//! Contains the limit/measurement/verdict value types and the rule engine.

pub mod engine;
pub mod model;

pub use engine::evaluate;
pub use model::{FeeBreakdown, LimitProfile, Measurement, Verdict, Violation, ViolationCode};
