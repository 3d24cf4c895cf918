//! Data Transfer Objects shared across API modules

pub mod compliance;

pub use compliance::*;
