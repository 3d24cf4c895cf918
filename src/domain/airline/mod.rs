//! Airline aggregate
//!
//! Contains the Airline entity (branding) and repository interface.

pub mod model;
pub mod repository;

pub use model::Airline;
pub use repository::AirlineRepository;
