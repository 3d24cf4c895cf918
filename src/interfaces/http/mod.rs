//! HTTP REST API interfaces
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `dto`: request/response shapes shared by several modules
//! - `middleware`: bearer JWT authentication
//! - `modules`: one module per resource (dto + handlers)
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod dto;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::{create_api_router, ApiDoc, ApiState};
