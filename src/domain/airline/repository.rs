//! Airline repository interface

use async_trait::async_trait;

use super::model::Airline;
use crate::domain::DomainResult;

#[async_trait]
pub trait AirlineRepository: Send + Sync {
    async fn find_by_code(&self, code: &str) -> DomainResult<Option<Airline>>;
    async fn find_all(&self) -> DomainResult<Vec<Airline>>;
    /// Insert or replace by `code`
    async fn upsert(&self, airline: Airline) -> DomainResult<Airline>;
}
