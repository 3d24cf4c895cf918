//! Rule set repository interface

use async_trait::async_trait;

use super::model::{BagClass, RuleSet};
use crate::domain::DomainResult;

#[async_trait]
pub trait RuleSetRepository: Send + Sync {
    async fn find(&self, airline_code: &str, bag_class: BagClass) -> DomainResult<Option<RuleSet>>;
    async fn find_for_airline(&self, airline_code: &str) -> DomainResult<Vec<RuleSet>>;
    /// Insert or replace by `(airline_code, bag_class)`
    async fn upsert(&self, rules: RuleSet) -> DomainResult<RuleSet>;
}
