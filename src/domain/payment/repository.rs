//! Payment repository interface

use async_trait::async_trait;

use super::model::Payment;
use crate::domain::DomainResult;

#[async_trait]
pub trait PaymentRepository: Send + Sync {
    async fn save(&self, payment: Payment) -> DomainResult<Payment>;
    /// Payments of a session, oldest first
    async fn find_for_session(&self, session_id: &str) -> DomainResult<Vec<Payment>>;
}
